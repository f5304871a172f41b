//! Numbers accepted as either integers or floating-point values.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A JSON-representable number that keeps integers integral.
///
/// Text is parsed as an integer first and falls back to a float, so `"10"`
/// stays `10` while `"10.5"` becomes `10.5`. Serialises as a bare number.
///
/// ## Invariants
/// - `Float` values are always finite.
///
/// # Examples
/// ```
/// use param_echo::domain::Numeric;
///
/// assert_eq!("10".parse::<Numeric>(), Ok(Numeric::Integer(10)));
/// assert_eq!("10.5".parse::<Numeric>(), Ok(Numeric::Float(10.5)));
/// assert!("inf".parse::<Numeric>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Numeric {
    Integer(i64),
    Float(f64),
}

/// Reasons a text value is not a [`Numeric`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NumericParseError {
    #[error("value is not a number")]
    NotANumber,
    #[error("value is not a finite number")]
    NotFinite,
}

impl Numeric {
    /// Widen to `f64`. Large integers may lose precision.
    #[must_use]
    pub fn as_f64(self) -> f64 {
        match self {
            #[allow(clippy::cast_precision_loss, reason = "documented widening")]
            Self::Integer(value) => value as f64,
            Self::Float(value) => value,
        }
    }
}

impl FromStr for Numeric {
    type Err = NumericParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(value) = trimmed.parse::<i64>() {
            return Ok(Self::Integer(value));
        }
        let value = trimmed
            .parse::<f64>()
            .map_err(|_| NumericParseError::NotANumber)?;
        if value.is_finite() {
            Ok(Self::Float(value))
        } else {
            Err(NumericParseError::NotFinite)
        }
    }
}

impl fmt::Display for Numeric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
        }
    }
}

impl From<i64> for Numeric {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}
