//! Typed parsing of query-string and path parameters.
//!
//! Raw parameters arrive as text. [`Params`] holds them keyed by name and
//! converts individual values into typed fields, producing a
//! [`FieldViolation`] for each input that is absent or fails coercion.
//! [`FromParams`] implementations combine those per-field results so every
//! bad field is reported together.

use std::collections::HashMap;

use actix_web::{HttpRequest, web};

use crate::domain::{FieldViolation, Location, Numeric, ViolationCode, Violations};

/// Raw text parameters from one request location.
///
/// Duplicate keys keep the last value supplied.
///
/// # Examples
/// ```
/// use param_echo::inbound::http::params::Params;
///
/// let params = Params::from_query("page=2&query=rust").expect("well-formed query");
/// assert_eq!(params.required_integer("page"), Ok(2));
/// assert_eq!(params.optional_integer("size"), Ok(None));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Params {
    location: Location,
    values: HashMap<String, String>,
}

impl Params {
    /// Parse a URL query string.
    pub fn from_query(query: &str) -> Result<Self, FieldViolation> {
        let values = web::Query::<HashMap<String, String>>::from_query(query)
            .map_err(|err| {
                FieldViolation::new(
                    Location::Query,
                    ViolationCode::MalformedQuery.as_str(),
                    format!("query string could not be parsed: {err}"),
                )
                .with_value(query)
            })?
            .into_inner();
        Ok(Self {
            location: Location::Query,
            values,
        })
    }

    /// Collect the path segments matched by the routing pattern.
    pub fn from_path(req: &HttpRequest) -> Self {
        Self::from_pairs(Location::Path, req.match_info().iter())
    }

    /// Build parameters from explicit name/value pairs.
    pub fn from_pairs<I, K, V>(location: Location, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            location,
            values: pairs
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }

    pub fn location(&self) -> Location {
        self.location
    }

    fn raw(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    fn missing(&self, name: &str) -> FieldViolation {
        FieldViolation::new(
            self.location,
            ViolationCode::MissingField.as_str(),
            format!("{name} is required"),
        )
        .for_field(name)
    }

    fn invalid(&self, name: &str, code: ViolationCode, expected: &str, raw: &str) -> FieldViolation {
        FieldViolation::new(self.location, code.as_str(), format!("{name} must be {expected}"))
            .for_field(name)
            .with_value(raw)
    }

    fn parse_integer(&self, name: &str, raw: &str) -> Result<i64, FieldViolation> {
        raw.trim()
            .parse::<i64>()
            .map_err(|_| self.invalid(name, ViolationCode::InvalidInteger, "an integer", raw))
    }

    /// A text value that must be present. Empty strings count as present.
    pub fn required_text(&self, name: &str) -> Result<String, FieldViolation> {
        self.raw(name)
            .map(str::to_owned)
            .ok_or_else(|| self.missing(name))
    }

    pub fn optional_text(&self, name: &str) -> Option<String> {
        self.raw(name).map(str::to_owned)
    }

    pub fn required_integer(&self, name: &str) -> Result<i64, FieldViolation> {
        let raw = self.raw(name).ok_or_else(|| self.missing(name))?;
        self.parse_integer(name, raw)
    }

    /// An integer that may be absent; a present but non-integral value is
    /// still rejected.
    pub fn optional_integer(&self, name: &str) -> Result<Option<i64>, FieldViolation> {
        self.raw(name)
            .map(|raw| self.parse_integer(name, raw))
            .transpose()
    }

    /// A number supplied as either an integer or a float.
    pub fn required_numeric(&self, name: &str) -> Result<Numeric, FieldViolation> {
        let raw = self.raw(name).ok_or_else(|| self.missing(name))?;
        raw.parse::<Numeric>()
            .map_err(|_| self.invalid(name, ViolationCode::InvalidNumber, "a number", raw))
    }
}

/// Build a typed value from raw parameters.
///
/// Implementations should evaluate every field before returning so clients
/// see all failures at once; [`Violations::capture`] helps with that.
///
/// # Examples
/// ```
/// use param_echo::domain::Violations;
/// use param_echo::inbound::http::params::{FromParams, Params};
///
/// struct Page {
///     page: i64,
///     size: Option<i64>,
/// }
///
/// impl FromParams for Page {
///     fn from_params(params: &Params) -> Result<Self, Violations> {
///         let mut violations = Violations::new();
///         let page = violations.capture(params.required_integer("page"));
///         let size = violations.capture(params.optional_integer("size"));
///         match (page, size) {
///             (Some(page), Some(size)) => Ok(Self { page, size }),
///             _ => Err(violations),
///         }
///     }
/// }
///
/// let params = Params::from_query("page=x&size=y").expect("well-formed query");
/// let err = Page::from_params(&params).err().expect("both fields fail");
/// assert_eq!(err.len(), 2);
/// ```
pub trait FromParams: Sized {
    fn from_params(params: &Params) -> Result<Self, Violations>;
}
