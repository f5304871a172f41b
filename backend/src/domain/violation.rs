//! Field-level validation failures reported inside the error envelope.
//!
//! A request can fail in several places at once. [`Violations`] gathers every
//! rejected input so the client sees the whole picture in one response, and
//! converts the collection into an [`Error`] with
//! `details = {"violations": [...]}`.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use utoipa::ToSchema;
use validator::{ValidationError, ValidationErrors, ValidationErrorsKind};

use super::error::Error;

/// Where a rejected input came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Location {
    Path,
    Query,
    Body,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Path => "path",
            Self::Query => "query",
            Self::Body => "body",
        })
    }
}

/// Violation codes raised while decoding raw request input.
///
/// Declarative constraint failures reuse the constraint name instead
/// (`email`, `length`, `range`, `regex`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationCode {
    MissingField,
    InvalidInteger,
    InvalidNumber,
    MalformedQuery,
    MissingBody,
    JsonInvalid,
    JsonType,
}

impl ViolationCode {
    /// Wire representation of the code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::InvalidInteger => "invalid_integer",
            Self::InvalidNumber => "invalid_number",
            Self::MalformedQuery => "malformed_query",
            Self::MissingBody => "missing_body",
            Self::JsonInvalid => "json_invalid",
            Self::JsonType => "json_type",
        }
    }
}

/// One rejected request input.
///
/// # Examples
/// ```
/// use param_echo::domain::{FieldViolation, Location, ViolationCode};
///
/// let violation = FieldViolation::new(
///     Location::Query,
///     ViolationCode::InvalidNumber.as_str(),
///     "price must be a number",
/// )
/// .for_field("price")
/// .with_value("ten");
/// assert_eq!(violation.field(), Some("price"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FieldViolation {
    location: Location,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "address.zip")]
    field: Option<String>,
    #[schema(example = "missing_field")]
    code: String,
    #[schema(example = "address.zip is required")]
    message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    value: Option<Value>,
}

impl FieldViolation {
    pub fn new(location: Location, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            location,
            field: None,
            code: code.into(),
            message: message.into(),
            value: None,
        }
    }

    /// Name the rejected field.
    #[must_use]
    pub fn for_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Record the offending raw value.
    #[must_use]
    pub fn with_value(mut self, value: impl Into<Value>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn location(&self) -> Location {
        self.location
    }

    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    fn from_constraint(location: Location, field: Option<String>, error: &ValidationError) -> Self {
        let message = describe(field.as_deref(), error);
        Self {
            location,
            value: error.params.get("value").cloned(),
            field,
            code: error.code.to_string(),
            message,
        }
    }
}

/// Ordered collection of rejected inputs for one request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Violations(Vec<FieldViolation>);

impl Violations {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, violation: FieldViolation) {
        self.0.push(violation);
    }

    /// Record the failure of `result` and yield its success value otherwise.
    ///
    /// Lets callers keep parsing after the first bad field.
    ///
    /// # Examples
    /// ```
    /// use param_echo::domain::{FieldViolation, Location, Violations};
    ///
    /// let mut violations = Violations::new();
    /// let ok: Option<i64> = violations.capture(Ok(3));
    /// let bad: Option<i64> = violations.capture(Err(FieldViolation::new(
    ///     Location::Query,
    ///     "missing_field",
    ///     "page is required",
    /// )));
    /// assert_eq!((ok, bad, violations.len()), (Some(3), None, 1));
    /// ```
    pub fn capture<T>(&mut self, result: Result<T, FieldViolation>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(violation) => {
                self.push(violation);
                None
            }
        }
    }

    /// Flatten declarative constraint failures into violations.
    ///
    /// Nested struct fields become dotted paths (`address.zip`) and list
    /// elements become indexed paths (`tags[0]`). The added entries are sorted
    /// by field path so output is stable regardless of hash order.
    pub fn extend_from_validation(&mut self, location: Location, errors: &ValidationErrors) {
        let mut batch = Vec::new();
        flatten(location, None, errors, &mut batch);
        batch.sort_by(|a, b| a.field.cmp(&b.field));
        self.0.extend(batch);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FieldViolation> {
        self.0.iter()
    }

    /// Convert into a `validation_failed` error carrying every violation.
    ///
    /// A single violation lends its message to the envelope; several are
    /// summarised by count.
    #[must_use]
    pub fn into_error(self) -> Error {
        let message = match self.0.as_slice() {
            [only] => only.message.clone(),
            [] => "request validation failed".to_owned(),
            many => format!("{} request fields failed validation", many.len()),
        };
        Error::validation_failed(message).with_details(json!({ "violations": self.0 }))
    }
}

impl From<FieldViolation> for Violations {
    fn from(violation: FieldViolation) -> Self {
        Self(vec![violation])
    }
}

impl Extend<FieldViolation> for Violations {
    fn extend<I: IntoIterator<Item = FieldViolation>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl IntoIterator for Violations {
    type Item = FieldViolation;
    type IntoIter = std::vec::IntoIter<FieldViolation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Violations {
    type Item = &'a FieldViolation;
    type IntoIter = std::slice::Iter<'a, FieldViolation>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

const STRUCT_LEVEL_KEY: &str = "__all__";

fn flatten(
    location: Location,
    prefix: Option<&str>,
    errors: &ValidationErrors,
    out: &mut Vec<FieldViolation>,
) {
    for (key, kind) in errors.errors() {
        let key = key.to_string();
        let path = match (prefix, key.as_str()) {
            (prefix, STRUCT_LEVEL_KEY) => prefix.map(str::to_owned),
            (Some(prefix), key) => Some(format!("{prefix}.{key}")),
            (None, key) => Some(key.to_owned()),
        };
        match kind {
            ValidationErrorsKind::Field(field_errors) => out.extend(
                field_errors
                    .iter()
                    .map(|error| FieldViolation::from_constraint(location, path.clone(), error)),
            ),
            ValidationErrorsKind::Struct(nested) => {
                flatten(location, path.as_deref(), nested, out);
            }
            ValidationErrorsKind::List(items) => {
                let base = path.unwrap_or_default();
                for (index, nested) in items {
                    let indexed = format!("{base}[{index}]");
                    flatten(location, Some(indexed.as_str()), nested, out);
                }
            }
        }
    }
}

fn describe(field: Option<&str>, error: &ValidationError) -> String {
    if let Some(message) = &error.message {
        return message.to_string();
    }
    let subject = field.unwrap_or("request");
    let min = error.params.get("min");
    let max = error.params.get("max");
    match &*error.code {
        "email" => format!("{subject} must be a valid email address"),
        "length" => match (min, max) {
            (Some(min), Some(max)) => {
                format!("{subject} must be between {min} and {max} characters long")
            }
            (Some(min), None) => format!("{subject} must be at least {min} characters long"),
            (None, Some(max)) => format!("{subject} must be at most {max} characters long"),
            (None, None) => format!("{subject} has an invalid length"),
        },
        "range" => match (min, max) {
            (Some(min), Some(max)) => format!("{subject} must be between {min} and {max}"),
            (Some(min), None) => format!("{subject} must be greater than or equal to {min}"),
            (None, Some(max)) => format!("{subject} must be less than or equal to {max}"),
            (None, None) => format!("{subject} is out of range"),
        },
        "regex" => format!("{subject} has an invalid format"),
        _ => format!("{subject} is invalid"),
    }
}
