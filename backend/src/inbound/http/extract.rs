//! Validating extractors for query strings, path segments, and JSON bodies.
//!
//! Each extractor decodes its input, then runs the declarative constraints
//! derived with `validator`. Failures surface as `validation_failed` errors
//! before any handler code executes. Work happens inside the returned future
//! so the request trace identifier is in scope when errors are built.

use std::ops::Deref;

use actix_web::http::StatusCode;
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::LocalBoxFuture;
use serde::de::DeserializeOwned;
use serde_json::error::Category;
use tracing::debug;
use validator::Validate;

use super::params::{FromParams, Params};
use crate::domain::{Error, FieldViolation, Location, ViolationCode, Violations};

fn reject(violations: Violations) -> Error {
    debug!(violations = violations.len(), "request input rejected");
    violations.into_error()
}

fn check<T: Validate>(location: Location, value: T) -> Result<T, Violations> {
    match value.validate() {
        Ok(()) => Ok(value),
        Err(errors) => {
            let mut violations = Violations::new();
            violations.extend_from_validation(location, &errors);
            Err(violations)
        }
    }
}

fn from_params<T: FromParams + Validate>(params: &Params) -> Result<T, Violations> {
    let value = T::from_params(params)?;
    check(params.location(), value)
}

fn query_value<T: FromParams + Validate>(req: &HttpRequest) -> Result<T, Violations> {
    let params = Params::from_query(req.query_string())?;
    from_params(&params)
}

fn path_value<T: FromParams + Validate>(req: &HttpRequest) -> Result<T, Violations> {
    from_params(&Params::from_path(req))
}

macro_rules! wrapper {
    ($name:ident) => {
        impl<T> $name<T> {
            /// Unwrap into the validated value.
            pub fn into_inner(self) -> T {
                self.0
            }
        }

        impl<T> Deref for $name<T> {
            type Target = T;

            fn deref(&self) -> &T {
                &self.0
            }
        }
    };
}

/// Query parameters decoded with [`FromParams`] and checked with
/// [`Validate`].
///
/// # Examples
/// ```
/// use actix_web::get;
/// use param_echo::inbound::http::extract::ValidatedQuery;
/// use param_echo::inbound::http::validate::UsernameQuery;
///
/// #[get("/whoami")]
/// async fn whoami(query: ValidatedQuery<UsernameQuery>) -> String {
///     query.into_inner().username
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedQuery<T>(pub T);

wrapper!(ValidatedQuery);

impl<T> FromRequest for ValidatedQuery<T>
where
    T: FromParams + Validate + 'static,
{
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let req = req.clone();
        Box::pin(async move { query_value(&req).map(Self).map_err(reject) })
    }
}

/// Matched path segments decoded with [`FromParams`] and checked with
/// [`Validate`].
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedPath<T>(pub T);

wrapper!(ValidatedPath);

impl<T> FromRequest for ValidatedPath<T>
where
    T: FromParams + Validate + 'static,
{
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let req = req.clone();
        Box::pin(async move { path_value(&req).map(Self).map_err(reject) })
    }
}

/// JSON request body deserialised with serde and checked with [`Validate`].
///
/// The body size is bounded by the [`web::PayloadConfig`] registered on the
/// app (256 KiB by default). The `Content-Type` header is not inspected.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedJson<T>(pub T);

wrapper!(ValidatedJson);

impl<T> FromRequest for ValidatedJson<T>
where
    T: DeserializeOwned + Validate + 'static,
{
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let body = web::Bytes::from_request(req, payload);
        Box::pin(async move {
            let bytes = body.await.map_err(body_read_error)?;
            json_value(&bytes).map(Self).map_err(reject)
        })
    }
}

/// Path, query, and body of one request, validated together.
///
/// Unlike stacking [`ValidatedPath`], [`ValidatedQuery`], and
/// [`ValidatedJson`], every failing input is reported in a single response,
/// ordered path, query, then body. An oversized body is still rejected
/// outright with `payload_too_large`.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedParts<P, Q, B> {
    pub path: P,
    pub query: Q,
    pub body: B,
}

impl<P, Q, B> FromRequest for ValidatedParts<P, Q, B>
where
    P: FromParams + Validate + 'static,
    Q: FromParams + Validate + 'static,
    B: DeserializeOwned + Validate + 'static,
{
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let body = web::Bytes::from_request(req, payload);
        let req = req.clone();
        Box::pin(async move {
            let bytes = body.await.map_err(body_read_error)?;
            match (path_value(&req), query_value(&req), json_value(&bytes)) {
                (Ok(path), Ok(query), Ok(body)) => Ok(Self { path, query, body }),
                (path, query, body) => {
                    let mut violations = Violations::new();
                    violations.extend(path.err().into_iter().flatten());
                    violations.extend(query.err().into_iter().flatten());
                    violations.extend(body.err().into_iter().flatten());
                    Err(reject(violations))
                }
            }
        })
    }
}

fn body_read_error(err: actix_web::Error) -> Error {
    if err.as_response_error().status_code() == StatusCode::PAYLOAD_TOO_LARGE {
        debug!(error = %err, "request body rejected");
        Error::payload_too_large("request body exceeds the configured size limit")
    } else {
        Error::from(err)
    }
}

fn body_violation(code: ViolationCode, message: String) -> FieldViolation {
    FieldViolation::new(Location::Body, code.as_str(), message)
}

/// Dotted path of the value being decoded, `None` at the document root.
fn field_path(path: &serde_path_to_error::Path) -> Option<String> {
    path.iter().next().is_some().then(|| path.to_string())
}

fn missing_field_name(detail: &str) -> Option<&str> {
    detail.strip_prefix("missing field `")?.split('`').next()
}

fn shape_violation(err: &serde_path_to_error::Error<serde_json::Error>) -> FieldViolation {
    let parent = field_path(err.path());
    let detail = err.inner().to_string();
    if let Some(name) = missing_field_name(&detail) {
        let field = match parent {
            Some(parent) => format!("{parent}.{name}"),
            None => name.to_owned(),
        };
        return body_violation(ViolationCode::MissingField, format!("{field} is required"))
            .for_field(field);
    }
    match parent {
        Some(field) => body_violation(
            ViolationCode::JsonType,
            format!("{field} has the wrong type: {detail}"),
        )
        .for_field(field),
        None => body_violation(
            ViolationCode::JsonType,
            format!("request body does not match the expected shape: {detail}"),
        ),
    }
}

fn json_value<T: DeserializeOwned + Validate>(bytes: &[u8]) -> Result<T, Violations> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(Violations::from(body_violation(
            ViolationCode::MissingBody,
            "request body is required".to_owned(),
        )));
    }
    let invalid = |err: &serde_json::Error| {
        Violations::from(body_violation(
            ViolationCode::JsonInvalid,
            format!("request body is not valid JSON: {err}"),
        ))
    };
    let mut de = serde_json::Deserializer::from_slice(bytes);
    let value: T =
        serde_path_to_error::deserialize(&mut de).map_err(|err| match err.inner().classify() {
            Category::Data => Violations::from(shape_violation(&err)),
            _ => invalid(err.inner()),
        })?;
    de.end().map_err(|err| invalid(&err))?;
    check(Location::Body, value)
}
