//! Domain primitives shared by the HTTP adapter.
//!
//! Public surface:
//! - Error / ErrorCode: error envelope returned for every failure.
//! - FieldViolation / Violations: per-field detail inside validation errors.
//! - Address / User / Report: validated request records.
//! - Numeric: integer-or-float values.
//! - TraceId: request correlation identifier.

pub mod error;
pub mod numeric;
pub mod records;
pub mod trace_id;
pub mod violation;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::numeric::{Numeric, NumericParseError};
pub use self::records::{Address, Report, User};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::violation::{FieldViolation, Location, ViolationCode, Violations};

/// Convenient result alias for request handling.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use param_echo::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
