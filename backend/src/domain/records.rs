//! Request records validated before any handler code runs.
//!
//! Each record lives for a single request. Unknown JSON fields are ignored;
//! missing or mistyped fields are rejected during deserialisation and the
//! declarative constraints below are checked afterwards.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Postal address nested inside a [`User`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
pub struct Address {
    #[schema(example = "1 Main Street")]
    pub street: String,
    #[schema(example = "Lagos")]
    pub city: String,
    #[schema(example = "100001")]
    pub zip: String,
}

/// User submitted to `POST /users/`.
///
/// `email` must be syntactically valid; the nested address is validated as
/// part of the user.
///
/// # Examples
/// ```
/// use param_echo::domain::{Address, User};
/// use validator::Validate;
///
/// let user = User {
///     name: "Ada".into(),
///     email: "ada@example.com".into(),
///     address: Address {
///         street: "1 Main Street".into(),
///         city: "Lagos".into(),
///         zip: "100001".into(),
///     },
/// };
/// assert!(user.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
pub struct User {
    #[schema(example = "Ada")]
    pub name: String,
    #[validate(email)]
    #[schema(example = "ada@example.com")]
    pub email: String,
    #[validate(nested)]
    pub address: Address,
}

/// Report body submitted to `POST /reports/{report_id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
pub struct Report {
    #[schema(example = "Quarterly summary")]
    pub title: String,
    #[schema(example = "All targets met.")]
    pub content: String,
}
