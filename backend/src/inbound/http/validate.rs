//! Constrained username handler.
//!
//! ```text
//! GET /validate/?username=abc123
//! ```

use std::sync::LazyLock;

use actix_web::{get, web};
use regex::Regex;
use validator::Validate;

use super::extract::ValidatedQuery;
use super::params::{FromParams, Params};
use crate::domain::{Error, Violations};

/// Letters and digits only, anchored at both ends.
#[cfg_attr(
    not(any(test, doctest)),
    expect(clippy::expect_used, reason = "literal pattern always compiles")
)]
static USERNAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9]+$").expect("username pattern compiles"));

/// Query accepted by `GET /validate/`.
///
/// `username` must be 3 to 10 characters long and alphanumeric.
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct UsernameQuery {
    #[validate(
        length(min = 3, max = 10),
        regex(path = *USERNAME_PATTERN, message = "username must contain only letters and digits")
    )]
    pub username: String,
}

impl FromParams for UsernameQuery {
    fn from_params(params: &Params) -> Result<Self, Violations> {
        let username = params.required_text("username")?;
        Ok(Self { username })
    }
}

/// Return the username once it satisfies its constraints.
#[utoipa::path(
    get,
    path = "/validate/",
    params(
        ("username" = String, Query, description = "3-10 alphanumeric characters")
    ),
    responses(
        (status = 200, description = "Accepted username", body = String),
        (status = 422, description = "Validation failed", body = Error)
    ),
    tags = ["echo"],
    operation_id = "validateUsername"
)]
#[get("/validate/")]
pub async fn validate_username(query: ValidatedQuery<UsernameQuery>) -> web::Json<String> {
    web::Json(query.into_inner().username)
}
