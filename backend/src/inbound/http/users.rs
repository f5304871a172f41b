//! User creation handler.
//!
//! ```text
//! POST /users/ {"name":"Ada","email":"ada@example.com","address":{...}}
//! ```

use actix_web::{post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::extract::ValidatedJson;
use crate::domain::{Error, User};

/// Response body for `POST /users/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CreatedUser {
    pub user: User,
}

/// Accept a user record and echo it back unchanged.
#[utoipa::path(
    post,
    path = "/users/",
    request_body = User,
    responses(
        (status = 200, description = "Validated user", body = CreatedUser),
        (status = 413, description = "Body too large", body = Error),
        (status = 422, description = "Validation failed", body = Error)
    ),
    tags = ["echo"],
    operation_id = "createUser"
)]
#[post("/users/")]
pub async fn create_user(payload: ValidatedJson<User>) -> web::Json<CreatedUser> {
    web::Json(CreatedUser {
        user: payload.into_inner(),
    })
}

#[cfg(test)]
mod tests;
