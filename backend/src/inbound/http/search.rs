//! Paginated search handler with defaulted parameters.
//!
//! ```text
//! GET /search/?page=1
//! GET /search/?page=2&size=20&query=rust
//! ```

use actix_web::{get, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::extract::ValidatedQuery;
use super::params::{FromParams, Params};
use crate::domain::{Error, Violations};

/// Search text used when the client omits `query`.
pub const DEFAULT_SEARCH_QUERY: &str = "Diligwe";

/// Query accepted by `GET /search/`.
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct SearchQuery {
    pub page: i64,
    pub size: Option<i64>,
    pub query: String,
}

impl FromParams for SearchQuery {
    fn from_params(params: &Params) -> Result<Self, Violations> {
        let mut violations = Violations::new();
        let page = violations.capture(params.required_integer("page"));
        let size = violations.capture(params.optional_integer("size"));
        let query = params
            .optional_text("query")
            .unwrap_or_else(|| DEFAULT_SEARCH_QUERY.to_owned());
        match (page, size) {
            (Some(page), Some(size)) => Ok(Self { page, size, query }),
            _ => Err(violations),
        }
    }
}

/// Search parameters after defaults are applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SearchEcho {
    #[schema(example = "Diligwe")]
    pub query: String,
    #[schema(example = 20)]
    pub size: Option<i64>,
    #[schema(example = 1)]
    pub page: i64,
}

impl From<SearchQuery> for SearchEcho {
    fn from(value: SearchQuery) -> Self {
        Self {
            query: value.query,
            size: value.size,
            page: value.page,
        }
    }
}

/// Echo the search parameters with defaults applied.
#[utoipa::path(
    get,
    path = "/search/",
    params(
        ("page" = i64, Query, description = "Page number"),
        ("size" = Option<i64>, Query, description = "Page size; null when omitted"),
        ("query" = Option<String>, Query, description = "Search text; defaults to \"Diligwe\"")
    ),
    responses(
        (status = 200, description = "Accepted search", body = SearchEcho),
        (status = 422, description = "Validation failed", body = Error)
    ),
    tags = ["echo"],
    operation_id = "search"
)]
#[get("/search/")]
pub async fn search(query: ValidatedQuery<SearchQuery>) -> web::Json<SearchEcho> {
    web::Json(query.into_inner().into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, http::StatusCode, test as actix_test};
    use rstest::rstest;
    use serde_json::{Value, json};

    async fn get(uri: &str) -> (StatusCode, Value) {
        let app = actix_test::init_service(App::new().service(search)).await;
        let res =
            actix_test::call_service(&app, actix_test::TestRequest::get().uri(uri).to_request())
                .await;
        let status = res.status();
        (status, actix_test::read_body_json(res).await)
    }

    #[rstest]
    #[case("/search/?page=1", json!({"query": "Diligwe", "size": null, "page": 1}))]
    #[case("/search/?page=2&size=20&query=rust", json!({"query": "rust", "size": 20, "page": 2}))]
    #[case("/search/?page=3&query=", json!({"query": "", "size": null, "page": 3}))]
    #[actix_web::test]
    async fn applies_defaults(#[case] uri: &str, #[case] expected: Value) {
        let (status, body) = get(uri).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, expected);
    }

    #[rstest]
    #[case("/search/", "missing_field")]
    #[case("/search/?page=first", "invalid_integer")]
    #[case("/search/?page=1&size=big", "invalid_integer")]
    #[actix_web::test]
    async fn rejects_bad_pagination(#[case] uri: &str, #[case] code: &str) {
        let (status, body) = get(uri).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["details"]["violations"][0]["code"], code);
    }
}
