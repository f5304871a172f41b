//! Query-parameter echo handler.
//!
//! ```text
//! GET /items/?name=widget&category=tools&price=10.5
//! ```

use actix_web::{get, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::extract::ValidatedQuery;
use super::params::{FromParams, Params};
use crate::domain::{Error, Numeric, Violations};

/// Query accepted by `GET /items/`.
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct ItemQuery {
    pub name: String,
    pub category: String,
    pub price: Numeric,
}

impl FromParams for ItemQuery {
    fn from_params(params: &Params) -> Result<Self, Violations> {
        let mut violations = Violations::new();
        let name = violations.capture(params.required_text("name"));
        let category = violations.capture(params.required_text("category"));
        let price = violations.capture(params.required_numeric("price"));
        match (name, category, price) {
            (Some(name), Some(category), Some(price)) => Ok(Self {
                name,
                category,
                price,
            }),
            _ => Err(violations),
        }
    }
}

/// Echo of the accepted item query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ItemEcho {
    #[schema(example = "widget")]
    pub name: String,
    #[schema(example = "tools")]
    pub category: String,
    #[schema(value_type = f64, example = 10.5)]
    pub price: Numeric,
}

impl From<ItemQuery> for ItemEcho {
    fn from(value: ItemQuery) -> Self {
        let ItemQuery {
            name,
            category,
            price,
        } = value;
        Self {
            name,
            category,
            price,
        }
    }
}

/// Echo the item query after type coercion.
#[utoipa::path(
    get,
    path = "/items/",
    params(
        ("name" = String, Query, description = "Item name"),
        ("category" = String, Query, description = "Item category"),
        ("price" = f64, Query, description = "Price as an integer or decimal")
    ),
    responses(
        (status = 200, description = "Accepted query", body = ItemEcho),
        (status = 422, description = "Validation failed", body = Error)
    ),
    tags = ["echo"],
    operation_id = "readItems"
)]
#[get("/items/")]
pub async fn read_items(query: ValidatedQuery<ItemQuery>) -> web::Json<ItemEcho> {
    web::Json(query.into_inner().into())
}
