//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every echo endpoint, the health probes, and the
//! record, echo, and error schemas. The document backs Swagger UI in debug
//! builds and is printed by `cargo run --bin openapi-dump`.

use utoipa::OpenApi;

use crate::domain::{Address, Error, ErrorCode, FieldViolation, Location, Report, User};
use crate::inbound::http::items::ItemEcho;
use crate::inbound::http::reports::{ReportSummary, ReportWindow};
use crate::inbound::http::search::SearchEcho;
use crate::inbound::http::users::CreatedUser;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "param-echo API",
        description = "Echo endpoints demonstrating declarative validation of query, path, and body inputs.",
        license(
            name = "Apache-2.0",
            url = "https://www.apache.org/licenses/LICENSE-2.0.html"
        )
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::items::read_items,
        crate::inbound::http::search::search,
        crate::inbound::http::users::create_user,
        crate::inbound::http::validate::validate_username,
        crate::inbound::http::reports::submit_report,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        FieldViolation,
        Location,
        Address,
        User,
        Report,
        ItemEcho,
        SearchEcho,
        CreatedUser,
        ReportWindow,
        ReportSummary
    )),
    tags(
        (name = "echo", description = "Validated echo endpoints"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying the generated document structure.

    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    fn object_fields(name: &str) -> Vec<String> {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        match schemas.get(name).expect("schema registered") {
            RefOr::T(Schema::Object(obj)) => obj.properties.keys().cloned().collect(),
            _ => panic!("expected Object schema for {name}"),
        }
    }

    #[rstest]
    #[case("/items/")]
    #[case("/search/")]
    #[case("/users/")]
    #[case("/validate/")]
    #[case("/reports/{report_id}")]
    #[case("/health/ready")]
    #[case("/health/live")]
    fn registers_every_path(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing {path}");
    }

    #[rstest]
    fn error_schema_uses_wire_names() {
        let fields = object_fields("Error");
        for field in ["code", "message", "traceId", "details"] {
            assert!(fields.iter().any(|f| f == field), "Error lacks {field}");
        }
    }

    #[rstest]
    fn report_summary_uses_display_keys() {
        let fields = object_fields("ReportSummary");
        for field in ["Path Parameter", "Query Parameters", "Request Body"] {
            assert!(fields.iter().any(|f| f == field), "summary lacks {field}");
        }
    }
}
