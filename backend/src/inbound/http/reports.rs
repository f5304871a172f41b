//! Combined path, query, and body handler.
//!
//! ```text
//! POST /reports/5?start_date=2024&end_date=2025 {"title":"Q1","content":"done"}
//! ```

use actix_web::{post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::extract::ValidatedParts;
use super::params::{FromParams, Params};
use crate::domain::{Error, Report, Violations};

/// Path segment of `POST /reports/{report_id}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Validate)]
pub struct ReportPath {
    pub report_id: i64,
}

impl FromParams for ReportPath {
    fn from_params(params: &Params) -> Result<Self, Violations> {
        let report_id = params.required_integer("report_id")?;
        Ok(Self { report_id })
    }
}

/// Reporting window supplied as query parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
pub struct ReportWindow {
    #[validate(range(min = 2024))]
    #[schema(example = 2024, minimum = 2024)]
    pub start_date: i64,
    #[validate(range(max = 2026))]
    #[schema(example = 2026, maximum = 2026)]
    pub end_date: i64,
}

impl FromParams for ReportWindow {
    fn from_params(params: &Params) -> Result<Self, Violations> {
        let mut violations = Violations::new();
        let start_date = violations.capture(params.required_integer("start_date"));
        let end_date = violations.capture(params.required_integer("end_date"));
        match (start_date, end_date) {
            (Some(start_date), Some(end_date)) => Ok(Self {
                start_date,
                end_date,
            }),
            _ => Err(violations),
        }
    }
}

/// Summary of every accepted input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ReportSummary {
    #[serde(rename = "Path Parameter")]
    #[schema(example = 5)]
    pub report_id: i64,
    #[serde(rename = "Query Parameters")]
    pub window: ReportWindow,
    #[serde(rename = "Request Body")]
    pub report: Report,
}

/// Accept a report and summarise where each input came from.
#[utoipa::path(
    post,
    path = "/reports/{report_id}",
    params(
        ("report_id" = i64, Path, description = "Report identifier"),
        ("start_date" = i64, Query, description = "First year, at least 2024"),
        ("end_date" = i64, Query, description = "Last year, at most 2026")
    ),
    request_body = Report,
    responses(
        (status = 200, description = "Accepted report", body = ReportSummary),
        (status = 413, description = "Body too large", body = Error),
        (status = 422, description = "Validation failed", body = Error)
    ),
    tags = ["echo"],
    operation_id = "submitReport"
)]
#[post("/reports/{report_id}")]
pub async fn submit_report(
    request: ValidatedParts<ReportPath, ReportWindow, Report>,
) -> web::Json<ReportSummary> {
    let ValidatedParts {
        path,
        query: window,
        body: report,
    } = request;
    web::Json(ReportSummary {
        report_id: path.report_id,
        window,
        report,
    })
}
