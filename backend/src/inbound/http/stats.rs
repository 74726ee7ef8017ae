//! Token-gated statistics and CSV export handlers.
//!
//! ```text
//! GET /api/v1/stats?token=...
//! GET /api/v1/stats/export?token=...&subject=MATH
//! GET /api/v1/stats/export-all?token=...
//! ```

use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{HttpResponse, get, web};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::domain::{CsvExport, Error, ExportScope, StatsReport, SubjectCode};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, StatsReportSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, invalid_value_error, missing_field_error};

const SUBJECT: FieldName = FieldName::new("subject");

/// Query for the statistics endpoints.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TokenParams {
    /// Shared export token.
    pub token: Option<String>,
}

/// Query for `GET /api/v1/stats/export`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SubjectExportParams {
    /// Shared export token.
    pub token: Option<String>,
    /// Subject code to export, e.g. `MATH`.
    pub subject: Option<String>,
}

fn csv_response(export: CsvExport) -> HttpResponse {
    let disposition = ContentDisposition {
        disposition: DispositionType::Attachment,
        parameters: vec![DispositionParam::Filename(export.filename().to_owned())],
    };
    HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header(disposition)
        .body(export.into_body())
}

fn parse_subject(raw: Option<String>) -> Result<SubjectCode, Error> {
    let raw = raw.ok_or_else(|| missing_field_error(SUBJECT))?;
    SubjectCode::new(&raw)
        .map_err(|err| invalid_value_error(SUBJECT, err.to_string(), &raw))
}

/// Completion progress per subject.
#[utoipa::path(
    get,
    path = "/api/v1/stats",
    params(TokenParams),
    responses(
        (status = 200, description = "Per-subject progress", body = StatsReportSchema),
        (status = 401, description = "Missing or wrong token", body = ErrorSchema),
        (status = 403, description = "Export disabled", body = ErrorSchema),
        (status = 503, description = "Database unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["stats"],
    operation_id = "getStats",
    security([])
)]
#[get("/stats")]
pub async fn get_stats(
    state: web::Data<HttpState>,
    params: web::Query<TokenParams>,
) -> ApiResult<web::Json<StatsReport>> {
    let report = state.stats.subject_stats(params.into_inner().token).await?;
    Ok(web::Json(report))
}

/// CSV export for one subject.
#[utoipa::path(
    get,
    path = "/api/v1/stats/export",
    params(SubjectExportParams),
    responses(
        (status = 200, description = "BOM-prefixed CSV", content_type = "text/csv", body = String),
        (status = 400, description = "Missing or invalid subject", body = ErrorSchema),
        (status = 401, description = "Missing or wrong token", body = ErrorSchema),
        (status = 403, description = "Export disabled", body = ErrorSchema),
        (status = 503, description = "Database unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["stats"],
    operation_id = "exportSubject",
    security([])
)]
#[get("/stats/export")]
pub async fn export_subject(
    state: web::Data<HttpState>,
    params: web::Query<SubjectExportParams>,
) -> ApiResult<HttpResponse> {
    let SubjectExportParams { token, subject } = params.into_inner();
    let subject = parse_subject(subject)?;
    let export = state
        .stats
        .export_csv(token, ExportScope::Subject(subject))
        .await?;
    Ok(csv_response(export))
}

/// CSV export for every subject.
#[utoipa::path(
    get,
    path = "/api/v1/stats/export-all",
    params(TokenParams),
    responses(
        (status = 200, description = "BOM-prefixed CSV", content_type = "text/csv", body = String),
        (status = 401, description = "Missing or wrong token", body = ErrorSchema),
        (status = 403, description = "Export disabled", body = ErrorSchema),
        (status = 503, description = "Database unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["stats"],
    operation_id = "exportAll",
    security([])
)]
#[get("/stats/export-all")]
pub async fn export_all(
    state: web::Data<HttpState>,
    params: web::Query<TokenParams>,
) -> ApiResult<HttpResponse> {
    let export = state
        .stats
        .export_csv(params.into_inner().token, ExportScope::All)
        .await?;
    Ok(csv_response(export))
}
