//! Report export API routes

use crate::error::ApiResult;
use crate::services::{CalculatorService, ExportService};
use crate::state::AppState;
use crate::telemetry;
use axum::{
    http::{header, HeaderMap, HeaderValue},
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use gymfit_shared::types::CalculateRequest;

/// Create export routes
pub fn export_routes() -> Router<AppState> {
    Router::new()
        .route("/json", post(export_json))
        .route("/csv", post(export_csv))
}

fn attachment_headers(content_type: &'static str, disposition: &'static str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));
    headers.insert(header::CONTENT_DISPOSITION, HeaderValue::from_static(disposition));
    headers
}

/// POST /api/v1/calculator/export/json - Download the report as JSON
async fn export_json(Json(req): Json<CalculateRequest>) -> ApiResult<impl IntoResponse> {
    let calc = CalculatorService::calculate(req)?;
    let json = ExportService::export_json(&calc)?;
    telemetry::record_export("json");

    let headers = attachment_headers(
        "application/json",
        "attachment; filename=\"fitness-report.json\"",
    );
    Ok((headers, json))
}

/// POST /api/v1/calculator/export/csv - Download the report as CSV
async fn export_csv(Json(req): Json<CalculateRequest>) -> ApiResult<impl IntoResponse> {
    let calc = CalculatorService::calculate(req)?;
    let csv = ExportService::export_csv(&calc)?;
    telemetry::record_export("csv");

    let headers = attachment_headers("text/csv", "attachment; filename=\"fitness-report.csv\"");
    Ok((headers, csv))
}
