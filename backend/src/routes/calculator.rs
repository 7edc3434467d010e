//! Fitness calculator API routes

use crate::error::ApiResult;
use crate::services::CalculatorService;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Json, Router,
};
use gymfit_shared::health_metrics::FitnessReport;
use gymfit_shared::types::{ActivityLevelsResponse, CalculateRequest};

use super::export;

/// Create calculator routes
pub fn calculator_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(calculate))
        .route("/activity-levels", get(list_activity_levels))
        .nest("/export", export::export_routes())
}

/// POST /api/v1/calculator - Compute a fitness report
async fn calculate(Json(req): Json<CalculateRequest>) -> ApiResult<Json<FitnessReport>> {
    let calc = CalculatorService::calculate(req)?;
    Ok(Json(calc.report))
}

/// GET /api/v1/calculator/activity-levels - List activity levels and multipliers
async fn list_activity_levels() -> Json<ActivityLevelsResponse> {
    Json(ActivityLevelsResponse {
        levels: CalculatorService::activity_levels(),
    })
}
