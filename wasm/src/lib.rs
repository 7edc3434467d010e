//! GymFit WASM Module
//!
//! This crate lets the marketing site run the fitness calculator in the
//! browser without a round-trip to the backend.

use gymfit_shared::health_metrics::{calculate, ActivityLevel, FitnessInput};
use gymfit_shared::types::{CalculateRequest, ErrorDetail, ErrorResponse};
use wasm_bindgen::prelude::*;

/// Calculate a fitness report from a JSON calculator request
///
/// Takes the same body as `POST /api/v1/calculator` and returns the
/// report JSON, or throws an error JSON naming the offending field.
#[wasm_bindgen]
pub fn calculate_fitness_report(request_json: &str) -> Result<String, JsValue> {
    calculate_report_json(request_json).map_err(|e| JsValue::from_str(&e))
}

/// Calculate BMI from weight (kg) and height (cm)
#[wasm_bindgen]
pub fn calculate_bmi(weight_kg: f64, height_cm: f64) -> f64 {
    if height_cm <= 0.0 {
        return 0.0;
    }
    gymfit_shared::health_metrics::calculate_bmi(weight_kg, height_cm)
}

/// Activity multiplier for a level name, or 0 when the name is unknown
#[wasm_bindgen]
pub fn activity_multiplier(level: &str) -> f64 {
    level
        .parse::<ActivityLevel>()
        .map(|l| l.multiplier())
        .unwrap_or(0.0)
}

fn error_json(code: &str, message: String, field: Option<String>) -> String {
    let body = ErrorResponse {
        error: ErrorDetail {
            code: code.to_string(),
            message,
            field,
        },
    };
    serde_json::to_string(&body).unwrap_or_else(|_| r#"{"error":{"code":"INTERNAL_ERROR","message":"error serialization failed"}}"#.to_string())
}

fn calculate_report_json(request_json: &str) -> Result<String, String> {
    let request: CalculateRequest = serde_json::from_str(request_json)
        .map_err(|e| error_json("BAD_REQUEST", e.to_string(), None))?;

    let report = FitnessInput::try_from(request)
        .and_then(|input| calculate(&input))
        .map_err(|e| error_json("VALIDATION_ERROR", e.user_message(), Some(e.field)))?;

    serde_json::to_string(&report).map_err(|e| error_json("INTERNAL_ERROR", e.to_string(), None))
}
