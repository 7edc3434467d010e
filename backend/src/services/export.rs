//! Report export service
//!
//! Supports multiple formats:
//! - JSON: Input and report in a versioned envelope
//! - CSV: One metric per row for spreadsheets

use crate::error::ApiError;
use crate::services::calculator::Calculation;
use chrono::{DateTime, Utc};
use gymfit_shared::health_metrics::{FitnessInput, FitnessReport};
use serde::{Deserialize, Serialize};

/// Version of the JSON export layout
pub const EXPORT_VERSION: &str = "1.0";

/// Downloadable fitness report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportExport {
    pub export_version: String,
    pub generated_at: DateTime<Utc>,
    pub input: FitnessInput,
    pub report: FitnessReport,
}

#[derive(Debug, Serialize)]
struct ReportCsvRow {
    metric: &'static str,
    value: String,
    unit: &'static str,
}

/// Export service for calculator reports
pub struct ExportService;

impl ExportService {
    /// Export as pretty-printed JSON
    pub fn export_json(calc: &Calculation) -> Result<String, ApiError> {
        let export = ReportExport {
            export_version: EXPORT_VERSION.to_string(),
            generated_at: Utc::now(),
            input: calc.input,
            report: calc.report.clone(),
        };

        serde_json::to_string_pretty(&export)
            .map_err(|e| ApiError::Internal(anyhow::anyhow!("JSON serialization error: {}", e)))
    }

    /// Export as metric,value,unit CSV
    pub fn export_csv(calc: &Calculation) -> Result<String, ApiError> {
        let report = &calc.report;
        let row = |metric: &'static str, value: String, unit: &'static str| ReportCsvRow {
            metric,
            value,
            unit,
        };

        let mut rows = vec![
            row("bmi", report.bmi.to_string(), "kg/m2"),
            row("bmi_category", report.bmi_category.description().to_string(), ""),
            row("bmr", report.bmr.to_string(), "kcal/day"),
            row("daily_calories", report.daily_calories.to_string(), "kcal/day"),
            row("water_intake", report.water_intake_liters.to_string(), "l/day"),
            row("ideal_weight_min", report.ideal_weight_range_kg.min.to_string(), "kg"),
            row("ideal_weight_max", report.ideal_weight_range_kg.max.to_string(), "kg"),
            row("protein", report.macros.protein_g.to_string(), "g/day"),
            row("carbs", report.macros.carbs_g.to_string(), "g/day"),
            row("fats", report.macros.fats_g.to_string(), "g/day"),
            row("body_fat", report.body_fat_percent.to_string(), "%"),
        ];
        for warning in &report.warnings {
            rows.push(row("warning", warning.description().to_string(), ""));
        }

        Self::to_csv(&rows)
    }

    /// Convert data to CSV string
    fn to_csv<T: Serialize>(data: &[T]) -> Result<String, ApiError> {
        let mut wtr = csv::Writer::from_writer(vec![]);
        for record in data {
            wtr.serialize(record)
                .map_err(|e| ApiError::Internal(anyhow::anyhow!("CSV serialization error: {}", e)))?;
        }
        let bytes = wtr
            .into_inner()
            .map_err(|e| ApiError::Internal(anyhow::anyhow!("CSV flush error: {}", e)))?;
        String::from_utf8(bytes)
            .map_err(|e| ApiError::Internal(anyhow::anyhow!("CSV encoding error: {}", e)))
    }
}
