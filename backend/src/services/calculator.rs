//! Fitness calculator service
//!
//! Turns a calculator form submission into a report:
//! - Parses and validates the request
//! - Runs the pure calculator
//! - Records logs and metrics for the calculation

use crate::error::ApiError;
use crate::telemetry;
use gymfit_shared::health_metrics::{
    calculate, ActivityLevel, BiologicalSex, FitnessInput, FitnessReport, Goal,
};
use gymfit_shared::types::{ActivityLevelInfo, CalculateRequest};
use gymfit_shared::units::{HeightUnit, WeightUnit};
use std::time::Instant;
use tracing::{debug, warn};

/// Input paired with the report computed from it
#[derive(Debug, Clone)]
pub struct Calculation {
    pub input: FitnessInput,
    pub report: FitnessReport,
}

/// Calculator service for business logic
pub struct CalculatorService;

impl CalculatorService {
    /// Validate a form submission and compute its report
    pub fn calculate(req: CalculateRequest) -> Result<Calculation, ApiError> {
        let input = FitnessInput::try_from(req).map_err(|err| {
            warn!(field = %err.field, message = %err.message, "Rejected calculator input");
            telemetry::record_calculation_error(&err.field);
            err
        })?;

        Self::calculate_input(input)
    }

    /// Compute the report for already-parsed input
    pub fn calculate_input(input: FitnessInput) -> Result<Calculation, ApiError> {
        let started = Instant::now();
        let report = calculate(&input).map_err(|err| {
            telemetry::record_calculation_error(&err.field);
            err
        })?;
        telemetry::record_calculation(input.goal, started.elapsed());

        debug!(
            goal = %input.goal,
            activity_level = %input.activity_level,
            bmi = report.bmi,
            daily_calories = report.daily_calories,
            warnings = report.warnings.len(),
            "Calculated fitness report"
        );

        Ok(Calculation { input, report })
    }

    /// Activity levels offered by the calculator, least to most active
    pub fn activity_levels() -> Vec<ActivityLevelInfo> {
        ActivityLevel::ALL
            .iter()
            .copied()
            .map(ActivityLevelInfo::from)
            .collect()
    }

    /// Run the calculator on a fixed input and check the result is usable
    ///
    /// Used by the readiness probe.
    pub fn self_check() -> Result<(), String> {
        let input = FitnessInput {
            weight: 70.0,
            weight_unit: WeightUnit::Kg,
            height: 175.0,
            height_unit: HeightUnit::Cm,
            age_years: 30,
            sex: BiologicalSex::Male,
            activity_level: ActivityLevel::Moderate,
            goal: Goal::Maintain,
        };
        let report = calculate(&input).map_err(|e| e.to_string())?;

        if !report.bmi.is_finite() || report.bmi <= 0.0 || report.daily_calories <= 0 {
            return Err(format!("Calculator produced an unusable report: {:?}", report));
        }
        Ok(())
    }
}
