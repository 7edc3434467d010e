//! API request and response types

use crate::errors::InvalidInputError;
use crate::health_metrics::{ActivityLevel, BiologicalSex, FitnessInput, Goal};
use crate::units::{HeightUnit, WeightUnit};
use serde::{Deserialize, Serialize};

/// API error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

// ============================================================================
// Calculator Types
// ============================================================================

/// Calculator form submission
///
/// Enum-valued fields arrive as strings so unknown values can be reported
/// against the field that carried them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculateRequest {
    /// Weight in `weight_unit` (defaults to kg)
    pub weight: f64,
    #[serde(default)]
    pub weight_unit: Option<String>,
    /// Height in `height_unit` (defaults to cm)
    pub height: f64,
    #[serde(default)]
    pub height_unit: Option<String>,
    pub age: i32,
    pub sex: String,
    pub activity_level: String,
    pub goal: String,
}

fn parse_field<T>(field: &str, value: &str) -> Result<T, InvalidInputError>
where
    T: std::str::FromStr<Err = String>,
{
    value
        .parse()
        .map_err(|message: String| InvalidInputError::new(field, message))
}

impl TryFrom<CalculateRequest> for FitnessInput {
    type Error = InvalidInputError;

    fn try_from(req: CalculateRequest) -> Result<Self, Self::Error> {
        let weight_unit = match req.weight_unit.as_deref() {
            Some(unit) => parse_field::<WeightUnit>("weight_unit", unit)?,
            None => WeightUnit::default(),
        };
        let height_unit = match req.height_unit.as_deref() {
            Some(unit) => parse_field::<HeightUnit>("height_unit", unit)?,
            None => HeightUnit::default(),
        };

        let input = FitnessInput {
            weight: req.weight,
            weight_unit,
            height: req.height,
            height_unit,
            age_years: req.age,
            sex: parse_field::<BiologicalSex>("sex", &req.sex)?,
            activity_level: parse_field::<ActivityLevel>("activity_level", &req.activity_level)?,
            goal: parse_field::<Goal>("goal", &req.goal)?,
        };
        input.validate()?;
        Ok(input)
    }
}

/// One entry of the activity level picker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityLevelInfo {
    pub level: ActivityLevel,
    pub multiplier: f64,
    pub description: String,
}

impl From<ActivityLevel> for ActivityLevelInfo {
    fn from(level: ActivityLevel) -> Self {
        Self {
            level,
            multiplier: level.multiplier(),
            description: level.description().to_string(),
        }
    }
}

/// Activity levels response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityLevelsResponse {
    pub levels: Vec<ActivityLevelInfo>,
}
