//! Input validation functions
//!
//! Precondition checks for calculator input. Each check returns a plain
//! message; callers attach the field name.

use crate::errors::InvalidInputError;

/// Validate a measurement that must be a finite number above zero
pub fn validate_positive_measurement(value: f64) -> Result<(), String> {
    if value.is_nan() || value.is_infinite() {
        return Err("must be a valid number".to_string());
    }
    if value <= 0.0 {
        return Err("must be greater than 0".to_string());
    }
    Ok(())
}

/// Validate weight in the unit it was entered in
pub fn validate_weight(weight: f64) -> Result<(), String> {
    validate_positive_measurement(weight)
}

/// Validate height in the unit it was entered in
pub fn validate_height(height: f64) -> Result<(), String> {
    validate_positive_measurement(height)
}

/// Validate age in whole years
pub fn validate_age(age_years: i32) -> Result<(), String> {
    if age_years <= 0 {
        return Err("must be at least 1 year".to_string());
    }
    Ok(())
}

/// Run a check and tag its failure with the field name
pub fn check_field<F>(field: &str, check: F) -> Result<(), InvalidInputError>
where
    F: FnOnce() -> Result<(), String>,
{
    check().map_err(|message| InvalidInputError::new(field, message))
}

// ============================================================================
// User-Friendly Field Labels
// ============================================================================

/// Map technical field names to user-friendly display labels
pub fn get_field_display_label(field_name: &str) -> &str {
    match field_name {
        "weight" => "Weight",
        "weight_unit" => "Weight Unit",
        "height" => "Height",
        "height_unit" => "Height Unit",
        "age" => "Age",
        "sex" => "Sex",
        "activity_level" => "Activity Level",
        "goal" => "Goal",
        _ => field_name,
    }
}

impl InvalidInputError {
    /// Format as user-friendly error message
    pub fn user_message(&self) -> String {
        format!("{}: {}", get_field_display_label(&self.field), self.message)
    }
}
