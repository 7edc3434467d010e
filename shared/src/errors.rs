//! Error types for the GymFit calculator

use thiserror::Error;

/// Input rejected before any calculation ran
///
/// Names the first offending field so callers can point the user at it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid input for {field}: {message}")]
pub struct InvalidInputError {
    pub field: String,
    pub message: String,
}

impl InvalidInputError {
    pub fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}
