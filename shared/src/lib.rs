//! GymFit Shared Library
//!
//! This crate contains the fitness calculator and the types shared by
//! the backend and WASM modules.

pub mod errors;
pub mod health_metrics;
pub mod types;
pub mod units;
pub mod validation;

// Re-export commonly used items
pub use errors::*;
pub use health_metrics::*;
pub use types::*;
pub use units::*;
