//! Business logic services
//!
//! Services wrap the pure calculator with validation, logging and
//! export formatting.

pub mod calculator;
pub mod export;

pub use calculator::{Calculation, CalculatorService};
pub use export::ExportService;
