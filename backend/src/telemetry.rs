//! Prometheus metrics recorder and counters
//!
//! Counter names are kept here so handlers and dashboards agree on them.

use anyhow::Result;
use gymfit_shared::Goal;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::time::Duration;

pub const CALCULATIONS_TOTAL: &str = "gymfit_calculations_total";
pub const CALCULATION_ERRORS_TOTAL: &str = "gymfit_calculation_errors_total";
pub const CALCULATION_DURATION_SECONDS: &str = "gymfit_calculation_duration_seconds";
pub const EXPORTS_TOTAL: &str = "gymfit_exports_total";

/// Install the global Prometheus recorder
///
/// Must be called at most once per process.
pub fn install_recorder() -> Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new().install_recorder()?;
    Ok(handle)
}

pub fn record_calculation(goal: Goal, elapsed: Duration) {
    metrics::counter!(CALCULATIONS_TOTAL, "goal" => goal.as_str()).increment(1);
    metrics::histogram!(CALCULATION_DURATION_SECONDS).record(elapsed.as_secs_f64());
}

pub fn record_calculation_error(field: &str) {
    metrics::counter!(CALCULATION_ERRORS_TOTAL, "field" => field.to_string()).increment(1);
}

pub fn record_export(format: &'static str) {
    metrics::counter!(EXPORTS_TOTAL, "format" => format).increment(1);
}
