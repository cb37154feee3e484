//! Prometheus metrics
//!
//! The recorder is installed once at startup; `/metrics` renders through the
//! handle kept in `AppState`. Without a recorder the macros are no-ops, so
//! tests never need one.

use anyhow::{anyhow, Result};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

pub const LOOKUPS_TOTAL: &str = "ml_fitness_nutrition_lookups_total";

pub fn install_recorder() -> Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| anyhow!("Failed to install Prometheus recorder: {}", e))?;
    LookupMetrics::register();
    Ok(handle)
}

/// Counters for external nutrition lookups
pub struct LookupMetrics;

impl LookupMetrics {
    /// Count one provider attempt; `outcome` is hit, miss, error or skipped
    pub fn record(provider: &'static str, outcome: &'static str) {
        metrics::counter!(LOOKUPS_TOTAL, "provider" => provider, "outcome" => outcome).increment(1);
    }

    fn register() {
        metrics::describe_counter!(
            LOOKUPS_TOTAL,
            "External nutrition lookups by provider and outcome"
        );
    }
}
