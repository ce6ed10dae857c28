use anyhow::{Context, Result};
use std::path::Path;

use crate::cli::OutputArgs;
use crate::config::load_validated_configuration;
use crate::funnel::FunnelConfiguration;
use crate::metrics::compute_metrics;
use crate::report::FunnelReport;

use super::emit_report;

/// Pure core: the metrics report for a configuration.
pub fn build_metrics_report(config: &FunnelConfiguration) -> FunnelReport {
    FunnelReport::new()
        .with_funnel(config)
        .with_metrics(compute_metrics(config))
}

pub fn handle_metrics(config_path: &Path, output: &OutputArgs) -> Result<()> {
    let config = load_validated_configuration(config_path)
        .with_context(|| format!("Cannot compute metrics for {}", config_path.display()))?;
    emit_report(&build_metrics_report(&config), output)
}
