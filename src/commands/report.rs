use anyhow::{Context, Result};
use std::path::Path;

use crate::cli::OutputArgs;
use crate::config::load_validated_configuration;
use crate::funnel::FunnelConfiguration;
use crate::metrics::compute_metrics;
use crate::report::FunnelReport;
use crate::scaling::ScalingPlan;

use super::emit_report;

/// Pure core: metrics plus the scaling timeline stored on the record.
pub fn build_full_report(config: &FunnelConfiguration) -> Result<FunnelReport> {
    let timeline = ScalingPlan::from_config(config)
        .timeline()
        .context("Cannot plan scaling from this configuration")?;

    Ok(FunnelReport::new()
        .with_funnel(config)
        .with_metrics(compute_metrics(config))
        .with_scaling(timeline))
}

pub fn handle_report(config_path: &Path, output: &OutputArgs) -> Result<()> {
    let config = load_validated_configuration(config_path)
        .with_context(|| format!("Cannot build report for {}", config_path.display()))?;
    emit_report(&build_full_report(&config)?, output)
}
