use anyhow::{bail, Result};

use crate::cli::OutputArgs;
use crate::report::FunnelReport;
use crate::scaling::ScalingPlan;

use super::emit_report;

/// Pure core: the scaling-only report for a plan.
pub fn build_scaling_report(plan: &ScalingPlan) -> Result<FunnelReport> {
    if plan.max_days < plan.min_days {
        bail!(
            "--max-days ({}) must be at least --min-days ({})",
            plan.max_days,
            plan.min_days
        );
    }
    Ok(FunnelReport::new().with_scaling(plan.timeline()?))
}

pub fn handle_scale(plan: ScalingPlan, output: &OutputArgs) -> Result<()> {
    emit_report(&build_scaling_report(&plan)?, output)
}
