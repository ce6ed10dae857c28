use serde::Serialize;

use super::chain::{build_conversion_chain, cumulative_rates, per_stage_cpa, project_volumes};
use super::revenue::{revenue_breakdown, RevenueLine};
use crate::funnel::{FunnelConfiguration, StageId};

/// Fixed month length used for spend projections.
pub const DAYS_PER_MONTH: f64 = 30.0;

/// Everything the engine derives from a funnel configuration.
///
/// All series are indexed by enabled-stage order, not by fixed stage number:
/// when stage 3 is disabled, stage 4 moves into its slot. Values are
/// unrounded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsResult {
    /// Stage-to-stage conversion fractions, stage 2 through the sale.
    pub conversion_chain: Vec<f64>,
    pub cumulative_rates: Vec<f64>,
    /// End-to-end conversion from a stage-1 result to a closed sale.
    pub total_conversion: f64,

    pub cpas_at_current: Vec<f64>,
    /// `None` when no at-scale CPA was supplied.
    pub cpas_at_scale: Option<Vec<f64>>,
    pub cpas_at_kill_range: Vec<f64>,

    pub cost_per_customer_current: f64,
    pub cost_per_customer_at_scale: Option<f64>,
    pub cost_per_customer_kill: f64,

    /// Projected monthly volume: stage 1, then one entry per chain position.
    pub volumes: Vec<f64>,
    pub high_ticket_sales: f64,

    pub revenue_breakdown: Vec<RevenueLine>,
    pub total_revenue: f64,
    pub monthly_ad_spend: f64,
    pub roi: f64,

    /// Highest stage-1 CPA at which high-ticket revenue alone covers spend.
    pub break_even_cpr: f64,
}

impl MetricsResult {
    /// Projected monthly stage-1 results.
    pub fn stage1_volume(&self) -> f64 {
        self.volumes.first().copied().unwrap_or(0.0)
    }

    pub fn meets_target_roi(&self, target_roi: f64) -> bool {
        self.roi >= target_roi
    }
}

/// Compute funnel metrics for a configuration.
///
/// Volumes and revenue are always projected at the kill-range CPA, using the
/// target daily spend over a 30-day month.
///
/// # Example
///
/// ```rust
/// use funnelmap::funnel::{sample_for, FunnelType};
/// use funnelmap::metrics::compute_metrics;
///
/// let config = sample_for(FunnelType::WebinarToCall);
/// let metrics = compute_metrics(&config);
///
/// assert_eq!(metrics.monthly_ad_spend, 1_500_000.0);
/// assert_eq!(metrics.stage1_volume(), 750.0);
/// ```
pub fn compute_metrics(config: &FunnelConfiguration) -> MetricsResult {
    let stages = config.enabled_stages();
    let conversion_chain = build_conversion_chain(&stages, config.high_ticket_conversion_rate);
    let cumulative_rates = cumulative_rates(&conversion_chain);
    // The chain always ends with the high-ticket rate, so it is never empty.
    let total_conversion = cumulative_rates.last().copied().unwrap_or(1.0);

    let current_cpa = config.current_cpa_stage1;
    let at_scale_cpa = config.at_scale_cpa();
    let kill_cpa = config.cpa_stage1_kill_range;

    let monthly_ad_spend = config.target_daily_spend * DAYS_PER_MONTH;
    let stage1_volume = monthly_ad_spend / kill_cpa;
    let volumes = project_volumes(stage1_volume, &conversion_chain);
    let high_ticket_sales = volumes.last().copied().unwrap_or(stage1_volume);

    let revenue_breakdown = revenue_breakdown(config, &volumes);
    let total_revenue = total_revenue(&revenue_breakdown);

    log::debug!(
        "Computed {} funnel metrics: {} chain positions, total conversion {:.6}, ROI {:.3}",
        config.funnel_type,
        conversion_chain.len(),
        total_conversion,
        total_revenue / monthly_ad_spend
    );

    MetricsResult {
        cpas_at_current: per_stage_cpa(current_cpa, &cumulative_rates),
        cpas_at_scale: at_scale_cpa.map(|cpa| per_stage_cpa(cpa, &cumulative_rates)),
        cpas_at_kill_range: per_stage_cpa(kill_cpa, &cumulative_rates),
        cost_per_customer_current: current_cpa / total_conversion,
        cost_per_customer_at_scale: at_scale_cpa.map(|cpa| cpa / total_conversion),
        cost_per_customer_kill: kill_cpa / total_conversion,
        volumes,
        high_ticket_sales,
        revenue_breakdown,
        total_revenue,
        monthly_ad_spend,
        roi: total_revenue / monthly_ad_spend,
        break_even_cpr: config.high_ticket_price * total_conversion,
        conversion_chain,
        cumulative_rates,
        total_conversion,
    }
}

/// High-ticket revenue first, then priced stages in funnel order.
fn total_revenue(lines: &[RevenueLine]) -> f64 {
    let high_ticket = lines
        .iter()
        .filter(|line| line.stage == StageId::HighTicket)
        .map(|line| line.revenue);
    let priced = lines
        .iter()
        .filter(|line| line.stage != StageId::HighTicket)
        .map(|line| line.revenue);

    high_ticket.chain(priced).fold(0.0, |total, revenue| total + revenue)
}
