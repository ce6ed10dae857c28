//! Funnel metrics engine.
//!
//! Pure functions from a [`FunnelConfiguration`](crate::funnel::FunnelConfiguration)
//! to a [`MetricsResult`]: conversion chain, cumulative rates, per-stage CPA
//! under three budget scenarios, projected monthly volumes, revenue, ROI and
//! break-even cost per result.
//!
//! The engine never validates its input. Zero CPAs or zero rates produce
//! infinite or NaN values that flow through to the result, so callers can
//! detect them and render them as such.

mod chain;
mod engine;
mod revenue;

pub use chain::{build_conversion_chain, cumulative_rates, per_stage_cpa, project_volumes};
pub use engine::{compute_metrics, MetricsResult, DAYS_PER_MONTH};
pub use revenue::{revenue_breakdown, RevenueLine};
