//! Budget scaling timeline.
//!
//! Plans how a daily ad budget grows from its current level to a target by a
//! fixed percentage every few days. The planner is a bounded geometric
//! simulation over a single budget value:
//!
//! - every step below the target is emitted, then the budget grows by
//!   `1 + increment_percent / 100`;
//! - the first budget at or above the target is emitted as the final step.
//!
//! Budgets are rounded to whole rupees only in the emitted steps. The loop
//! itself multiplies unrounded values so rounding never compounds.
//!
//! # Example
//!
//! ```rust
//! use funnelmap::scaling::compute_scaling_timeline;
//!
//! let timeline = compute_scaling_timeline(5000.0, 30000.0, 20.0, 3, 4).unwrap();
//! assert_eq!(timeline.total_steps, 11);
//! assert_eq!(timeline.steps.last().unwrap().budget, 30959);
//! assert_eq!((timeline.total_days_min, timeline.total_days_max), (30, 40));
//! ```

use serde::Serialize;
use thiserror::Error;

use crate::funnel::FunnelConfiguration;

/// Upper bound on emitted steps. Realistic plans need a few dozen.
pub const MAX_SCALING_STEPS: u32 = 10_000;

/// Inputs the planner cannot turn into a terminating schedule.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScalingError {
    #[error("scaling increment must be a positive percentage (got {0})")]
    NonPositiveIncrement(f64),

    #[error("current daily spend must be positive to scale from (got {0})")]
    NonPositiveStart(f64),

    #[error("target daily spend must be a finite number (got {0})")]
    NonFiniteTarget(f64),

    #[error("reaching the target would take about {estimated} steps (limit {limit})")]
    TooManySteps { estimated: u32, limit: u32 },
}

/// One budget level in the schedule.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScalingStep {
    pub step_index: u32,
    /// Daily budget rounded to whole rupees.
    pub budget: u64,
    /// Unrounded daily budget.
    pub raw_budget: f64,
    /// Earliest day this budget is reached.
    pub cumulative_min_days: u32,
    /// Latest day this budget is reached.
    pub cumulative_max_days: u32,
    pub is_start_step: bool,
    pub is_final_step: bool,
}

/// The complete schedule.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScalingResult {
    pub steps: Vec<ScalingStep>,
    pub total_steps: usize,
    pub total_days_min: u32,
    pub total_days_max: u32,
}

impl ScalingResult {
    pub fn final_step(&self) -> Option<&ScalingStep> {
        self.steps.last()
    }
}

/// Scaling inputs taken together, as stored on a funnel record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScalingPlan {
    pub current_spend: f64,
    pub target_spend: f64,
    pub increment_percent: f64,
    pub min_days: u32,
    pub max_days: u32,
}

impl ScalingPlan {
    pub fn from_config(config: &FunnelConfiguration) -> Self {
        Self {
            current_spend: config.current_daily_spend,
            target_spend: config.target_daily_spend,
            increment_percent: config.scaling_increment_percent,
            min_days: config.scaling_frequency_days_min,
            max_days: config.scaling_frequency_days_max,
        }
    }

    pub fn timeline(&self) -> Result<ScalingResult, ScalingError> {
        compute_scaling_timeline(
            self.current_spend,
            self.target_spend,
            self.increment_percent,
            self.min_days,
            self.max_days,
        )
    }
}

/// Build the budget escalation schedule.
///
/// When `current_spend` already meets `target_spend` the schedule holds a
/// single step at day zero, tagged final and not start.
pub fn compute_scaling_timeline(
    current_spend: f64,
    target_spend: f64,
    increment_percent: f64,
    min_days: u32,
    max_days: u32,
) -> Result<ScalingResult, ScalingError> {
    let growth = growth_factor(increment_percent)?;
    if !(current_spend.is_finite() && current_spend > 0.0) {
        return Err(ScalingError::NonPositiveStart(current_spend));
    }
    if !target_spend.is_finite() {
        return Err(ScalingError::NonFiniteTarget(target_spend));
    }
    if let Some(estimated) = estimated_step_count(current_spend, target_spend, increment_percent)
    {
        if estimated > MAX_SCALING_STEPS {
            return Err(ScalingError::TooManySteps {
                estimated,
                limit: MAX_SCALING_STEPS,
            });
        }
    }

    let mut steps = Vec::new();
    let mut budget = current_spend;
    let mut step_index = 0u32;
    let mut days_min = 0u32;
    let mut days_max = 0u32;

    while budget < target_spend {
        steps.push(ScalingStep {
            step_index,
            budget: round_budget(budget),
            raw_budget: budget,
            cumulative_min_days: days_min,
            cumulative_max_days: days_max,
            is_start_step: step_index == 0,
            is_final_step: false,
        });

        budget *= growth;
        step_index += 1;
        days_min = days_min.saturating_add(min_days);
        days_max = days_max.saturating_add(max_days);
    }

    steps.push(ScalingStep {
        step_index,
        budget: round_budget(budget),
        raw_budget: budget,
        cumulative_min_days: days_min,
        cumulative_max_days: days_max,
        is_start_step: false,
        is_final_step: true,
    });

    log::debug!(
        "Scaling {} -> {} at {}%: {} steps over {}-{} days",
        current_spend,
        target_spend,
        increment_percent,
        steps.len(),
        days_min,
        days_max
    );

    Ok(ScalingResult {
        total_steps: steps.len(),
        total_days_min: days_min,
        total_days_max: days_max,
        steps,
    })
}

/// Closed-form number of growth steps needed to reach the target.
///
/// Returns `ceil(ln(target / current) / ln(1 + increment / 100))`, `Some(0)`
/// when the target is already met, and `None` for inputs the planner rejects.
/// The emitted schedule has one more step than this, give or take one for
/// floating-point ties at the boundary.
pub fn estimated_step_count(
    current_spend: f64,
    target_spend: f64,
    increment_percent: f64,
) -> Option<u32> {
    let growth = growth_factor(increment_percent).ok()?;
    if !(current_spend.is_finite() && current_spend > 0.0 && target_spend.is_finite()) {
        return None;
    }
    if current_spend >= target_spend {
        return Some(0);
    }

    let steps = ((target_spend / current_spend).ln() / growth.ln()).ceil();
    Some(if steps >= u32::MAX as f64 {
        u32::MAX
    } else {
        steps as u32
    })
}

fn growth_factor(increment_percent: f64) -> Result<f64, ScalingError> {
    let growth = 1.0 + increment_percent / 100.0;
    // Increments too small to change the budget never terminate either.
    if increment_percent.is_finite() && increment_percent > 0.0 && growth > 1.0 {
        Ok(growth)
    } else {
        Err(ScalingError::NonPositiveIncrement(increment_percent))
    }
}

fn round_budget(budget: f64) -> u64 {
    budget.round().max(0.0) as u64
}
