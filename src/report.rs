//! The bundle handed to output writers.
//!
//! Writers format what is in here and never recompute revenue or volumes, so
//! every renderer shows the engine's numbers.

use serde::Serialize;

use crate::funnel::{stage_labels, FunnelConfiguration, FunnelType, StageLabel};
use crate::metrics::MetricsResult;
use crate::scaling::ScalingResult;

/// Display context for the funnel a report describes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunnelSummary {
    pub funnel_type: FunnelType,
    pub name: String,
    pub description: String,
    pub client_name: Option<String>,
    pub business_name: Option<String>,
    /// Stage 1, enabled middle stages, then the sale. Lines up with
    /// `MetricsResult::volumes`.
    pub stages: Vec<StageLabel>,
    pub current_cpa: f64,
    pub at_scale_cpa: Option<f64>,
    pub kill_range_cpa: f64,
    pub target_roi: f64,
}

impl FunnelSummary {
    pub fn from_config(config: &FunnelConfiguration) -> Self {
        Self {
            funnel_type: config.funnel_type,
            name: config.funnel_type.display_name().to_string(),
            description: config.funnel_type.description().to_string(),
            client_name: config.client_name.clone(),
            business_name: config.business_name.clone(),
            stages: stage_labels(config),
            current_cpa: config.current_cpa_stage1,
            at_scale_cpa: config.at_scale_cpa(),
            kill_range_cpa: config.cpa_stage1_kill_range,
            target_roi: config.target_roi,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FunnelReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub funnel: Option<FunnelSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<MetricsResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scaling: Option<ScalingResult>,
}

impl FunnelReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_funnel(mut self, config: &FunnelConfiguration) -> Self {
        self.funnel = Some(FunnelSummary::from_config(config));
        self
    }

    pub fn with_metrics(mut self, metrics: MetricsResult) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn with_scaling(mut self, scaling: ScalingResult) -> Self {
        self.scaling = Some(scaling);
        self
    }
}
