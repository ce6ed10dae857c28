// Export modules for library usage
pub mod cli;
pub mod commands;
pub mod config;
pub mod errors;
pub mod formatting;
pub mod funnel;
pub mod io;
pub mod metrics;
pub mod report;
pub mod scaling;

// Re-export commonly used types
pub use crate::errors::{Error, Result};

pub use crate::funnel::{
    defaults_for, sample_for, stage_labels, EnabledStage, FunnelConfiguration, FunnelType,
    StageId, StageLabel,
};

pub use crate::metrics::{compute_metrics, MetricsResult, RevenueLine};

pub use crate::scaling::{
    compute_scaling_timeline, estimated_step_count, ScalingError, ScalingPlan, ScalingResult,
    ScalingStep,
};

pub use crate::config::{
    load_configuration, load_validated_configuration, validate_configuration, ConfigIssue,
};

pub use crate::formatting::{format_currency, format_indian_number, format_percent};

pub use crate::report::{FunnelReport, FunnelSummary};
