//! Validation with error accumulation for funnel records.
//!
//! Uses stillwater's `Validation` so every problem in a record is reported in
//! one pass, the way a form highlights all invalid fields at once.
//!
//! # Example
//!
//! ```rust
//! use funnelmap::config::validate_configuration;
//! use funnelmap::funnel::{sample_for, FunnelType};
//! use stillwater::Validation;
//!
//! let config = sample_for(FunnelType::Webinar);
//! assert!(matches!(validate_configuration(&config), Validation::Success(())));
//! ```

use serde::Serialize;
use std::fmt;
use stillwater::{NonEmptyVec, Validation};

use crate::errors::{Error, Result};
use crate::funnel::FunnelConfiguration;
use crate::scaling::{ScalingError, ScalingPlan};

/// Validation result carrying every issue found.
pub type ConfigValidation<T> = Validation<T, NonEmptyVec<ConfigIssue>>;

/// One problem with one field of a record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ConfigIssue {
    pub field: String,
    pub message: String,
    pub expected: Option<String>,
    pub actual: Option<String>,
}

impl ConfigIssue {
    pub fn for_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            expected: None,
            actual: None,
        }
    }

    /// Add expected and actual context to the issue.
    pub fn with_context(mut self, expected: impl Into<String>, actual: impl Into<String>) -> Self {
        self.expected = Some(expected.into());
        self.actual = Some(actual.into());
        self
    }
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)?;
        match (&self.expected, &self.actual) {
            (Some(expected), Some(actual)) => write!(f, " (expected: {expected}, got: {actual})"),
            _ => Ok(()),
        }
    }
}

/// Validate a whole record, accumulating ALL issues.
pub fn validate_configuration(config: &FunnelConfiguration) -> ConfigValidation<()> {
    let issues: Vec<ConfigIssue> = [
        rate_issues(config),
        cpa_issues(config),
        price_issues(config),
        budget_issues(config),
        scaling_issues(config),
        stage_issues(config),
    ]
    .into_iter()
    .flatten()
    .collect();

    match NonEmptyVec::from_vec(issues) {
        Some(issues) => Validation::Failure(issues),
        None => Validation::Success(()),
    }
}

/// Validate with a fail-fast `Result` API.
pub fn validate_configuration_result(config: &FunnelConfiguration) -> Result<()> {
    match validate_configuration(config) {
        Validation::Success(()) => Ok(()),
        Validation::Failure(issues) => Err(Error::Validation(issues.into_vec())),
    }
}

fn rate_issues(config: &FunnelConfiguration) -> Vec<ConfigIssue> {
    let mandatory = [
        ("stage2_conversion_rate", config.stage2_conversion_rate),
        (
            "high_ticket_conversion_rate",
            config.high_ticket_conversion_rate,
        ),
    ];
    let optional = [
        ("stage3_conversion_rate", config.stage3_conversion_rate),
        ("stage4_conversion_rate", config.stage4_conversion_rate),
        (
            "landing_page_conversion_rate",
            config.landing_page_conversion_rate,
        ),
    ];

    let mandatory_issues = mandatory.into_iter().filter_map(|(field, rate)| {
        check_percentage(field, rate).or_else(|| {
            (rate == 0.0).then(|| {
                ConfigIssue::for_field(
                    field,
                    "must be greater than zero; every downstream volume would be zero",
                )
            })
        })
    });
    let optional_issues = optional
        .into_iter()
        .filter_map(|(field, rate)| rate.and_then(|rate| check_percentage(field, rate)));

    mandatory_issues.chain(optional_issues).collect()
}

fn cpa_issues(config: &FunnelConfiguration) -> Vec<ConfigIssue> {
    [
        check_positive("current_cpa_stage1", config.current_cpa_stage1),
        check_positive("cpa_stage1_kill_range", config.cpa_stage1_kill_range),
        config
            .cpa_stage1_at_scale
            .and_then(|cpa| check_non_negative("cpa_stage1_at_scale", cpa)),
    ]
    .into_iter()
    .flatten()
    .collect()
}

fn price_issues(config: &FunnelConfiguration) -> Vec<ConfigIssue> {
    [
        ("stage1_price", config.stage1_price),
        ("stage2_price", config.stage2_price),
        ("stage3_price", config.stage3_price),
        ("high_ticket_price", Some(config.high_ticket_price)),
    ]
    .into_iter()
    .filter_map(|(field, price)| price.and_then(|price| check_non_negative(field, price)))
    .collect()
}

fn budget_issues(config: &FunnelConfiguration) -> Vec<ConfigIssue> {
    [
        check_positive("current_daily_spend", config.current_daily_spend),
        check_positive("target_daily_spend", config.target_daily_spend),
        check_non_negative("target_roi", config.target_roi),
    ]
    .into_iter()
    .flatten()
    .collect()
}

fn scaling_issues(config: &FunnelConfiguration) -> Vec<ConfigIssue> {
    let mut issues = Vec::new();

    let increment = config.scaling_increment_percent;
    if !(increment.is_finite() && increment > 0.0 && increment <= 100.0) {
        issues.push(
            ConfigIssue::for_field("scaling_increment_percent", "must be above 0 and at most 100")
                .with_context("0 < value <= 100", increment.to_string()),
        );
    }

    let (min_days, max_days) = (
        config.scaling_frequency_days_min,
        config.scaling_frequency_days_max,
    );
    if min_days < 1 {
        issues.push(
            ConfigIssue::for_field("scaling_frequency_days_min", "must be at least 1 day")
                .with_context(">= 1", min_days.to_string()),
        );
    }
    if max_days < min_days.max(1) {
        issues.push(
            ConfigIssue::for_field(
                "scaling_frequency_days_max",
                "must be at least the minimum days between scaling steps",
            )
            .with_context(format!(">= {}", min_days.max(1)), max_days.to_string()),
        );
    }

    if issues.is_empty() {
        issues.extend(planner_issue(config));
    }

    issues
}

/// Whatever the scaling planner would still reject once each field is in
/// range, such as an increment too small to reach the target.
fn planner_issue(config: &FunnelConfiguration) -> Option<ConfigIssue> {
    let spends_in_range = [config.current_daily_spend, config.target_daily_spend]
        .iter()
        .all(|spend| spend.is_finite() && *spend > 0.0);
    if !spends_in_range {
        return None;
    }

    ScalingPlan::from_config(config).timeline().err().map(|error| {
        let field = match error {
            ScalingError::NonPositiveStart(_) => "current_daily_spend",
            ScalingError::NonFiniteTarget(_) => "target_daily_spend",
            ScalingError::NonPositiveIncrement(_) | ScalingError::TooManySteps { .. } => {
                "scaling_increment_percent"
            }
        };
        ConfigIssue::for_field(field, error.to_string())
    })
}

fn stage_issues(config: &FunnelConfiguration) -> Vec<ConfigIssue> {
    let missing_rate = |rate: Option<f64>| rate.map_or(true, |r| r == 0.0 || r.is_nan());

    let mut issues = Vec::new();
    if config.stage3_enabled && missing_rate(config.stage3_conversion_rate) {
        issues.push(ConfigIssue::for_field(
            "stage3_conversion_rate",
            "stage 3 is enabled but has no conversion rate; it would be left out of the funnel",
        ));
    }
    if config.stage4_enabled && missing_rate(config.stage4_conversion_rate) {
        issues.push(ConfigIssue::for_field(
            "stage4_conversion_rate",
            "stage 4 is enabled but has no conversion rate; it would be left out of the funnel",
        ));
    }
    issues
}

fn check_percentage(field: &str, rate: f64) -> Option<ConfigIssue> {
    (!(rate.is_finite() && (0.0..=100.0).contains(&rate))).then(|| {
        ConfigIssue::for_field(field, "must be a percentage between 0 and 100")
            .with_context("0-100", rate.to_string())
    })
}

fn check_positive(field: &str, value: f64) -> Option<ConfigIssue> {
    (!(value.is_finite() && value > 0.0)).then(|| {
        ConfigIssue::for_field(field, "must be greater than zero")
            .with_context("> 0", value.to_string())
    })
}

fn check_non_negative(field: &str, value: f64) -> Option<ConfigIssue> {
    (!(value.is_finite() && value >= 0.0)).then(|| {
        ConfigIssue::for_field(field, "must not be negative").with_context(">= 0", value.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::funnel::{defaults_for, sample_for, FunnelType};

    fn issues(config: &FunnelConfiguration) -> Vec<ConfigIssue> {
        match validate_configuration(config) {
            Validation::Success(()) => Vec::new(),
            Validation::Failure(issues) => issues.into_vec(),
        }
    }

    fn fields(config: &FunnelConfiguration) -> Vec<String> {
        issues(config).into_iter().map(|issue| issue.field).collect()
    }

    #[test]
    fn test_samples_are_valid() {
        for funnel_type in FunnelType::ALL {
            let config = sample_for(funnel_type);
            assert!(
                issues(&config).is_empty(),
                "{funnel_type} sample should validate: {:?}",
                issues(&config)
            );
            assert!(validate_configuration_result(&config).is_ok());
        }
    }

    #[test]
    fn test_defaults_need_budget_and_cpa() {
        let fields = fields(&defaults_for(FunnelType::Webinar));
        assert_eq!(
            fields,
            vec![
                "current_cpa_stage1",
                "cpa_stage1_kill_range",
                "current_daily_spend",
                "target_daily_spend"
            ]
        );
    }

    #[test]
    fn test_accumulates_all_issues() {
        let mut config = sample_for(FunnelType::WebinarToCall);
        config.stage2_conversion_rate = 140.0;
        config.stage4_conversion_rate = Some(-5.0);
        config.cpa_stage1_kill_range = 0.0;
        config.stage3_price = Some(-1.0);
        config.scaling_increment_percent = 0.0;

        let fields = fields(&config);
        assert_eq!(
            fields,
            vec![
                "stage2_conversion_rate",
                "stage4_conversion_rate",
                "cpa_stage1_kill_range",
                "stage3_price",
                "scaling_increment_percent",
            ]
        );
    }

    #[test]
    fn test_zero_mandatory_rate_is_reported() {
        let mut config = sample_for(FunnelType::Webinar);
        config.high_ticket_conversion_rate = 0.0;

        let found = issues(&config);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].field, "high_ticket_conversion_rate");
        assert!(found[0].message.contains("greater than zero"));
    }

    #[test]
    fn test_enabled_stage_without_rate_is_reported() {
        let mut config = sample_for(FunnelType::WebinarToCall);
        config.stage3_conversion_rate = None;

        assert_eq!(fields(&config), vec!["stage3_conversion_rate"]);
    }

    #[test]
    fn test_disabled_stage_without_rate_is_fine() {
        let mut config = sample_for(FunnelType::WebinarToCall);
        config.stage4_enabled = false;
        config.stage4_conversion_rate = None;

        assert!(issues(&config).is_empty());
    }

    #[test]
    fn test_scaling_day_bounds() {
        let mut config = sample_for(FunnelType::Webinar);
        config.scaling_frequency_days_min = 0;
        config.scaling_frequency_days_max = 0;

        assert_eq!(
            fields(&config),
            vec!["scaling_frequency_days_min", "scaling_frequency_days_max"]
        );

        config.scaling_frequency_days_min = 5;
        config.scaling_frequency_days_max = 4;
        assert_eq!(fields(&config), vec!["scaling_frequency_days_max"]);
    }

    #[test]
    fn test_zero_current_spend_is_reported() {
        let mut config = sample_for(FunnelType::Webinar);
        config.current_daily_spend = 0.0;

        let found = issues(&config);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].field, "current_daily_spend");
        assert!(found[0].message.contains("greater than zero"));
    }

    #[test]
    fn test_increment_too_small_to_reach_target_is_reported() {
        let mut config = sample_for(FunnelType::Webinar);
        config.scaling_increment_percent = 0.0001;

        let found = issues(&config);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].field, "scaling_increment_percent");
        assert!(found[0].message.contains("limit 10000"));
    }

    #[test]
    fn test_valid_records_can_always_be_planned() {
        for funnel_type in FunnelType::ALL {
            let config = sample_for(funnel_type);
            assert!(issues(&config).is_empty());
            assert!(ScalingPlan::from_config(&config).timeline().is_ok());
        }
    }

    #[test]
    fn test_non_finite_values_are_reported() {
        let mut config = sample_for(FunnelType::Webinar);
        config.current_cpa_stage1 = f64::NAN;
        config.high_ticket_price = f64::INFINITY;

        assert_eq!(fields(&config), vec!["current_cpa_stage1", "high_ticket_price"]);
    }

    #[test]
    fn test_issue_display_includes_context() {
        let issue = ConfigIssue::for_field("stage2_conversion_rate", "must be a percentage")
            .with_context("0-100", "140");
        assert_eq!(
            issue.to_string(),
            "stage2_conversion_rate: must be a percentage (expected: 0-100, got: 140)"
        );
    }

    #[test]
    fn test_result_api_collects_into_error() {
        let mut config = sample_for(FunnelType::Webinar);
        config.target_daily_spend = -1.0;
        config.current_daily_spend = -1.0;

        match validate_configuration_result(&config) {
            Err(Error::Validation(issues)) => assert_eq!(issues.len(), 2),
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
