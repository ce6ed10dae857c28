use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::stages::{EnabledStage, StageId};

/// Funnel layouts supported by the planner.
///
/// The variant decides which stages are meaningful and how they are labelled.
/// It never changes the arithmetic, which works over whatever stages are
/// enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FunnelType {
    /// Registration → Attendance → Sale
    Webinar,
    /// Registration → Attendance → Call → Sale
    WebinarToCall,
    /// Opt-in → Call Booking → Sale
    DirectCall,
}

impl FunnelType {
    pub const ALL: [FunnelType; 3] = [
        FunnelType::Webinar,
        FunnelType::WebinarToCall,
        FunnelType::DirectCall,
    ];

    /// Identifier used in configuration records.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Webinar => "webinar",
            Self::WebinarToCall => "webinar_to_call",
            Self::DirectCall => "direct_call",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Webinar => "Webinar Funnel",
            Self::WebinarToCall => "Webinar-to-Call Funnel",
            Self::DirectCall => "Direct Call Funnel",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Webinar => "Registration → Attendance → Sale",
            Self::WebinarToCall => "Registration → Attendance → Call → Sale",
            Self::DirectCall => "Opt-in → Call Booking → Sale",
        }
    }

    pub fn use_case(&self) -> &'static str {
        match self {
            Self::Webinar => "Best for: Course launches, group programs, direct webinar sales",
            Self::WebinarToCall => "Best for: High-ticket with consultation, coaching programs",
            Self::DirectCall => "Best for: Strategy calls, applications, lead magnets",
        }
    }
}

impl fmt::Display for FunnelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown funnel type '{0}' (expected webinar, webinar_to_call or direct_call)")]
pub struct ParseFunnelTypeError(pub String);

impl FromStr for FunnelType {
    type Err = ParseFunnelTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "webinar" => Ok(Self::Webinar),
            "webinar_to_call" => Ok(Self::WebinarToCall),
            "direct_call" => Ok(Self::DirectCall),
            _ => Err(ParseFunnelTypeError(s.to_string())),
        }
    }
}

/// A funnel configuration record.
///
/// Field names match the keys of the records saved by the funnel form, so an
/// exported JSON record deserializes unchanged. Keys this crate does not use
/// (campaign layers, tooling notes) are ignored.
///
/// Conversion rates are percentages in `[0, 100]`. Prices and CPAs are in
/// rupees.
///
/// # Example
///
/// ```toml
/// funnel_type = "webinar"
/// current_cpa_stage1 = 800.0
/// cpa_stage1_kill_range = 1500.0
/// stage1_price = 199.0
/// stage2_conversion_rate = 65.0
/// high_ticket_price = 50000.0
/// high_ticket_conversion_rate = 25.0
/// current_daily_spend = 5000.0
/// target_daily_spend = 30000.0
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunnelConfiguration {
    pub funnel_type: FunnelType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_name: Option<String>,

    // Stage 1 (entry)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stage1_name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub stage1_is_paid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stage1_price: Option<f64>,
    /// Display only, never used in the arithmetic.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub landing_page_conversion_rate: Option<f64>,
    pub current_cpa_stage1: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpa_stage1_at_scale: Option<f64>,
    pub cpa_stage1_kill_range: f64,

    // Stage 2 (always present)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stage2_name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub stage2_is_paid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stage2_price: Option<f64>,
    pub stage2_conversion_rate: f64,

    // Stage 3 (optional)
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub stage3_enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stage3_name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub stage3_is_paid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stage3_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stage3_conversion_rate: Option<f64>,

    // Stage 4 (optional, never priced)
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub stage4_enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stage4_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stage4_conversion_rate: Option<f64>,

    // Final stage
    pub high_ticket_price: f64,
    pub high_ticket_conversion_rate: f64,

    // Budget
    pub current_daily_spend: f64,
    pub target_daily_spend: f64,

    // Scaling
    #[serde(default = "default_increment_percent")]
    pub scaling_increment_percent: f64,
    #[serde(default = "default_min_days")]
    pub scaling_frequency_days_min: u32,
    #[serde(default = "default_max_days")]
    pub scaling_frequency_days_max: u32,

    #[serde(default = "default_target_roi")]
    pub target_roi: f64,
}

impl FunnelConfiguration {
    /// Ordered middle stages that take part in the conversion chain.
    ///
    /// Stage 2 is always first. Stage 3 and stage 4 follow only when enabled
    /// and carrying a non-zero rate; a missing rate drops the stage instead of
    /// inserting a zero multiplier. The high-ticket rate is not part of this
    /// list.
    pub fn enabled_stages(&self) -> Vec<EnabledStage> {
        let mut stages = vec![EnabledStage::from_percent(
            StageId::Stage2,
            self.stage2_conversion_rate,
            self.stage2_price,
        )];

        stages.extend(optional_stage(
            StageId::Stage3,
            self.stage3_enabled,
            self.stage3_conversion_rate,
            self.stage3_price,
        ));
        stages.extend(optional_stage(
            StageId::Stage4,
            self.stage4_enabled,
            self.stage4_conversion_rate,
            None,
        ));

        stages
    }

    /// At-scale CPA when supplied. Zero counts as not supplied.
    pub fn at_scale_cpa(&self) -> Option<f64> {
        self.cpa_stage1_at_scale.filter(|cpa| is_present(*cpa))
    }
}

fn optional_stage(
    stage: StageId,
    enabled: bool,
    rate: Option<f64>,
    price: Option<f64>,
) -> Option<EnabledStage> {
    if !enabled {
        return None;
    }
    rate.filter(|r| is_present(*r))
        .map(|r| EnabledStage::from_percent(stage, r, price))
}

fn is_present(value: f64) -> bool {
    value != 0.0 && !value.is_nan()
}

/// Treat `null` flags in saved records as `false`.
fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

// Default value functions for serde
pub(crate) fn default_increment_percent() -> f64 {
    20.0
}

pub(crate) fn default_min_days() -> u32 {
    3
}

pub(crate) fn default_max_days() -> u32 {
    4
}

pub(crate) fn default_target_roi() -> f64 {
    2.0
}
