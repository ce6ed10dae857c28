use serde::{Deserialize, Serialize};
use std::fmt;

use super::types::{FunnelConfiguration, FunnelType};

/// Fixed stage positions of a funnel record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageId {
    Stage1,
    Stage2,
    Stage3,
    Stage4,
    HighTicket,
}

impl StageId {
    /// Generic label used when neither the record nor the funnel type name
    /// the stage.
    pub fn generic_label(&self) -> &'static str {
        match self {
            Self::Stage1 => "Stage 1",
            Self::Stage2 => "Stage 2",
            Self::Stage3 => "Stage 3",
            Self::Stage4 => "Stage 4",
            Self::HighTicket => "High Ticket Sale",
        }
    }
}

impl fmt::Display for StageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.generic_label())
    }
}

/// A middle stage that takes part in the conversion chain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EnabledStage {
    pub stage: StageId,
    /// Conversion from the previous stage, as a fraction.
    pub conversion_rate: f64,
    pub price: Option<f64>,
}

impl EnabledStage {
    pub fn from_percent(stage: StageId, rate_percent: f64, price: Option<f64>) -> Self {
        Self {
            stage,
            conversion_rate: rate_percent / 100.0,
            price,
        }
    }

    /// Price that earns revenue at this stage. Stage 4 is never priced.
    pub fn revenue_price(&self) -> Option<f64> {
        match self.stage {
            StageId::Stage4 => None,
            _ => self.price.filter(|p| *p > 0.0),
        }
    }
}

/// Display information for one stage of a funnel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageLabel {
    pub stage: StageId,
    pub name: String,
    pub is_paid: bool,
    pub price: f64,
}

/// Resolve human-readable stage labels for a configuration.
///
/// The result follows the same order as the projected volumes: stage 1, each
/// enabled middle stage, then the high-ticket sale. Names set on the record
/// win over the funnel type's defaults.
pub fn stage_labels(config: &FunnelConfiguration) -> Vec<StageLabel> {
    let mut labels = Vec::with_capacity(5);

    labels.push(StageLabel {
        stage: StageId::Stage1,
        name: resolve_name(config, StageId::Stage1),
        is_paid: config.stage1_is_paid,
        price: config.stage1_price.unwrap_or(0.0),
    });

    labels.extend(config.enabled_stages().into_iter().map(|enabled| StageLabel {
        stage: enabled.stage,
        name: resolve_name(config, enabled.stage),
        is_paid: is_paid(config, enabled.stage),
        price: enabled.revenue_price().unwrap_or(0.0),
    }));

    labels.push(StageLabel {
        stage: StageId::HighTicket,
        name: StageId::HighTicket.generic_label().to_string(),
        is_paid: true,
        price: config.high_ticket_price,
    });

    labels
}

fn is_paid(config: &FunnelConfiguration, stage: StageId) -> bool {
    match stage {
        StageId::Stage1 => config.stage1_is_paid,
        StageId::Stage2 => config.stage2_is_paid,
        StageId::Stage3 => config.stage3_is_paid,
        StageId::Stage4 => false,
        StageId::HighTicket => true,
    }
}

fn resolve_name(config: &FunnelConfiguration, stage: StageId) -> String {
    let custom = match stage {
        StageId::Stage1 => config.stage1_name.as_deref(),
        StageId::Stage2 => config.stage2_name.as_deref(),
        StageId::Stage3 => config.stage3_name.as_deref(),
        StageId::Stage4 => config.stage4_name.as_deref(),
        StageId::HighTicket => None,
    };

    custom
        .filter(|name| !name.trim().is_empty())
        .or_else(|| default_name(config.funnel_type, stage))
        .unwrap_or_else(|| stage.generic_label())
        .to_string()
}

fn default_name(funnel_type: FunnelType, stage: StageId) -> Option<&'static str> {
    match (funnel_type, stage) {
        (FunnelType::Webinar | FunnelType::WebinarToCall, StageId::Stage1) => {
            Some("Webinar Registration")
        }
        (FunnelType::Webinar | FunnelType::WebinarToCall, StageId::Stage2) => {
            Some("Webinar Attendance")
        }
        (FunnelType::WebinarToCall, StageId::Stage3) => Some("1-1 Call Booking"),
        (FunnelType::WebinarToCall, StageId::Stage4) => Some("Call Attendance"),
        (FunnelType::DirectCall, StageId::Stage1) => Some("Opt-In / Lead"),
        (FunnelType::DirectCall, StageId::Stage2) => Some("Call Booking"),
        (FunnelType::DirectCall, StageId::Stage3) => Some("Call Attendance"),
        (_, StageId::HighTicket) => Some("High Ticket Sale"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::funnel::sample_for;

    fn names(labels: &[StageLabel]) -> Vec<&str> {
        labels.iter().map(|l| l.name.as_str()).collect()
    }

    #[test]
    fn test_webinar_labels() {
        let config = sample_for(FunnelType::Webinar);
        let labels = stage_labels(&config);

        assert_eq!(
            names(&labels),
            vec!["Webinar Registration", "Webinar Attendance", "High Ticket Sale"]
        );
        assert!(labels[0].is_paid);
        assert_eq!(labels[0].price, 199.0);
        assert_eq!(labels[2].price, 50000.0);
    }

    #[test]
    fn test_webinar_to_call_labels() {
        let config = sample_for(FunnelType::WebinarToCall);
        let labels = stage_labels(&config);

        assert_eq!(
            names(&labels),
            vec![
                "Webinar Registration",
                "Webinar Attendance",
                "1-1 Call Booking",
                "Call Attendance",
                "High Ticket Sale"
            ]
        );
        assert!(labels[2].is_paid);
        assert_eq!(labels[2].price, 999.0);
        assert!(!labels[3].is_paid);
    }

    #[test]
    fn test_direct_call_labels() {
        let config = sample_for(FunnelType::DirectCall);
        let labels = stage_labels(&config);

        assert_eq!(
            names(&labels),
            vec!["Opt-In / Lead", "Call Booking", "Call Attendance", "High Ticket Sale"]
        );
    }

    #[test]
    fn test_custom_names_override_defaults() {
        let mut config = sample_for(FunnelType::Webinar);
        config.stage1_name = Some("Masterclass Signup".to_string());
        config.stage2_name = Some("   ".to_string());

        let labels = stage_labels(&config);
        assert_eq!(labels[0].name, "Masterclass Signup");
        assert_eq!(labels[1].name, "Webinar Attendance");
    }

    #[test]
    fn test_labels_align_with_enabled_stages() {
        let mut config = sample_for(FunnelType::WebinarToCall);
        config.stage3_enabled = false;

        let labels = stage_labels(&config);
        assert_eq!(labels.len(), config.enabled_stages().len() + 2);
        assert_eq!(labels[2].stage, StageId::Stage4);
    }

    #[test]
    fn test_stage4_never_has_revenue_price() {
        let stage = EnabledStage::from_percent(StageId::Stage4, 80.0, Some(500.0));
        assert_eq!(stage.revenue_price(), None);
    }
}
