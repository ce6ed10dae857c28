//! Per-funnel-type defaults and sample records.
//!
//! - **Defaults**: the starting point of a new record. Stage structure,
//!   labels and typical rates are filled in; budget, CPA and ticket price are
//!   left at zero for the user to supply.
//! - **Samples**: complete, realistic records used for demos and tests.
//!
//! # Example
//!
//! ```rust
//! use funnelmap::funnel::{sample_for, FunnelType};
//! use funnelmap::metrics::compute_metrics;
//!
//! let metrics = compute_metrics(&sample_for(FunnelType::WebinarToCall));
//! assert!((metrics.total_conversion - 0.0336).abs() < 1e-12);
//! ```

use super::types::{
    default_increment_percent, default_max_days, default_min_days, default_target_roi,
    FunnelConfiguration, FunnelType,
};

/// Default record for a funnel type.
pub fn defaults_for(funnel_type: FunnelType) -> FunnelConfiguration {
    let base = FunnelConfiguration {
        funnel_type,
        client_name: None,
        business_name: None,
        stage1_name: None,
        stage1_is_paid: false,
        stage1_price: Some(0.0),
        landing_page_conversion_rate: Some(7.0),
        current_cpa_stage1: 0.0,
        cpa_stage1_at_scale: None,
        cpa_stage1_kill_range: 0.0,
        stage2_name: None,
        stage2_is_paid: false,
        stage2_price: Some(0.0),
        stage2_conversion_rate: 70.0,
        stage3_enabled: false,
        stage3_name: None,
        stage3_is_paid: false,
        stage3_price: Some(0.0),
        stage3_conversion_rate: None,
        stage4_enabled: false,
        stage4_name: None,
        stage4_conversion_rate: None,
        high_ticket_price: 0.0,
        high_ticket_conversion_rate: 30.0,
        current_daily_spend: 0.0,
        target_daily_spend: 0.0,
        scaling_increment_percent: default_increment_percent(),
        scaling_frequency_days_min: default_min_days(),
        scaling_frequency_days_max: default_max_days(),
        target_roi: default_target_roi(),
    };

    match funnel_type {
        FunnelType::Webinar => FunnelConfiguration {
            stage1_name: Some("Webinar Registration".to_string()),
            stage2_name: Some("Webinar Attendance".to_string()),
            ..base
        },
        FunnelType::WebinarToCall => FunnelConfiguration {
            stage1_name: Some("Webinar Registration".to_string()),
            stage1_is_paid: true,
            stage1_price: Some(99.0),
            stage2_name: Some("Webinar Attendance".to_string()),
            stage3_enabled: true,
            stage3_name: Some("1-1 Call Booking".to_string()),
            stage3_is_paid: true,
            stage3_price: Some(999.0),
            stage3_conversion_rate: Some(20.0),
            stage4_enabled: true,
            stage4_name: Some("Call Attendance".to_string()),
            stage4_conversion_rate: Some(80.0),
            ..base
        },
        FunnelType::DirectCall => FunnelConfiguration {
            stage1_name: Some("Opt-In / Lead".to_string()),
            landing_page_conversion_rate: Some(15.0),
            stage2_name: Some("Call Booking".to_string()),
            stage2_conversion_rate: 30.0,
            stage3_enabled: true,
            stage3_name: Some("Call Attendance".to_string()),
            stage3_conversion_rate: Some(80.0),
            high_ticket_conversion_rate: 25.0,
            ..base
        },
    }
}

/// Complete sample record for a funnel type.
pub fn sample_for(funnel_type: FunnelType) -> FunnelConfiguration {
    let base = defaults_for(funnel_type);

    match funnel_type {
        FunnelType::Webinar => FunnelConfiguration {
            client_name: Some("Rahul".to_string()),
            business_name: Some("Business Coaching".to_string()),
            current_daily_spend: 5000.0,
            target_daily_spend: 30000.0,
            stage1_is_paid: true,
            stage1_price: Some(199.0),
            landing_page_conversion_rate: Some(8.0),
            current_cpa_stage1: 800.0,
            cpa_stage1_kill_range: 1500.0,
            stage2_price: None,
            stage2_conversion_rate: 65.0,
            stage3_price: None,
            high_ticket_price: 50000.0,
            high_ticket_conversion_rate: 25.0,
            ..base
        },
        FunnelType::WebinarToCall => FunnelConfiguration {
            client_name: Some("Shraddha".to_string()),
            business_name: Some("Fertility Coaching".to_string()),
            current_daily_spend: 4000.0,
            target_daily_spend: 50000.0,
            current_cpa_stage1: 600.0,
            cpa_stage1_kill_range: 2000.0,
            stage2_price: None,
            high_ticket_price: 89000.0,
            high_ticket_conversion_rate: 30.0,
            ..base
        },
        FunnelType::DirectCall => FunnelConfiguration {
            client_name: Some("Priya".to_string()),
            business_name: Some("Executive Coaching".to_string()),
            current_daily_spend: 3000.0,
            target_daily_spend: 25000.0,
            landing_page_conversion_rate: Some(20.0),
            current_cpa_stage1: 150.0,
            cpa_stage1_kill_range: 400.0,
            stage2_conversion_rate: 25.0,
            stage3_price: None,
            stage3_conversion_rate: Some(75.0),
            high_ticket_price: 200000.0,
            high_ticket_conversion_rate: 20.0,
            ..base
        },
    }
}
