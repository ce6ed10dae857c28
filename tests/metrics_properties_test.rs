//! Property tests for the funnel metrics engine.

use funnelmap::funnel::{sample_for, FunnelConfiguration, FunnelType, StageId};
use funnelmap::metrics::compute_metrics;
use proptest::prelude::*;

fn funnel_type() -> impl Strategy<Value = FunnelType> {
    prop_oneof![
        Just(FunnelType::Webinar),
        Just(FunnelType::WebinarToCall),
        Just(FunnelType::DirectCall),
    ]
}

prop_compose! {
    fn configuration()(
        funnel_type in funnel_type(),
        stage2 in 0.1..100.0f64,
        stage3 in proptest::option::of(0.1..100.0f64),
        stage4 in proptest::option::of(0.1..100.0f64),
        stage3_enabled in any::<bool>(),
        stage4_enabled in any::<bool>(),
        high_ticket in 0.1..100.0f64,
        stage1_price in proptest::option::of(0.0..5_000.0f64),
        stage2_price in proptest::option::of(0.0..5_000.0f64),
        stage3_price in proptest::option::of(0.0..5_000.0f64),
        high_ticket_price in 1_000.0..500_000.0f64,
        kill_cpa in 10.0..5_000.0f64,
        target in 1_000.0..200_000.0f64,
    ) -> FunnelConfiguration {
        FunnelConfiguration {
            stage2_conversion_rate: stage2,
            stage3_enabled,
            stage3_conversion_rate: stage3,
            stage4_enabled,
            stage4_conversion_rate: stage4,
            high_ticket_conversion_rate: high_ticket,
            stage1_price,
            stage2_price,
            stage3_price,
            high_ticket_price,
            cpa_stage1_kill_range: kill_cpa,
            target_daily_spend: target,
            ..sample_for(funnel_type)
        }
    }
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
}

proptest! {
    #[test]
    fn cumulative_rates_never_increase(config in configuration()) {
        let metrics = compute_metrics(&config);
        for pair in metrics.cumulative_rates.windows(2) {
            prop_assert!(pair[1] <= pair[0]);
        }
    }

    #[test]
    fn total_conversion_is_last_cumulative_rate(config in configuration()) {
        let metrics = compute_metrics(&config);
        prop_assert_eq!(Some(&metrics.total_conversion), metrics.cumulative_rates.last());
    }

    #[test]
    fn chain_length_follows_enabled_stages(config in configuration()) {
        let metrics = compute_metrics(&config);
        let enabled = config.enabled_stages().len();

        prop_assert_eq!(metrics.conversion_chain.len(), enabled + 1);
        prop_assert_eq!(metrics.volumes.len(), enabled + 2);
        prop_assert_eq!(metrics.cpas_at_current.len(), enabled + 1);
        prop_assert_eq!(metrics.cpas_at_kill_range.len(), enabled + 1);
    }

    #[test]
    fn volumes_follow_the_chain(config in configuration()) {
        let metrics = compute_metrics(&config);
        for (i, rate) in metrics.conversion_chain.iter().enumerate() {
            prop_assert!(close(metrics.volumes[i + 1], metrics.volumes[i] * rate));
        }
        prop_assert!(close(
            metrics.high_ticket_sales,
            metrics.stage1_volume() * metrics.total_conversion
        ));
    }

    #[test]
    fn revenue_decomposes_by_stage(config in configuration()) {
        let metrics = compute_metrics(&config);

        let mut expected = metrics.high_ticket_sales * config.high_ticket_price;
        if let Some(price) = config.stage1_price.filter(|p| *p > 0.0) {
            expected += metrics.stage1_volume() * price;
        }
        for (stage, volume) in config.enabled_stages().iter().zip(&metrics.volumes[1..]) {
            let price = match stage.stage {
                StageId::Stage2 => config.stage2_price,
                StageId::Stage3 => config.stage3_price,
                _ => None,
            };
            if let Some(price) = price.filter(|p| *p > 0.0) {
                expected += volume * price;
            }
        }

        prop_assert!(close(metrics.total_revenue, expected));
        prop_assert!(metrics
            .revenue_breakdown
            .iter()
            .all(|line| line.stage != StageId::Stage4));
    }

    #[test]
    fn roi_and_break_even_are_consistent(config in configuration()) {
        let metrics = compute_metrics(&config);
        prop_assert!(close(metrics.roi, metrics.total_revenue / metrics.monthly_ad_spend));
        prop_assert!(close(
            metrics.break_even_cpr,
            config.high_ticket_price * metrics.total_conversion
        ));
    }

    #[test]
    fn metrics_are_idempotent(config in configuration()) {
        prop_assert_eq!(compute_metrics(&config), compute_metrics(&config));
    }
}

#[test]
fn webinar_to_call_reference_example() {
    let metrics = compute_metrics(&sample_for(FunnelType::WebinarToCall));

    assert_eq!(metrics.conversion_chain, vec![0.70, 0.20, 0.80, 0.30]);
    assert!((metrics.total_conversion - 0.0336).abs() < 1e-12);
    assert_eq!(metrics.monthly_ad_spend, 1_500_000.0);
    assert_eq!(metrics.stage1_volume(), 750.0);
}
