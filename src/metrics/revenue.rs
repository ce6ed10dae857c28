use serde::Serialize;

use crate::funnel::{FunnelConfiguration, StageId};

/// Revenue earned at one stage of the funnel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RevenueLine {
    pub stage: StageId,
    pub volume: f64,
    pub price: f64,
    pub revenue: f64,
}

impl RevenueLine {
    fn new(stage: StageId, volume: f64, price: f64) -> Self {
        Self {
            stage,
            volume,
            price,
            revenue: volume * price,
        }
    }
}

/// Break projected revenue down by stage.
///
/// `volumes` must come from the same configuration: stage-1 volume, one
/// volume per enabled middle stage, then high-ticket sales. Every stage among
/// 1, 2 and 3 with a price above zero earns `volume * price` on its own
/// volume; stage 4 never does. The high-ticket line is always last.
pub fn revenue_breakdown(config: &FunnelConfiguration, volumes: &[f64]) -> Vec<RevenueLine> {
    let mut lines = Vec::new();

    if let (Some(price), Some(volume)) = (
        config.stage1_price.filter(|p| *p > 0.0),
        volumes.first(),
    ) {
        lines.push(RevenueLine::new(StageId::Stage1, *volume, price));
    }

    // Middle stage i owns volume i + 1.
    lines.extend(
        config
            .enabled_stages()
            .iter()
            .zip(volumes.iter().skip(1))
            .filter_map(|(stage, volume)| {
                stage
                    .revenue_price()
                    .map(|price| RevenueLine::new(stage.stage, *volume, price))
            }),
    );

    if let Some(sales) = volumes.last() {
        lines.push(RevenueLine::new(
            StageId::HighTicket,
            *sales,
            config.high_ticket_price,
        ));
    }

    lines
}
