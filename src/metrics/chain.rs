use crate::funnel::EnabledStage;

/// Build the conversion chain as fractions.
///
/// The enabled middle stages keep their order and the high-ticket rate always
/// closes the chain. Nothing is reordered or deduplicated.
pub fn build_conversion_chain(stages: &[EnabledStage], high_ticket_rate_percent: f64) -> Vec<f64> {
    stages
        .iter()
        .map(|stage| stage.conversion_rate)
        .chain(std::iter::once(high_ticket_rate_percent / 100.0))
        .collect()
}

/// Running product of the chain. Position `i` holds `chain[0] * .. * chain[i]`.
pub fn cumulative_rates(chain: &[f64]) -> Vec<f64> {
    chain
        .iter()
        .scan(1.0_f64, |cumulative, rate| {
            *cumulative *= rate;
            Some(*cumulative)
        })
        .collect()
}

/// Stage-1-equivalent spend needed to produce one unit at each position.
pub fn per_stage_cpa(reference_cpa: f64, cumulative: &[f64]) -> Vec<f64> {
    cumulative.iter().map(|rate| reference_cpa / rate).collect()
}

/// Stage-1 volume followed by the volume after each chain position.
///
/// The result is one element longer than the chain; its last element is the
/// number of high-ticket sales.
pub fn project_volumes(stage1_volume: f64, chain: &[f64]) -> Vec<f64> {
    std::iter::once(stage1_volume)
        .chain(chain.iter().scan(stage1_volume, |volume, rate| {
            *volume *= rate;
            Some(*volume)
        }))
        .collect()
}
