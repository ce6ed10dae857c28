use crate::io::output::OutputWriter;
use crate::report::FunnelReport;
use std::io::Write;

/// Pretty-printed JSON. Non-finite numbers serialize as `null`.
pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_report(&mut self, report: &FunnelReport) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(report)?;
        self.writer.write_all(json.as_bytes())?;
        writeln!(self.writer)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::funnel::{sample_for, FunnelType};
    use crate::metrics::compute_metrics;
    use crate::scaling::compute_scaling_timeline;
    use serde_json::Value;

    #[test]
    fn test_json_report_structure() {
        let config = sample_for(FunnelType::WebinarToCall);
        let report = FunnelReport::new()
            .with_funnel(&config)
            .with_metrics(compute_metrics(&config))
            .with_scaling(compute_scaling_timeline(5000.0, 30000.0, 20.0, 3, 4).unwrap());

        let mut writer = JsonWriter::new(Vec::new());
        writer.write_report(&report).unwrap();
        let json: Value = serde_json::from_slice(&writer.into_inner()).unwrap();

        assert_eq!(json["funnel"]["funnel_type"], "webinar_to_call");
        assert_eq!(json["metrics"]["monthly_ad_spend"], 1_500_000.0);
        assert_eq!(json["metrics"]["conversion_chain"].as_array().unwrap().len(), 4);
        assert_eq!(json["metrics"]["cpas_at_scale"], Value::Null);
        assert_eq!(json["scaling"]["total_steps"], 11);
        assert_eq!(json["scaling"]["steps"][10]["budget"], 30959);
        assert_eq!(json["scaling"]["steps"][10]["is_final_step"], true);
    }

    #[test]
    fn test_json_writes_non_finite_as_null() {
        let mut config = sample_for(FunnelType::Webinar);
        config.cpa_stage1_kill_range = 0.0;
        let report = FunnelReport::new().with_metrics(compute_metrics(&config));

        let mut writer = JsonWriter::new(Vec::new());
        writer.write_report(&report).unwrap();
        let json: Value = serde_json::from_slice(&writer.into_inner()).unwrap();

        assert_eq!(json["metrics"]["volumes"][0], Value::Null);
    }
}
