use std::io::Write;

use crate::formatting::{
    format_count, format_currency, format_indian_number, format_percent, FormattingConfig,
    OutputFormatter,
};
use crate::io::output::OutputWriter;
use crate::metrics::MetricsResult;
use crate::report::{FunnelReport, FunnelSummary};
use crate::scaling::ScalingResult;

const RULE: &str = "═══════════════════════════════════════════";
const THIN_RULE: &str = "───────────────────────────────────────────";

type Section<W> = fn(&mut TerminalWriter<W>, &FunnelReport) -> std::io::Result<()>;

/// Human-readable report with rupee formatting and optional colour.
pub struct TerminalWriter<W: Write> {
    writer: W,
    formatter: Box<dyn OutputFormatter>,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W, formatting: FormattingConfig) -> Self {
        Self {
            writer,
            formatter: formatting.formatter(),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_header(&mut self, report: &FunnelReport) -> std::io::Result<()> {
        let Some(funnel) = &report.funnel else {
            return Ok(());
        };

        writeln!(self.writer, "{}", self.formatter.header(RULE))?;
        writeln!(
            self.writer,
            "{}",
            self.formatter.header(&format!("  {} REPORT", funnel.name.to_uppercase()))
        )?;
        writeln!(self.writer, "{}", self.formatter.header(RULE))?;

        if let Some(client) = client_line(funnel) {
            writeln!(self.writer, "Client: {}", self.formatter.bold(&client))?;
        }
        writeln!(self.writer, "{}", self.formatter.dim(&funnel.description))?;
        writeln!(self.writer)
    }

    fn write_stage_table(&mut self, report: &FunnelReport) -> std::io::Result<()> {
        let Some(metrics) = &report.metrics else {
            return Ok(());
        };

        writeln!(self.writer, "{}", self.formatter.bold("Stage Metrics"))?;
        writeln!(self.writer, "{THIN_RULE}")?;
        writeln!(
            self.writer,
            "{:<24} {:>8} {:>10} {:>12} {:>12} {:>12} {:>10}",
            "Stage", "Conv.", "Cumul.", "CPA now", "CPA scale", "CPA kill", "Monthly"
        )?;

        let reference = reference_cpas(report.funnel.as_ref());
        for (index, volume) in metrics.volumes.iter().enumerate() {
            let name = stage_name(report.funnel.as_ref(), index);
            let row = if index == 0 {
                StageRow {
                    conversion: None,
                    cumulative: None,
                    cpa_current: reference.0,
                    cpa_at_scale: reference.1,
                    cpa_kill: reference.2,
                }
            } else {
                let position = index - 1;
                StageRow {
                    conversion: metrics.conversion_chain.get(position).copied(),
                    cumulative: metrics.cumulative_rates.get(position).copied(),
                    cpa_current: metrics.cpas_at_current.get(position).copied(),
                    cpa_at_scale: metrics
                        .cpas_at_scale
                        .as_ref()
                        .and_then(|cpas| cpas.get(position).copied()),
                    cpa_kill: metrics.cpas_at_kill_range.get(position).copied(),
                }
            };

            writeln!(
                self.writer,
                "{:<24} {:>8} {:>10} {:>12} {:>12} {:>12} {:>10}",
                truncate(&name, 24),
                row.conversion.map_or("-".to_string(), |r| format_percent(r, 1)),
                row.cumulative.map_or("-".to_string(), |r| format_percent(r, 2)),
                row.cpa_current.map_or("-".to_string(), format_currency),
                row.cpa_at_scale.map_or("-".to_string(), format_currency),
                row.cpa_kill.map_or("-".to_string(), format_currency),
                format_count(*volume),
            )?;
        }
        writeln!(self.writer)
    }

    fn write_summary(&mut self, report: &FunnelReport) -> std::io::Result<()> {
        let Some(metrics) = &report.metrics else {
            return Ok(());
        };
        let target_roi = report.funnel.as_ref().map(|f| f.target_roi);

        writeln!(self.writer, "{}", self.formatter.bold("Monthly Projection"))?;
        writeln!(self.writer, "{THIN_RULE}")?;
        writeln!(
            self.writer,
            "Ad spend:            {}",
            format_indian_number(metrics.monthly_ad_spend)
        )?;
        writeln!(
            self.writer,
            "Total revenue:       {}",
            format_indian_number(metrics.total_revenue)
        )?;
        let roi = self.roi_text(metrics, target_roi);
        writeln!(self.writer, "ROI:                 {roi}")?;
        writeln!(
            self.writer,
            "Total conversion:    {}",
            format_percent(metrics.total_conversion, 2)
        )?;
        writeln!(
            self.writer,
            "Break-even CPR:      {}",
            format_indian_number(metrics.break_even_cpr)
        )?;
        writeln!(
            self.writer,
            "High-ticket sales:   {}",
            format_count(metrics.high_ticket_sales)
        )?;
        writeln!(
            self.writer,
            "Cost per customer:   {} now, {} at kill range",
            format_indian_number(metrics.cost_per_customer_current),
            format_indian_number(metrics.cost_per_customer_kill)
        )?;
        if let Some(at_scale) = metrics.cost_per_customer_at_scale {
            writeln!(
                self.writer,
                "                     {} at scale",
                format_indian_number(at_scale)
            )?;
        }
        writeln!(self.writer)
    }

    fn roi_text(&self, metrics: &MetricsResult, target_roi: Option<f64>) -> String {
        let roi = if metrics.roi.is_finite() {
            format!("{:.2}x", metrics.roi)
        } else {
            format_percent(metrics.roi, 0)
        };

        match target_roi {
            Some(target) if metrics.meets_target_roi(target) => self
                .formatter
                .success(&format!("{roi} (target {target:.2}x met)")),
            Some(target) => self
                .formatter
                .warning(&format!("{roi} (below target {target:.2}x)")),
            None => roi,
        }
    }

    fn write_revenue(&mut self, report: &FunnelReport) -> std::io::Result<()> {
        let Some(metrics) = &report.metrics else {
            return Ok(());
        };

        writeln!(self.writer, "{}", self.formatter.bold("Revenue Breakdown"))?;
        writeln!(self.writer, "{THIN_RULE}")?;
        for line in &metrics.revenue_breakdown {
            let name = report
                .funnel
                .as_ref()
                .and_then(|f| f.stages.iter().find(|label| label.stage == line.stage))
                .map_or_else(|| line.stage.generic_label().to_string(), |l| l.name.clone());
            writeln!(
                self.writer,
                "{:<24} {:>10} x {:>10} = {}",
                truncate(&name, 24),
                format_count(line.volume),
                format_indian_number(line.price),
                format_indian_number(line.revenue)
            )?;
        }
        writeln!(self.writer)
    }

    fn write_scaling(&mut self, report: &FunnelReport) -> std::io::Result<()> {
        let Some(scaling) = &report.scaling else {
            return Ok(());
        };

        writeln!(self.writer, "{}", self.formatter.bold("Scaling Timeline"))?;
        writeln!(self.writer, "{THIN_RULE}")?;
        writeln!(self.writer, "{:<6} {:>14} {:>14}  ", "Step", "Daily budget", "Day")?;
        for step in &scaling.steps {
            let tag = if step.is_start_step {
                self.formatter.dim("start")
            } else if step.is_final_step {
                self.formatter.success("target")
            } else {
                String::new()
            };
            writeln!(
                self.writer,
                "{:<6} {:>14} {:>14}  {}",
                step.step_index,
                format_indian_number(step.raw_budget),
                day_range(step.cumulative_min_days, step.cumulative_max_days),
                tag
            )?;
        }
        writeln!(self.writer, "{}", scaling_summary(scaling))?;
        writeln!(self.writer)
    }
}

impl<W: Write> OutputWriter for TerminalWriter<W> {
    fn write_report(&mut self, report: &FunnelReport) -> anyhow::Result<()> {
        let sections: Vec<Section<W>> = vec![
            Self::write_header,
            Self::write_stage_table,
            Self::write_summary,
            Self::write_revenue,
            Self::write_scaling,
        ];

        for section in sections {
            section(self, report)?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

struct StageRow {
    conversion: Option<f64>,
    cumulative: Option<f64>,
    cpa_current: Option<f64>,
    cpa_at_scale: Option<f64>,
    cpa_kill: Option<f64>,
}

/// Stage-1 CPAs come from the record; without a funnel summary there is
/// nothing to show.
fn reference_cpas(funnel: Option<&FunnelSummary>) -> (Option<f64>, Option<f64>, Option<f64>) {
    funnel.map_or((None, None, None), |f| {
        (Some(f.current_cpa), f.at_scale_cpa, Some(f.kill_range_cpa))
    })
}

fn client_line(funnel: &FunnelSummary) -> Option<String> {
    match (&funnel.client_name, &funnel.business_name) {
        (Some(client), Some(business)) => Some(format!("{client} ({business})")),
        (Some(client), None) => Some(client.clone()),
        (None, Some(business)) => Some(business.clone()),
        (None, None) => None,
    }
}

fn stage_name(funnel: Option<&FunnelSummary>, index: usize) -> String {
    funnel
        .and_then(|f| f.stages.get(index))
        .map_or_else(|| format!("Stage {}", index + 1), |label| label.name.clone())
}

fn day_range(min: u32, max: u32) -> String {
    if min == max {
        format!("{min}")
    } else {
        format!("{min}-{max}")
    }
}

fn scaling_summary(scaling: &ScalingResult) -> String {
    let noun = if scaling.total_steps == 1 { "step" } else { "steps" };
    format!(
        "{} {noun}, reaching target in {} days",
        scaling.total_steps,
        day_range(scaling.total_days_min, scaling.total_days_max)
    )
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let kept: String = text.chars().take(width.saturating_sub(1)).collect();
        format!("{kept}…")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::funnel::{sample_for, FunnelType};
    use crate::metrics::compute_metrics;
    use crate::scaling::compute_scaling_timeline;

    fn render(report: &FunnelReport) -> String {
        let mut writer = TerminalWriter::new(Vec::new(), FormattingConfig::plain());
        writer.write_report(report).unwrap();
        String::from_utf8(writer.into_inner()).unwrap()
    }

    fn full_report(funnel_type: FunnelType) -> FunnelReport {
        let config = sample_for(funnel_type);
        FunnelReport::new()
            .with_funnel(&config)
            .with_metrics(compute_metrics(&config))
            .with_scaling(compute_scaling_timeline(5000.0, 30000.0, 20.0, 3, 4).unwrap())
    }

    #[test]
    fn test_header_names_client_and_funnel() {
        let output = render(&full_report(FunnelType::WebinarToCall));
        assert!(output.contains("WEBINAR-TO-CALL FUNNEL REPORT"));
        assert!(output.contains("Client: Shraddha (Fertility Coaching)"));
    }

    #[test]
    fn test_stage_table_lists_every_stage() {
        let output = render(&full_report(FunnelType::WebinarToCall));
        for name in [
            "Webinar Registration",
            "Webinar Attendance",
            "1-1 Call Booking",
            "Call Attendance",
            "High Ticket Sale",
        ] {
            assert!(output.contains(name), "missing stage {name}");
        }
        assert!(output.contains("750"));
    }

    #[test]
    fn test_summary_uses_indian_grouping() {
        let output = render(&full_report(FunnelType::WebinarToCall));
        assert!(output.contains("Ad spend:            ₹15,00,000"));
        assert!(output.contains("Total conversion:    3.36%"));
    }

    #[test]
    fn test_scaling_section() {
        let output = render(&full_report(FunnelType::Webinar));
        assert!(output.contains("₹30,959"));
        assert!(output.contains("30-40"));
        assert!(output.contains("11 steps, reaching target in 30-40 days"));
    }

    #[test]
    fn test_scaling_only_report_skips_metrics() {
        let report = FunnelReport::new()
            .with_scaling(compute_scaling_timeline(1000.0, 1000.0, 20.0, 3, 4).unwrap());
        let output = render(&report);
        assert!(!output.contains("Stage Metrics"));
        assert!(output.contains("1 step, reaching target in 0 days"));
    }

    #[test]
    fn test_non_finite_values_render_as_symbols() {
        let mut config = sample_for(FunnelType::Webinar);
        config.cpa_stage1_kill_range = 0.0;
        let report = FunnelReport::new()
            .with_funnel(&config)
            .with_metrics(compute_metrics(&config));

        let output = render(&report);
        assert!(output.contains('∞'));
    }

    #[test]
    fn test_stage1_cpas_blank_without_funnel_summary() {
        let mut config = sample_for(FunnelType::Webinar);
        config.stage2_conversion_rate = 0.0;
        let report = FunnelReport::new().with_metrics(compute_metrics(&config));

        let output = render(&report);
        let stage1_row = output
            .lines()
            .find(|line| line.starts_with("Stage 1 "))
            .unwrap();
        assert_eq!(
            stage1_row.split_whitespace().collect::<Vec<_>>(),
            vec!["Stage", "1", "-", "-", "-", "-", "-", "600"]
        );
    }

    #[test]
    fn test_truncate_long_names() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghij", 5), "abcd…");
    }
}
