use anyhow::{Context, Result};
use std::io::{self, Write};
use std::path::Path;
use stillwater::Validation;

use crate::config::{load_configuration, validate_configuration, ConfigIssue};
use crate::formatting::OutputFormatter;
use crate::funnel::FunnelConfiguration;
use crate::metrics::compute_metrics;

use super::formatting_config;

/// Everything `validate` found in a record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationOutcome {
    pub issues: Vec<ConfigIssue>,
    /// Derived values that would come out infinite or undefined.
    pub warnings: Vec<String>,
}

impl ValidationOutcome {
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Pure core: validate a record and look for non-finite results.
pub fn check_configuration(config: &FunnelConfiguration) -> ValidationOutcome {
    let issues = match validate_configuration(config) {
        Validation::Success(()) => Vec::new(),
        Validation::Failure(issues) => issues.into_vec(),
    };
    ValidationOutcome {
        issues,
        warnings: non_finite_warnings(config),
    }
}

fn non_finite_warnings(config: &FunnelConfiguration) -> Vec<String> {
    let metrics = compute_metrics(config);
    let checks = [
        ("monthly volume", metrics.stage1_volume()),
        ("cost per customer", metrics.cost_per_customer_current),
        ("cost per customer at kill range", metrics.cost_per_customer_kill),
        ("total revenue", metrics.total_revenue),
        ("ROI", metrics.roi),
    ];

    checks
        .into_iter()
        .filter(|(_, value)| !value.is_finite())
        .map(|(name, value)| {
            let kind = if value.is_nan() { "undefined" } else { "infinite" };
            format!("{name} would be {kind}")
        })
        .collect()
}

pub fn write_outcome<W: Write>(
    writer: &mut W,
    formatter: &dyn OutputFormatter,
    source: &str,
    outcome: &ValidationOutcome,
) -> io::Result<()> {
    for issue in &outcome.issues {
        writeln!(writer, "{} {issue}", formatter.error("error:"))?;
    }
    for warning in &outcome.warnings {
        writeln!(writer, "{} {warning}", formatter.warning("warning:"))?;
    }

    if outcome.is_valid() {
        writeln!(writer, "{}", formatter.success(&format!("{source} is valid")))
    } else {
        let noun = if outcome.issues.len() == 1 { "issue" } else { "issues" };
        writeln!(
            writer,
            "{}",
            formatter.error(&format!("{source}: {} {noun} found", outcome.issues.len()))
        )
    }
}

pub fn handle_validate(config_path: &Path, plain: bool) -> Result<()> {
    let config = load_configuration(config_path)
        .with_context(|| format!("Cannot validate {}", config_path.display()))?;
    let outcome = check_configuration(&config);

    let formatter = formatting_config(plain).formatter();
    let mut stdout = io::stdout();
    write_outcome(
        &mut stdout,
        formatter.as_ref(),
        &config_path.display().to_string(),
        &outcome,
    )?;

    if !outcome.is_valid() {
        anyhow::bail!("Validation failed with {} issue(s)", outcome.issues.len());
    }
    Ok(())
}
