//! Command handlers for the funnelmap CLI.
//!
//! - **metrics**: funnel metrics for a configuration file
//! - **scale**: a budget escalation schedule from command-line numbers
//! - **report**: metrics plus the configuration's own scaling timeline
//! - **init**: write a starter configuration
//! - **validate**: report every problem in a configuration
//!
//! Each handler builds its report with pure functions and only touches the
//! filesystem or terminal at the end.

pub mod init;
pub mod metrics;
pub mod report;
pub mod scale;
pub mod validate;

pub use init::init_config;
pub use metrics::handle_metrics;
pub use report::handle_report;
pub use scale::handle_scale;
pub use validate::handle_validate;

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufWriter, Write};

use crate::cli::OutputArgs;
use crate::formatting::FormattingConfig;
use crate::io::create_writer;
use crate::report::FunnelReport;

/// Formatting for a command: `--plain` wins over the environment.
pub fn formatting_config(plain: bool) -> FormattingConfig {
    if plain {
        FormattingConfig::plain()
    } else {
        FormattingConfig::from_env()
    }
}

/// Write a report to the requested destination in the requested format.
pub fn emit_report(report: &FunnelReport, output: &OutputArgs) -> Result<()> {
    // Files never get ANSI escapes.
    let (destination, formatting): (Box<dyn Write>, FormattingConfig) = match &output.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file {}", path.display()))?;
            (Box::new(BufWriter::new(file)), FormattingConfig::plain())
        }
        None => (Box::new(io::stdout()), formatting_config(output.plain)),
    };

    let mut writer = create_writer(output.format.into(), destination, formatting);
    writer.write_report(report)?;

    if let Some(path) = &output.output {
        log::info!("Wrote report to {}", path.display());
    }
    Ok(())
}
