use std::io::Write;

use crate::formatting::FormattingConfig;
use crate::report::FunnelReport;

use super::writers::{JsonWriter, TerminalWriter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Terminal,
}

pub trait OutputWriter {
    fn write_report(&mut self, report: &FunnelReport) -> anyhow::Result<()>;
}

/// Build a writer for the requested format over any destination.
pub fn create_writer(
    format: OutputFormat,
    destination: Box<dyn Write>,
    formatting: FormattingConfig,
) -> Box<dyn OutputWriter> {
    match format {
        OutputFormat::Json => Box::new(JsonWriter::new(destination)),
        OutputFormat::Terminal => Box::new(TerminalWriter::new(destination, formatting)),
    }
}
