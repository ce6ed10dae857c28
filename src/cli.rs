use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::funnel::FunnelType;

#[derive(Parser, Debug)]
#[command(name = "funnelmap")]
#[command(
    about = "Funnel unit economics and ad-spend scaling planner",
    long_about = None
)]
#[command(version)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbosity: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute conversion, CPA, volume and revenue metrics for a funnel
    Metrics {
        /// Funnel configuration file (.toml or .json)
        config: PathBuf,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Plan a geometric daily-budget ramp from current to target spend
    Scale {
        /// Current daily spend
        #[arg(long)]
        current: f64,

        /// Target daily spend
        #[arg(long)]
        target: f64,

        /// Percentage increase per step
        #[arg(long, default_value = "20")]
        increment: f64,

        /// Minimum days between steps
        #[arg(long = "min-days", default_value = "3")]
        min_days: u32,

        /// Maximum days between steps
        #[arg(long = "max-days", default_value = "4")]
        max_days: u32,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Metrics plus the scaling timeline described by the configuration
    Report {
        /// Funnel configuration file (.toml or .json)
        config: PathBuf,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Write a new funnel configuration file
    Init {
        /// Funnel type to start from
        #[arg(long = "funnel-type", value_enum)]
        funnel_type: FunnelTypeArg,

        /// Fill in a complete sample record instead of blank defaults
        #[arg(long)]
        sample: bool,

        /// Destination file
        #[arg(short, long, default_value = "funnel.toml")]
        output: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Check a configuration and report every problem found
    Validate {
        /// Funnel configuration file (.toml or .json)
        config: PathBuf,

        /// Disable colored output
        #[arg(long)]
        plain: bool,
    },
}

/// Output flags shared by the reporting commands.
#[derive(Args, Debug, Clone)]
pub struct OutputArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "terminal")]
    pub format: OutputFormat,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Disable colored output
    #[arg(long)]
    pub plain: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum OutputFormat {
    Json,
    Terminal,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum FunnelTypeArg {
    /// Registration, attendance, sale
    Webinar,
    /// Registration, attendance, call booking, call attendance, sale
    WebinarToCall,
    /// Opt-in, call booking, sale
    DirectCall,
}

impl From<OutputFormat> for crate::io::output::OutputFormat {
    fn from(f: OutputFormat) -> Self {
        match f {
            OutputFormat::Json => crate::io::output::OutputFormat::Json,
            OutputFormat::Terminal => crate::io::output::OutputFormat::Terminal,
        }
    }
}

impl From<FunnelTypeArg> for FunnelType {
    fn from(arg: FunnelTypeArg) -> Self {
        match arg {
            FunnelTypeArg::Webinar => FunnelType::Webinar,
            FunnelTypeArg::WebinarToCall => FunnelType::WebinarToCall,
            FunnelTypeArg::DirectCall => FunnelType::DirectCall,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_scale_defaults() {
        let cli = Cli::parse_from(["funnelmap", "scale", "--current", "5000", "--target", "30000"]);
        match cli.command {
            Commands::Scale {
                current,
                target,
                increment,
                min_days,
                max_days,
                output,
            } => {
                assert_eq!((current, target, increment), (5000.0, 30000.0, 20.0));
                assert_eq!((min_days, max_days), (3, 4));
                assert_eq!(output.format, OutputFormat::Terminal);
                assert!(!output.plain);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_init_with_kebab_case_funnel_type() {
        let cli = Cli::parse_from([
            "funnelmap",
            "init",
            "--funnel-type",
            "webinar-to-call",
            "--sample",
        ]);
        match cli.command {
            Commands::Init {
                funnel_type,
                sample,
                force,
                ..
            } => {
                assert_eq!(FunnelType::from(funnel_type), FunnelType::WebinarToCall);
                assert!(sample);
                assert!(!force);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_verbosity_counts() {
        let cli = Cli::parse_from(["funnelmap", "-vv", "validate", "funnel.toml"]);
        assert_eq!(cli.verbosity, 2);
    }

    #[test]
    fn test_output_format_conversion() {
        assert_eq!(
            crate::io::output::OutputFormat::from(OutputFormat::Json),
            crate::io::output::OutputFormat::Json
        );
    }
}
