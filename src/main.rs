use anyhow::Result;
use clap::Parser;
use funnelmap::cli::{Cli, Commands};
use funnelmap::commands;
use funnelmap::scaling::ScalingPlan;
use log::LevelFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbosity);

    match cli.command {
        Commands::Metrics { config, output } => commands::handle_metrics(&config, &output),
        Commands::Scale {
            current,
            target,
            increment,
            min_days,
            max_days,
            output,
        } => {
            let plan = ScalingPlan {
                current_spend: current,
                target_spend: target,
                increment_percent: increment,
                min_days,
                max_days,
            };
            commands::handle_scale(plan, &output)
        }
        Commands::Report { config, output } => commands::handle_report(&config, &output),
        Commands::Init {
            funnel_type,
            sample,
            output,
            force,
        } => commands::init_config(funnel_type.into(), sample, &output, force),
        Commands::Validate { config, plain } => commands::handle_validate(&config, plain),
    }
}

// RUST_LOG, when set, overrides the level chosen by -v flags.
fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .parse_default_env()
        .init();
}
