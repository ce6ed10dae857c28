use crate::config::render_configuration;
use crate::funnel::{defaults_for, sample_for, FunnelType};
use crate::io;
use anyhow::Result;
use std::path::Path;

/// Pure core: the text of a starter configuration file.
pub fn initial_config_text(funnel_type: FunnelType, sample: bool) -> Result<String> {
    let config = if sample {
        sample_for(funnel_type)
    } else {
        defaults_for(funnel_type)
    };

    let mut text = format!(
        "# funnelmap configuration: {}\n# {}\n",
        funnel_type.display_name(),
        funnel_type.use_case()
    );
    if !sample {
        text.push_str(
            "# Fill in current_cpa_stage1, cpa_stage1_kill_range, high_ticket_price\n\
             # and the daily spend fields before running `funnelmap metrics`.\n",
        );
    }
    text.push('\n');
    text.push_str(&render_configuration(&config)?);
    Ok(text)
}

pub fn init_config(funnel_type: FunnelType, sample: bool, output: &Path, force: bool) -> Result<()> {
    if output.exists() && !force {
        anyhow::bail!(
            "Configuration file {} already exists. Use --force to overwrite.",
            output.display()
        );
    }

    io::write_file(output, &initial_config_text(funnel_type, sample)?)?;
    println!("Created {} configuration file", output.display());

    Ok(())
}
