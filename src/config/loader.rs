use std::fs;
use std::path::Path;

use super::validation::validate_configuration_result;
use crate::errors::{Error, Result};
use crate::funnel::FunnelConfiguration;

/// On-disk encodings of a funnel record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    /// The record shape saved by the funnel form.
    Json,
}

impl ConfigFormat {
    /// Pick the format from the file extension. Anything other than `.json`
    /// is read as TOML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Toml,
        }
    }
}

/// Read a configuration file into memory.
pub fn read_config_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| Error::ReadConfig {
        path: path.to_path_buf(),
        source,
    })
}

/// Pure function to parse a record from its text form.
pub fn parse_configuration(
    contents: &str,
    format: ConfigFormat,
) -> std::result::Result<FunnelConfiguration, String> {
    match format {
        ConfigFormat::Toml => toml::from_str(contents).map_err(|e| e.to_string()),
        ConfigFormat::Json => serde_json::from_str(contents).map_err(|e| e.to_string()),
    }
}

/// Load a record without validating it.
pub fn load_configuration(path: &Path) -> Result<FunnelConfiguration> {
    let contents = read_config_file(path)?;
    let format = ConfigFormat::from_path(path);

    let config = parse_configuration(&contents, format)
        .map_err(|message| Error::parse_config(path, message))?;

    log::debug!(
        "Loaded {} configuration from {} ({:?})",
        config.funnel_type,
        path.display(),
        format
    );
    Ok(config)
}

/// Load a record and reject it if validation finds any problem.
pub fn load_validated_configuration(path: &Path) -> Result<FunnelConfiguration> {
    let config = load_configuration(path)?;
    validate_configuration_result(&config)?;
    Ok(config)
}

/// Serialize a record as TOML.
pub fn render_configuration(config: &FunnelConfiguration) -> Result<String> {
    Ok(toml::to_string_pretty(config)?)
}
