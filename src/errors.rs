//! Error types for funnelmap.
//!
//! The calculation engines never fail: they return non-finite numbers for
//! degenerate input. Errors only arise at the edges, when loading and
//! validating a configuration record or when asking the scaling planner for a
//! schedule that would never terminate.

use std::path::PathBuf;
use thiserror::Error;

use crate::config::ConfigIssue;
use crate::scaling::ScalingError;

/// Main error type for funnelmap operations
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration file could not be read
    #[error("Failed to read {path}: {source}")]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file could not be parsed
    #[error("Failed to parse {path}: {message}")]
    ParseConfig { path: PathBuf, message: String },

    /// Configuration record failed validation
    #[error("Invalid funnel configuration:\n{}", format_issues(.0))]
    Validation(Vec<ConfigIssue>),

    /// Scaling schedule could not be computed
    #[error(transparent)]
    Scaling(#[from] ScalingError),

    /// TOML serialization errors
    #[error(transparent)]
    TomlSerialize(#[from] toml::ser::Error),
}

impl Error {
    /// Create a parse error for a configuration file
    pub fn parse_config(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::ParseConfig {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Whether the user can fix this by editing their configuration
    pub fn is_user_fixable(&self) -> bool {
        matches!(
            self,
            Self::ParseConfig { .. } | Self::Validation(_) | Self::Scaling(_)
        )
    }
}

fn format_issues(issues: &[ConfigIssue]) -> String {
    issues
        .iter()
        .map(|issue| format!("  - {issue}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;
