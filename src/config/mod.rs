//! Loading and validating funnel configuration records.
//!
//! The engines trust their input, so everything a form would check lives
//! here: [`validate_configuration`] accumulates every problem in a record
//! instead of stopping at the first one.

mod loader;
pub mod validation;

pub use loader::{
    load_configuration, load_validated_configuration, parse_configuration, read_config_file,
    render_configuration, ConfigFormat,
};
pub use validation::{
    validate_configuration, validate_configuration_result, ConfigIssue, ConfigValidation,
};
