//! Funnel data model.
//!
//! A [`FunnelConfiguration`] is the record a form or a configuration file
//! produces. The calculation modules only read its numeric and boolean
//! fields; labels and client details are carried for rendering.
//!
//! Optional middle stages are flattened once into an ordered list of
//! [`EnabledStage`] descriptors via [`FunnelConfiguration::enabled_stages`].
//! Both the metrics engine and the stage-label resolver consume that list, so
//! every derived series lines up with the same stage order.

pub mod presets;
mod stages;
mod types;

pub use presets::{defaults_for, sample_for};
pub use stages::{stage_labels, EnabledStage, StageId, StageLabel};
pub use types::{FunnelConfiguration, FunnelType, ParseFunnelTypeError};
