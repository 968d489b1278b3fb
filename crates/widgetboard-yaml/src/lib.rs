//! Manifest loading for widgetboard dashboards.
//!
//! A manifest describes the starting sections and the predefined widgets of
//! the add-widget panel. YAML is the primary format; TOML is accepted too.

mod error;
mod manifest;

pub use error::{ManifestError, ValidationIssue};
pub use manifest::Manifest;
