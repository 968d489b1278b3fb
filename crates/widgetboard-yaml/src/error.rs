//! Error types for manifest loading.

use std::fmt;
use thiserror::Error;
use widgetboard_core::{Category, SectionKind};

/// Error type for manifest loading and serialization.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// Reading the manifest file failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing or serialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    /// File extension is not yaml, yml or toml
    #[error("unsupported manifest format: {0}")]
    UnsupportedFormat(String),

    /// The manifest parsed but is inconsistent
    #[error("manifest has {} validation issue(s)", .issues.len())]
    Validation {
        /// Every issue found
        issues: Vec<ValidationIssue>,
    },
}

/// One inconsistency in a manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    /// Two sections share an id
    DuplicateSection(String),
    /// Section id is not one of the fixed four
    UnknownSection(String),
    /// One of the fixed four sections is absent
    MissingSection(SectionKind),
    /// Two widgets share an id
    DuplicateWidget(String),
    /// Widget category disagrees with its section
    CategoryMismatch {
        /// Section id
        section: String,
        /// Widget id
        widget: String,
        /// Category of the section
        expected: Category,
        /// Category of the widget
        found: Category,
    },
    /// Segment color is not a hex color
    InvalidColor {
        /// Widget id, or the predefined widget's name
        widget: String,
        /// Segment name
        segment: String,
        /// Offending color string
        color: String,
    },
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateSection(id) => write!(f, "duplicate section id '{id}'"),
            Self::UnknownSection(id) => write!(f, "unknown section id '{id}'"),
            Self::MissingSection(kind) => write!(f, "missing section '{}'", kind.id()),
            Self::DuplicateWidget(id) => write!(f, "duplicate widget id '{id}'"),
            Self::CategoryMismatch {
                section,
                widget,
                expected,
                found,
            } => write!(
                f,
                "widget '{widget}' in section '{section}' has category {found}, expected {expected}"
            ),
            Self::InvalidColor {
                widget,
                segment,
                color,
            } => write!(
                f,
                "segment '{segment}' of widget '{widget}' has invalid color '{color}'"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        let err = ManifestError::Validation {
            issues: vec![
                ValidationIssue::DuplicateSection("cspm".to_string()),
                ValidationIssue::UnknownSection("extra".to_string()),
            ],
        };
        assert_eq!(err.to_string(), "manifest has 2 validation issue(s)");
    }

    #[test]
    fn test_issue_display() {
        let issue = ValidationIssue::CategoryMismatch {
            section: "registry".to_string(),
            widget: "w".to_string(),
            expected: Category::Image,
            found: Category::Cspm,
        };
        assert_eq!(
            issue.to_string(),
            "widget 'w' in section 'registry' has category CSPM, expected Image"
        );

        let issue = ValidationIssue::InvalidColor {
            widget: "w".to_string(),
            segment: "High".to_string(),
            color: "red".to_string(),
        };
        assert!(issue.to_string().contains("invalid color 'red'"));
    }

    #[test]
    fn test_missing_section_display() {
        let issue = ValidationIssue::MissingSection(SectionKind::Registry);
        assert_eq!(issue.to_string(), "missing section 'registry'");
    }

    #[test]
    fn test_io_error_from() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = ManifestError::from(io);
        assert!(err.to_string().contains("IO error"));
        assert!(err.to_string().contains("missing"));
    }

    #[test]
    fn test_unsupported_format_display() {
        let err = ManifestError::UnsupportedFormat("json".to_string());
        assert_eq!(err.to_string(), "unsupported manifest format: json");
    }
}
