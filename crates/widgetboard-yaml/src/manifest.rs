//! Dashboard manifest: the starting sections and the predefined widgets.

use crate::error::{ManifestError, ValidationIssue};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use widgetboard_core::{Color, DashboardData, Section, SectionKind, Segment};
use widgetboard_widgets::PredefinedCatalog;

fn default_title() -> String {
    "CNAPP Dashboard".to_string()
}

/// Dashboard manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    /// Dashboard heading
    #[serde(default = "default_title")]
    pub title: String,
    /// Starting sections
    #[serde(default)]
    pub sections: Vec<Section>,
    /// Widgets offered as checkboxes in the add-widget panel
    #[serde(default)]
    pub predefined: PredefinedCatalog,
}

impl Default for Manifest {
    fn default() -> Self {
        Self {
            title: default_title(),
            sections: DashboardData::initial().sections,
            predefined: PredefinedCatalog::default(),
        }
    }
}

impl Manifest {
    /// Parse a manifest from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is invalid.
    pub fn from_yaml(yaml: &str) -> Result<Self, ManifestError> {
        Ok(serde_yaml_ng::from_str(yaml)?)
    }

    /// Serialize manifest to a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_yaml(&self) -> Result<String, ManifestError> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    /// Parse a manifest from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn from_toml(source: &str) -> Result<Self, ManifestError> {
        Ok(toml::from_str(source)?)
    }

    /// Serialize manifest to a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml(&self) -> Result<String, ManifestError> {
        Ok(toml::to_string(self)?)
    }

    /// Load a manifest file, choosing the format by extension.
    ///
    /// Validation issues are logged, not returned; use
    /// [`Manifest::into_validated`] to reject them.
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        let contents = std::fs::read_to_string(path)?;
        let manifest = match extension.as_str() {
            "yaml" | "yml" => Self::from_yaml(&contents)?,
            "toml" => Self::from_toml(&contents)?,
            other => return Err(ManifestError::UnsupportedFormat(other.to_string())),
        };

        for issue in manifest.validate() {
            tracing::warn!(path = %path.display(), %issue, "manifest validation issue");
        }
        tracing::debug!(
            path = %path.display(),
            sections = manifest.sections.len(),
            "manifest loaded"
        );
        Ok(manifest)
    }

    /// Collect every inconsistency in the manifest.
    #[must_use]
    pub fn validate(&self) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        let mut section_ids = HashSet::new();
        let mut widget_ids = HashSet::new();

        for section in &self.sections {
            if !section_ids.insert(section.id.as_str()) {
                issues.push(ValidationIssue::DuplicateSection(section.id.clone()));
            }
            let kind = SectionKind::from_id(&section.id);
            if kind.is_none() {
                issues.push(ValidationIssue::UnknownSection(section.id.clone()));
            }

            for widget in &section.widgets {
                if !widget_ids.insert(widget.id.as_str()) {
                    issues.push(ValidationIssue::DuplicateWidget(widget.id.clone()));
                }
                if let Some(kind) = kind {
                    if widget.category != kind.category() {
                        issues.push(ValidationIssue::CategoryMismatch {
                            section: section.id.clone(),
                            widget: widget.id.clone(),
                            expected: kind.category(),
                            found: widget.category,
                        });
                    }
                }
                if let Some(data) = &widget.data {
                    check_colors(&widget.id, &data.segments, &mut issues);
                }
            }
        }

        for kind in SectionKind::all() {
            if !section_ids.contains(kind.id()) {
                issues.push(ValidationIssue::MissingSection(*kind));
            }
        }

        for (_, drafts) in self.predefined.iter() {
            for draft in drafts {
                if let Some(data) = &draft.data {
                    check_colors(&draft.name, &data.segments, &mut issues);
                }
            }
        }

        issues
    }

    /// Return the manifest if it has no validation issues.
    pub fn into_validated(self) -> Result<Self, ManifestError> {
        let issues = self.validate();
        if issues.is_empty() {
            Ok(self)
        } else {
            Err(ManifestError::Validation { issues })
        }
    }

    /// Starting dashboard data.
    #[must_use]
    pub fn dashboard_data(&self) -> DashboardData {
        DashboardData::new(self.sections.clone())
    }
}

fn check_colors(widget: &str, segments: &[Segment], issues: &mut Vec<ValidationIssue>) {
    for segment in segments {
        if Color::from_hex(&segment.color).is_err() {
            issues.push(ValidationIssue::InvalidColor {
                widget: widget.to_string(),
                segment: segment.name.clone(),
                color: segment.color.clone(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use widgetboard_core::Category;

    const EXAMPLE_YAML: &str = r##"
title: Ops Dashboard
sections:
  - id: cspm
    title: Posture
    widgets:
      - id: accounts
        name: Cloud Accounts
        text: Connected and Not Connected accounts overview
        category: CSPM
        data:
          type: donut
          total: 4
          segments:
            - { name: Connected, value: 3, color: "#4285f4" }
            - { name: Not Connected, value: 1, color: "#e8eaed" }
  - id: cwpp
    title: Workloads
  - id: registry
    title: Images
  - id: ticket
    title: Tickets
"##;

    #[test]
    fn test_parse_yaml() {
        let manifest = Manifest::from_yaml(EXAMPLE_YAML).unwrap();
        assert_eq!(manifest.title, "Ops Dashboard");
        assert_eq!(manifest.sections.len(), 4);
        assert!(manifest.sections[3].widgets.is_empty());
        let data = manifest.sections[0].widgets[0].data.as_ref().unwrap();
        assert_eq!(data.total, 4);
        assert!(manifest.validate().is_empty());
    }

    #[test]
    fn test_missing_predefined_uses_default() {
        let manifest = Manifest::from_yaml(EXAMPLE_YAML).unwrap();
        assert_eq!(manifest.predefined, PredefinedCatalog::default());
    }

    #[test]
    fn test_minimal_yaml_defaults() {
        let manifest = Manifest::from_yaml("sections: []").unwrap();
        assert_eq!(manifest.title, "CNAPP Dashboard");
        assert!(manifest.sections.is_empty());
    }

    #[test]
    fn test_invalid_yaml() {
        let err = Manifest::from_yaml("sections: [").unwrap_err();
        assert!(matches!(err, ManifestError::Yaml(_)));
    }

    #[test]
    fn test_yaml_roundtrip_default() {
        let manifest = Manifest::default();
        let yaml = manifest.to_yaml().unwrap();
        assert_eq!(Manifest::from_yaml(&yaml).unwrap(), manifest);
    }

    #[test]
    fn test_parse_toml() {
        let source = r##"
title = "From TOML"

[[sections]]
id = "cwpp"
title = "Workloads"

[[sections.widgets]]
id = "alerts"
name = "Workload Alerts"
text = "No Graph data available!"
category = "CWPP"

[predefined]
Ticket = [{ name = "Support Tickets", text = "Track tickets", category = "Ticket" }]
"##;
        let manifest = Manifest::from_toml(source).unwrap();
        assert_eq!(manifest.title, "From TOML");
        assert_eq!(manifest.sections[0].widgets[0].category, Category::Cwpp);
        assert_eq!(manifest.predefined.len(), 1);
        assert!(manifest.predefined.for_category(Category::Cspm).is_empty());
    }

    #[test]
    fn test_default_is_valid() {
        assert!(Manifest::default().validate().is_empty());
        assert!(Manifest::default().into_validated().is_ok());
    }

    #[test]
    fn test_validate_collects_all_issues() {
        let yaml = r##"
sections:
  - id: cspm
    title: A
    widgets:
      - { id: w1, name: a, text: "", category: CSPM }
      - id: w1
        name: b
        text: ""
        category: Image
        data:
          type: progress
          total: 1
          segments:
            - { name: High, value: 1, color: red }
  - id: cspm
    title: B
  - id: extra
    title: C
"##;
        let issues = Manifest::from_yaml(yaml).unwrap().validate();
        assert_eq!(
            issues,
            vec![
                ValidationIssue::DuplicateWidget("w1".to_string()),
                ValidationIssue::CategoryMismatch {
                    section: "cspm".to_string(),
                    widget: "w1".to_string(),
                    expected: Category::Cspm,
                    found: Category::Image,
                },
                ValidationIssue::InvalidColor {
                    widget: "w1".to_string(),
                    segment: "High".to_string(),
                    color: "red".to_string(),
                },
                ValidationIssue::DuplicateSection("cspm".to_string()),
                ValidationIssue::UnknownSection("extra".to_string()),
                ValidationIssue::MissingSection(SectionKind::Cwpp),
                ValidationIssue::MissingSection(SectionKind::Registry),
                ValidationIssue::MissingSection(SectionKind::Ticket),
            ]
        );
    }

    #[test]
    fn test_validate_reports_missing_sections() {
        let issues = Manifest::from_yaml("sections: [{ id: ticket, title: T }]")
            .unwrap()
            .validate();
        assert_eq!(
            issues,
            vec![
                ValidationIssue::MissingSection(SectionKind::Cspm),
                ValidationIssue::MissingSection(SectionKind::Cwpp),
                ValidationIssue::MissingSection(SectionKind::Registry),
            ]
        );
    }

    #[test]
    fn test_into_validated_rejects() {
        let manifest = Manifest::from_yaml("sections: [{ id: nope, title: x }]").unwrap();
        let err = manifest.into_validated().unwrap_err();
        assert!(matches!(err, ManifestError::Validation { ref issues } if issues.len() == 5));
    }

    #[test]
    fn test_dashboard_data() {
        let data = Manifest::default().dashboard_data();
        assert_eq!(data, DashboardData::initial());
    }
}
