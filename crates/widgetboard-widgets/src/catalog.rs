//! Widget-type catalog and predefined widgets, keyed by category.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use widgetboard_core::{Category, WidgetDraft};

/// Kind of value a form field collects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Integer count, coerced to 0 when unparsable
    Count,
    /// Free text
    Text,
}

/// One input of a widget-type form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldSpec {
    /// Input key
    pub key: &'static str,
    /// Form label
    pub label: &'static str,
    /// Value kind
    pub kind: FieldKind,
}

impl FieldSpec {
    const fn count(key: &'static str, label: &'static str) -> Self {
        Self {
            key,
            label,
            kind: FieldKind::Count,
        }
    }

    const fn text(key: &'static str, label: &'static str) -> Self {
        Self {
            key,
            label,
            kind: FieldKind::Text,
        }
    }
}

const CLOUD_ACCOUNT_FIELDS: &[FieldSpec] = &[
    FieldSpec::count("connected", "Connected"),
    FieldSpec::count("not-connected", "Not Connected"),
];

const RISK_ASSESSMENT_FIELDS: &[FieldSpec] = &[
    FieldSpec::count("failed", "Failed"),
    FieldSpec::count("warning", "Warning"),
    FieldSpec::count("not-available", "Not available"),
    FieldSpec::count("passed", "Passed"),
];

const IMAGE_RISK_FIELDS: &[FieldSpec] = &[
    FieldSpec::count("critical", "Critical"),
    FieldSpec::count("high", "High"),
    FieldSpec::count("medium", "Medium"),
];

const IMAGE_SECURITY_FIELDS: &[FieldSpec] = &[
    FieldSpec::count("critical", "Critical"),
    FieldSpec::count("high", "High"),
    FieldSpec::count("medium", "Medium"),
    FieldSpec::count("low", "Low"),
];

const CWPP_CUSTOM_FIELDS: &[FieldSpec] = &[
    FieldSpec::text("title", "Widget Title"),
    FieldSpec::text("message", "Widget Message"),
];

/// Widget types the builder can synthesize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WidgetType {
    /// CSPM donut of connected vs. not connected accounts
    CloudAccounts,
    /// CSPM donut of check outcomes
    RiskAssessment,
    /// Image progress bar of vulnerability severities
    ImageRisk,
    /// Image progress bar of image security severities
    ImageSecurity,
    /// CWPP text widget with user-supplied title and message
    CwppCustom,
}

impl WidgetType {
    /// All widget types.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::CloudAccounts,
            Self::RiskAssessment,
            Self::ImageRisk,
            Self::ImageSecurity,
            Self::CwppCustom,
        ]
    }

    /// Types offered under a category tab. Ticket offers none.
    #[must_use]
    pub const fn for_category(category: Category) -> &'static [Self] {
        match category {
            Category::Cspm => &[Self::CloudAccounts, Self::RiskAssessment],
            Category::Cwpp => &[Self::CwppCustom],
            Category::Image => &[Self::ImageRisk, Self::ImageSecurity],
            Category::Ticket => &[],
        }
    }

    /// Stable type id.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::CloudAccounts => "cloud-accounts",
            Self::RiskAssessment => "risk-assessment",
            Self::ImageRisk => "image-risk",
            Self::ImageSecurity => "image-security",
            Self::CwppCustom => "cwpp-custom",
        }
    }

    /// Human-readable label for the type selector.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::CloudAccounts => "Cloud Accounts",
            Self::RiskAssessment => "Cloud Account Risk Assessment",
            Self::ImageRisk => "Image Risk Assessment",
            Self::ImageSecurity => "Image Security Issues",
            Self::CwppCustom => "Custom CWPP Widget",
        }
    }

    /// Category this type belongs to.
    #[must_use]
    pub const fn category(self) -> Category {
        match self {
            Self::CloudAccounts | Self::RiskAssessment => Category::Cspm,
            Self::ImageRisk | Self::ImageSecurity => Category::Image,
            Self::CwppCustom => Category::Cwpp,
        }
    }

    /// Inputs the form shows for this type, in display order.
    #[must_use]
    pub const fn fields(self) -> &'static [FieldSpec] {
        match self {
            Self::CloudAccounts => CLOUD_ACCOUNT_FIELDS,
            Self::RiskAssessment => RISK_ASSESSMENT_FIELDS,
            Self::ImageRisk => IMAGE_RISK_FIELDS,
            Self::ImageSecurity => IMAGE_SECURITY_FIELDS,
            Self::CwppCustom => CWPP_CUSTOM_FIELDS,
        }
    }

    /// Field spec for `key`, if this type has it.
    #[must_use]
    pub fn field(self, key: &str) -> Option<&'static FieldSpec> {
        self.fields().iter().find(|f| f.key == key)
    }

    /// Resolve a type id.
    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        Self::all().iter().copied().find(|t| t.id() == id)
    }
}

impl fmt::Display for WidgetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Ready-made widgets offered as checkboxes in the add-widget panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PredefinedCatalog {
    entries: BTreeMap<Category, Vec<WidgetDraft>>,
}

impl PredefinedCatalog {
    /// Create a catalog from explicit entries.
    #[must_use]
    pub const fn new(entries: BTreeMap<Category, Vec<WidgetDraft>>) -> Self {
        Self { entries }
    }

    /// Widgets offered under a category.
    #[must_use]
    pub fn for_category(&self, category: Category) -> &[WidgetDraft] {
        self.entries.get(&category).map(Vec::as_slice).unwrap_or_default()
    }

    /// One predefined widget.
    #[must_use]
    pub fn get(&self, category: Category, index: usize) -> Option<&WidgetDraft> {
        self.for_category(category).get(index)
    }

    /// Iterate categories with their widgets, in tab order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, &[WidgetDraft])> {
        self.entries.iter().map(|(c, w)| (*c, w.as_slice()))
    }

    /// Total number of predefined widgets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    /// Whether no predefined widgets exist.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for PredefinedCatalog {
    fn default() -> Self {
        let mut entries = BTreeMap::new();
        entries.insert(
            Category::Cspm,
            vec![
                WidgetDraft::text(
                    "Widget 1",
                    "Sample CSPM widget for cloud security posture management",
                    Category::Cspm,
                ),
                WidgetDraft::text(
                    "Security Compliance",
                    "Monitor compliance across cloud infrastructure",
                    Category::Cspm,
                ),
            ],
        );
        entries.insert(
            Category::Cwpp,
            vec![
                WidgetDraft::text(
                    "Widget 2",
                    "Sample CWPP widget for cloud workload protection",
                    Category::Cwpp,
                ),
                WidgetDraft::text(
                    "Runtime Protection",
                    "Real-time workload security monitoring",
                    Category::Cwpp,
                ),
            ],
        );
        entries.insert(
            Category::Image,
            vec![
                WidgetDraft::text(
                    "Container Scan",
                    "Vulnerability assessment for container images",
                    Category::Image,
                ),
                WidgetDraft::text(
                    "Registry Analysis",
                    "Deep analysis of registry security",
                    Category::Image,
                ),
            ],
        );
        entries.insert(
            Category::Ticket,
            vec![
                WidgetDraft::text(
                    "Support Tickets",
                    "Track and manage security support tickets",
                    Category::Ticket,
                ),
                WidgetDraft::text(
                    "Incident Response",
                    "Monitor security incident response status",
                    Category::Ticket,
                ),
            ],
        );
        Self::new(entries)
    }
}
