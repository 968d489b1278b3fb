//! Dashboard data model: widgets, chart data, sections.

use crate::color::ColorToken;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Classification shared by sections and widget catalogs.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub enum Category {
    /// Cloud security posture management
    #[default]
    #[serde(rename = "CSPM")]
    Cspm,
    /// Cloud workload protection platform
    #[serde(rename = "CWPP")]
    Cwpp,
    /// Container image scanning
    Image,
    /// Support and incident tickets
    Ticket,
}

impl Category {
    /// All categories in tab order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Cspm, Self::Cwpp, Self::Image, Self::Ticket]
    }

    /// Display label, also the text matched by search.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cspm => "CSPM",
            Self::Cwpp => "CWPP",
            Self::Image => "Image",
            Self::Ticket => "Ticket",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names no category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory(pub String);

impl fmt::Display for UnknownCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown category '{}'", self.0)
    }
}

impl std::error::Error for UnknownCategory {}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// The four fixed dashboard sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    /// `cspm`
    Cspm,
    /// `cwpp`
    Cwpp,
    /// `registry`
    Registry,
    /// `ticket`
    Ticket,
}

impl SectionKind {
    /// All section kinds in display order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Cspm, Self::Cwpp, Self::Registry, Self::Ticket]
    }

    /// Stable section identifier.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Cspm => "cspm",
            Self::Cwpp => "cwpp",
            Self::Registry => "registry",
            Self::Ticket => "ticket",
        }
    }

    /// Category whose widgets belong in this section.
    #[must_use]
    pub const fn category(self) -> Category {
        match self {
            Self::Cspm => Category::Cspm,
            Self::Cwpp => Category::Cwpp,
            Self::Registry => Category::Image,
            Self::Ticket => Category::Ticket,
        }
    }

    /// Default section heading.
    #[must_use]
    pub const fn default_title(self) -> &'static str {
        match self {
            Self::Cspm => "CSPM Executive Dashboard",
            Self::Cwpp => "CWPP Dashboard",
            Self::Registry => "Registry Scan",
            Self::Ticket => "Ticket Dashboard",
        }
    }

    /// Resolve a section identifier.
    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        Self::all().iter().copied().find(|k| k.id() == id)
    }

    /// Category for a section identifier, falling back to CSPM.
    #[must_use]
    pub fn category_for(section_id: &str) -> Category {
        Self::from_id(section_id).map_or(Category::Cspm, Self::category)
    }
}

/// One colored portion of a chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    /// Legend label
    pub name: String,
    /// Segment value; negative values are carried through unvalidated
    pub value: i64,
    /// Hex color token
    pub color: String,
}

impl Segment {
    /// Create a segment.
    #[must_use]
    pub fn new(name: impl Into<String>, value: i64, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value,
            color: color.into(),
        }
    }

    /// Create a segment colored with a palette token.
    #[must_use]
    pub fn with_token(name: impl Into<String>, value: i64, token: ColorToken) -> Self {
        Self::new(name, value, token)
    }
}

/// Chart kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    /// Ring chart
    Donut,
    /// Horizontal stacked bar
    Progress,
}

/// Chart payload of a widget.
///
/// `total` is trusted by the chart math; it is not recomputed from segments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartWidgetData {
    /// Chart kind
    #[serde(rename = "type")]
    pub kind: ChartKind,
    /// Denominator for proportions
    pub total: i64,
    /// Ordered segments
    pub segments: Vec<Segment>,
}

impl ChartWidgetData {
    /// Create chart data with an explicit total.
    #[must_use]
    pub const fn new(kind: ChartKind, total: i64, segments: Vec<Segment>) -> Self {
        Self {
            kind,
            total,
            segments,
        }
    }

    /// Create chart data whose total is the sum of segment values.
    #[must_use]
    pub fn from_segments(kind: ChartKind, segments: Vec<Segment>) -> Self {
        let total = saturating_sum(&segments);
        Self::new(kind, total, segments)
    }

    /// Sum of segment values, saturating at the `i64` bounds.
    #[must_use]
    pub fn segment_sum(&self) -> i64 {
        saturating_sum(&self.segments)
    }

    /// Whether the stored total agrees with the segment values.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.total == self.segment_sum()
    }
}

fn saturating_sum(segments: &[Segment]) -> i64 {
    segments
        .iter()
        .fold(0i64, |acc, s| acc.saturating_add(s.value))
}

/// A widget before the store assigns it an id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetDraft {
    /// Card heading
    pub name: String,
    /// Description or summary line
    pub text: String,
    /// Category
    pub category: Category,
    /// Optional chart
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<ChartWidgetData>,
}

impl WidgetDraft {
    /// Create a text-only draft.
    #[must_use]
    pub fn text(name: impl Into<String>, text: impl Into<String>, category: Category) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
            category,
            data: None,
        }
    }

    /// Attach chart data.
    #[must_use]
    pub fn with_chart(mut self, data: ChartWidgetData) -> Self {
        self.data = Some(data);
        self
    }

    /// Turn the draft into a widget with the given id.
    #[must_use]
    pub fn into_widget(self, id: impl Into<String>) -> Widget {
        Widget {
            id: id.into(),
            name: self.name,
            text: self.text,
            category: self.category,
            data: self.data,
        }
    }
}

/// A dashboard card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Widget {
    /// Unique id, assigned by the store
    pub id: String,
    /// Card heading
    pub name: String,
    /// Description or summary line
    pub text: String,
    /// Category
    pub category: Category,
    /// Optional chart
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<ChartWidgetData>,
}

impl Widget {
    /// Whether `needle` (already lowercased) occurs in the name, text or category.
    #[must_use]
    pub fn matches_lowercase(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.text.to_lowercase().contains(needle)
            || self.category.as_str().to_lowercase().contains(needle)
    }
}

/// A fixed, named group of widgets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Stable identifier
    pub id: String,
    /// Heading
    pub title: String,
    /// Widgets in insertion order
    #[serde(default)]
    pub widgets: Vec<Widget>,
}

impl Section {
    /// Create an empty section.
    #[must_use]
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            widgets: Vec::new(),
        }
    }

    /// Add a widget (builder style).
    #[must_use]
    pub fn with_widget(mut self, widget: Widget) -> Self {
        self.widgets.push(widget);
        self
    }

    /// Find a widget by id.
    #[must_use]
    pub fn widget(&self, id: &str) -> Option<&Widget> {
        self.widgets.iter().find(|w| w.id == id)
    }

    /// Section kind, if the id is one of the fixed four.
    #[must_use]
    pub fn kind(&self) -> Option<SectionKind> {
        SectionKind::from_id(&self.id)
    }
}
