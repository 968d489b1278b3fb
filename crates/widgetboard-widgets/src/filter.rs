//! Search filter over dashboard sections.

use widgetboard_core::{Section, Widget};

/// A section with the widgets that survived filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilteredSection<'a> {
    /// The underlying section
    pub section: &'a Section,
    /// Matching widgets, in section order
    pub widgets: Vec<&'a Widget>,
}

impl FilteredSection<'_> {
    /// Section id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.section.id
    }

    /// Section heading.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.section.title
    }

    /// Whether no widgets are shown.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }
}

/// Result of [`filter_sections`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOutcome<'a> {
    /// Sections to show
    pub sections: Vec<FilteredSection<'a>>,
    query: Option<String>,
}

impl FilterOutcome<'_> {
    /// The applied query, `None` when the query was blank.
    #[must_use]
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// Whether a non-blank query was applied.
    #[must_use]
    pub const fn is_filtered(&self) -> bool {
        self.query.is_some()
    }

    /// A non-blank query matched nothing.
    #[must_use]
    pub fn no_results(&self) -> bool {
        self.is_filtered() && self.sections.iter().all(FilteredSection::is_empty)
    }

    /// Number of widgets shown.
    #[must_use]
    pub fn widget_count(&self) -> usize {
        self.sections.iter().map(|s| s.widgets.len()).sum()
    }
}

/// Filter widgets by a case-insensitive substring of name, text or category.
///
/// A blank (empty or whitespace-only) query keeps every section, including
/// empty ones. Otherwise sections left without widgets are dropped. The
/// query is matched untrimmed once it is known not to be blank.
#[must_use]
pub fn filter_sections<'a>(sections: &'a [Section], query: &str) -> FilterOutcome<'a> {
    if query.trim().is_empty() {
        return FilterOutcome {
            sections: sections
                .iter()
                .map(|section| FilteredSection {
                    section,
                    widgets: section.widgets.iter().collect(),
                })
                .collect(),
            query: None,
        };
    }

    let needle = query.to_lowercase();
    let sections = sections
        .iter()
        .map(|section| FilteredSection {
            section,
            widgets: section
                .widgets
                .iter()
                .filter(|w| w.matches_lowercase(&needle))
                .collect(),
        })
        .filter(|s| !s.is_empty())
        .collect();

    FilterOutcome {
        sections,
        query: Some(query.to_string()),
    }
}
