//! Dashboard state and the store that owns it.

use crate::color::ColorToken;
use crate::model::{
    Category, ChartKind, ChartWidgetData, Section, SectionKind, Segment, Widget, WidgetDraft,
};
use crate::state::{State, Store, SubscriptionId, Transition};
use serde::{Deserialize, Serialize};

/// All sections of a dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardData {
    /// Sections in display order
    pub sections: Vec<Section>,
}

impl DashboardData {
    /// Create dashboard data from sections.
    #[must_use]
    pub const fn new(sections: Vec<Section>) -> Self {
        Self { sections }
    }

    /// The built-in starting dashboard.
    ///
    /// Some charts carry totals that differ from their segment sums; they are
    /// rendered against the stored total as-is.
    #[must_use]
    pub fn initial() -> Self {
        let cspm = Section::new("cspm", SectionKind::Cspm.default_title())
            .with_widget(
                WidgetDraft::text(
                    "Cloud Accounts",
                    "Connected and Not Connected accounts overview",
                    Category::Cspm,
                )
                .with_chart(ChartWidgetData::new(
                    ChartKind::Donut,
                    4,
                    vec![
                        Segment::with_token("Connected", 2, ColorToken::Primary),
                        Segment::with_token("Not Connected", 2, ColorToken::Neutral),
                    ],
                ))
                .into_widget("cloud-accounts"),
            )
            .with_widget(
                WidgetDraft::text(
                    "Cloud Account Risk Assessment",
                    "Security risk distribution across cloud accounts",
                    Category::Cspm,
                )
                .with_chart(ChartWidgetData::new(
                    ChartKind::Donut,
                    9659,
                    vec![
                        Segment::with_token("Failed", 1689, ColorToken::High),
                        Segment::with_token("Warning", 681, ColorToken::Medium),
                        Segment::with_token("Not available", 36, ColorToken::Neutral),
                        Segment::with_token("Passed", 7253, ColorToken::Low),
                    ],
                ))
                .into_widget("risk-assessment"),
            );

        let cwpp = Section::new("cwpp", SectionKind::Cwpp.default_title())
            .with_widget(
                WidgetDraft::text(
                    "Top 5 Namespace Specific Alerts",
                    "No Graph data available!",
                    Category::Cwpp,
                )
                .into_widget("namespace-alerts"),
            )
            .with_widget(
                WidgetDraft::text("Workload Alerts", "No Graph data available!", Category::Cwpp)
                    .into_widget("workload-alerts"),
            );

        let registry = Section::new("registry", SectionKind::Registry.default_title())
            .with_widget(
                WidgetDraft::text(
                    "Image Risk Assessment",
                    "1470 Total Vulnerabilities breakdown by severity",
                    Category::Image,
                )
                .with_chart(ChartWidgetData::new(
                    ChartKind::Progress,
                    1470,
                    vec![
                        Segment::with_token("Critical", 9, ColorToken::Critical),
                        Segment::with_token("High", 150, ColorToken::High),
                    ],
                ))
                .into_widget("image-risk"),
            )
            .with_widget(
                WidgetDraft::text(
                    "Image Security Issues",
                    "2 Total Images security analysis",
                    Category::Image,
                )
                .with_chart(ChartWidgetData::new(
                    ChartKind::Progress,
                    2,
                    vec![
                        Segment::with_token("Critical", 2, ColorToken::Critical),
                        Segment::with_token("High", 2, ColorToken::High),
                    ],
                ))
                .into_widget("security-issues"),
            );

        let ticket = Section::new("ticket", SectionKind::Ticket.default_title());

        Self::new(vec![cspm, cwpp, registry, ticket])
    }

    /// Find a section by id.
    #[must_use]
    pub fn section(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    fn section_mut(&mut self, id: &str) -> Option<&mut Section> {
        self.sections.iter_mut().find(|s| s.id == id)
    }

    /// Number of widgets in a section, `None` for an unknown section.
    #[must_use]
    pub fn widget_count(&self, section_id: &str) -> Option<usize> {
        self.section(section_id).map(|s| s.widgets.len())
    }

    /// Total number of widgets across all sections.
    #[must_use]
    pub fn total_widgets(&self) -> usize {
        self.sections.iter().map(|s| s.widgets.len()).sum()
    }

    /// Whether any section holds a widget with this id.
    #[must_use]
    pub fn contains_widget_id(&self, id: &str) -> bool {
        self.sections.iter().any(|s| s.widget(id).is_some())
    }
}

/// Mutations accepted by [`DashboardData`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardMessage {
    /// Append a widget to the end of a section
    AddWidget {
        /// Target section
        section_id: String,
        /// Widget with its id already assigned
        widget: Widget,
    },
    /// Remove a widget from a section
    RemoveWidget {
        /// Section holding the widget
        section_id: String,
        /// Widget to remove
        widget_id: String,
    },
}

impl State for DashboardData {
    type Message = DashboardMessage;

    fn update(&mut self, msg: Self::Message) -> Transition {
        match msg {
            DashboardMessage::AddWidget { section_id, widget } => {
                let Some(section) = self.section_mut(&section_id) else {
                    return Transition::Unchanged;
                };
                section.widgets.push(widget);
                Transition::Changed
            }
            DashboardMessage::RemoveWidget {
                section_id,
                widget_id,
            } => {
                let Some(section) = self.section_mut(&section_id) else {
                    return Transition::Unchanged;
                };
                let Some(index) = section.widgets.iter().position(|w| w.id == widget_id) else {
                    return Transition::Unchanged;
                };
                section.widgets.remove(index);
                Transition::Changed
            }
        }
    }
}

/// Source of fresh widget ids.
pub trait IdGenerator: Send + Sync {
    /// Produce the next candidate id.
    fn next_id(&mut self) -> String;
}

/// Monotonic `{prefix}-{n}` ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequentialIds {
    prefix: String,
    next: u64,
}

impl SequentialIds {
    /// Create a generator with a custom prefix.
    #[must_use]
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
        }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::with_prefix("widget")
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> String {
        let id = format!("{}-{}", self.prefix, self.next);
        self.next += 1;
        id
    }
}

/// The single owner of [`DashboardData`].
///
/// Views read [`DashboardStore::snapshot`] and mutate only through
/// [`DashboardStore::add_widget`] and [`DashboardStore::remove_widget`].
pub struct DashboardStore<G: IdGenerator = SequentialIds> {
    store: Store<DashboardData>,
    ids: G,
}

impl DashboardStore<SequentialIds> {
    /// Create a store with sequential ids.
    #[must_use]
    pub fn new(data: DashboardData) -> Self {
        Self::with_id_generator(data, SequentialIds::default())
    }
}

impl Default for DashboardStore<SequentialIds> {
    fn default() -> Self {
        Self::new(DashboardData::initial())
    }
}

impl<G: IdGenerator> DashboardStore<G> {
    /// Create a store with a custom id generator.
    pub const fn with_id_generator(data: DashboardData, ids: G) -> Self {
        Self {
            store: Store::new(data),
            ids,
        }
    }

    /// Read-only view of the current data.
    pub const fn snapshot(&self) -> &DashboardData {
        self.store.state()
    }

    /// Sections in display order.
    pub fn sections(&self) -> &[Section] {
        &self.store.state().sections
    }

    /// Append a widget to a section, assigning it a fresh id.
    ///
    /// Returns the assigned id, or `None` when the section does not exist.
    pub fn add_widget(&mut self, section_id: &str, draft: WidgetDraft) -> Option<String> {
        if self.snapshot().section(section_id).is_none() {
            tracing::debug!(section_id, "add_widget ignored: unknown section");
            return None;
        }

        let id = self.fresh_id();
        let widget = draft.into_widget(id.clone());
        self.store.dispatch(DashboardMessage::AddWidget {
            section_id: section_id.to_string(),
            widget,
        });
        tracing::debug!(
            section_id,
            widget_id = %id,
            widgets = self.snapshot().widget_count(section_id).unwrap_or_default(),
            "widget added"
        );
        Some(id)
    }

    /// Remove a widget from a section. Returns false if nothing was removed.
    pub fn remove_widget(&mut self, section_id: &str, widget_id: &str) -> bool {
        let transition = self.store.dispatch(DashboardMessage::RemoveWidget {
            section_id: section_id.to_string(),
            widget_id: widget_id.to_string(),
        });
        if transition.is_changed() {
            tracing::debug!(
                section_id,
                widget_id,
                widgets = self.snapshot().widget_count(section_id).unwrap_or_default(),
                "widget removed"
            );
        } else {
            tracing::debug!(section_id, widget_id, "remove_widget ignored: no match");
        }
        transition.is_changed()
    }

    /// Subscribe to data changes.
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: Fn(&DashboardData) + Send + Sync + 'static,
    {
        self.store.subscribe(callback)
    }

    /// Remove a subscriber.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.store.unsubscribe(id)
    }

    // Generator output is only a candidate: ids loaded from a manifest may
    // already use it.
    fn fresh_id(&mut self) -> String {
        let candidate = self.ids.next_id();
        if !self.snapshot().contains_widget_id(&candidate) {
            return candidate;
        }
        let mut n = 2u64;
        loop {
            let id = format!("{candidate}-{n}");
            if !self.snapshot().contains_widget_id(&id) {
                return id;
            }
            n += 1;
        }
    }
}

impl<G: IdGenerator + std::fmt::Debug> std::fmt::Debug for DashboardStore<G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DashboardStore")
            .field("store", &self.store)
            .field("ids", &self.ids)
            .finish()
    }
}
