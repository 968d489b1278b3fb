//! Dashboard composition: the store, the add-widget panel and the search
//! query wired together.

use widgetboard_core::{DashboardData, DashboardStore, Section, SubscriptionId};
use widgetboard_widgets::{filter_sections, AddWidgetPanel, FilterOutcome, PredefinedCatalog};
use widgetboard_yaml::Manifest;

/// A single-page dashboard session.
#[derive(Debug)]
pub struct Dashboard {
    title: String,
    store: DashboardStore,
    panel: AddWidgetPanel,
    search: String,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::from_manifest(&Manifest::default())
    }
}

impl Dashboard {
    /// Create a dashboard from its parts.
    #[must_use]
    pub fn new(title: impl Into<String>, data: DashboardData, catalog: PredefinedCatalog) -> Self {
        Self {
            title: title.into(),
            store: DashboardStore::new(data),
            panel: AddWidgetPanel::new(catalog),
            search: String::new(),
        }
    }

    /// Create a dashboard from a manifest.
    #[must_use]
    pub fn from_manifest(manifest: &Manifest) -> Self {
        Self::new(
            manifest.title.clone(),
            manifest.dashboard_data(),
            manifest.predefined.clone(),
        )
    }

    /// Dashboard heading.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Current data.
    #[must_use]
    pub const fn snapshot(&self) -> &DashboardData {
        self.store.snapshot()
    }

    /// All sections, unfiltered.
    #[must_use]
    pub fn sections(&self) -> &[Section] {
        self.store.sections()
    }

    /// Add-widget panel.
    #[must_use]
    pub const fn panel(&self) -> &AddWidgetPanel {
        &self.panel
    }

    /// Mutable add-widget panel, for tab, type and input changes.
    pub fn panel_mut(&mut self) -> &mut AddWidgetPanel {
        &mut self.panel
    }

    /// Open the panel for a section's "Add Widget" card.
    pub fn open_add_widget(&mut self, section_id: &str) {
        self.panel.open_for_section(section_id);
    }

    /// Open the panel from the header button.
    pub fn open_add_widget_from_header(&mut self) {
        self.panel.open_from_header();
    }

    /// Close the panel without adding anything.
    pub fn close_add_widget(&mut self) {
        self.panel.close();
    }

    /// Confirm the panel, adding every draft to the target section.
    ///
    /// Returns the ids of the added widgets; empty when confirm is disabled
    /// or the target section does not exist.
    pub fn confirm_add_widget(&mut self) -> Vec<String> {
        let Some(submission) = self.panel.confirm() else {
            return Vec::new();
        };
        let requested = submission.drafts.len();
        let ids: Vec<String> = submission
            .drafts
            .into_iter()
            .filter_map(|draft| self.store.add_widget(&submission.section_id, draft))
            .collect();
        tracing::debug!(
            section = %submission.section_id,
            requested,
            added = ids.len(),
            "widgets added"
        );
        ids
    }

    /// Remove a widget card. No confirmation step.
    pub fn remove_widget(&mut self, section_id: &str, widget_id: &str) -> bool {
        self.store.remove_widget(section_id, widget_id)
    }

    /// Replace the search text.
    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search = query.into();
    }

    /// Current search text.
    #[must_use]
    pub fn search_query(&self) -> &str {
        &self.search
    }

    /// Sections and widgets to show under the current search.
    #[must_use]
    pub fn visible_sections(&self) -> FilterOutcome<'_> {
        filter_sections(self.store.sections(), &self.search)
    }

    /// Render the visible sections as plain text.
    #[must_use]
    pub fn render_text(&self) -> String {
        crate::render::render_text(&self.title, &self.visible_sections())
    }

    /// Subscribe to data changes.
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: Fn(&DashboardData) + Send + Sync + 'static,
    {
        self.store.subscribe(callback)
    }

    /// Remove a data subscriber.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.store.unsubscribe(id)
    }
}
