//! Add-widget panel: category tabs, predefined widget checkboxes and the
//! typed widget builder behind one confirm action.

use crate::builder::{TabChanged, WidgetBuilder};
use crate::catalog::PredefinedCatalog;
use std::collections::BTreeSet;
use widgetboard_core::{Category, SectionKind, WidgetDraft};

/// Section targeted when the panel is opened from the dashboard header.
pub const HEADER_SECTION: &str = "cspm";

/// Drafts produced by confirming the panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelSubmission {
    /// Section the drafts go to
    pub section_id: String,
    /// Drafts in submission order
    pub drafts: Vec<WidgetDraft>,
}

/// Slide-out panel state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddWidgetPanel {
    open: bool,
    target: Option<String>,
    builder: WidgetBuilder,
    catalog: PredefinedCatalog,
    toggled: BTreeSet<(Category, usize)>,
}

impl Default for AddWidgetPanel {
    fn default() -> Self {
        Self::new(PredefinedCatalog::default())
    }
}

impl AddWidgetPanel {
    /// Create a closed panel offering `catalog`.
    #[must_use]
    pub fn new(catalog: PredefinedCatalog) -> Self {
        Self {
            open: false,
            target: None,
            builder: WidgetBuilder::new(),
            catalog,
            toggled: BTreeSet::new(),
        }
    }

    /// Open for a section; the active tab follows the section's category.
    pub fn open_for_section(&mut self, section_id: &str) {
        self.reset_form();
        self.builder = WidgetBuilder::with_tab(SectionKind::category_for(section_id));
        self.target = Some(section_id.to_string());
        self.open = true;
        tracing::debug!(section_id, tab = %self.builder.tab(), "add-widget panel opened");
    }

    /// Open from the dashboard header, targeting [`HEADER_SECTION`].
    pub fn open_from_header(&mut self) {
        self.open_for_section(HEADER_SECTION);
    }

    /// Close, dropping the target and any form state.
    pub fn close(&mut self) {
        self.open = false;
        self.target = None;
        self.reset_form();
    }

    /// Whether the panel is shown.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    /// Section the panel adds to.
    #[must_use]
    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    /// Typed widget builder.
    #[must_use]
    pub const fn builder(&self) -> &WidgetBuilder {
        &self.builder
    }

    /// Mutable typed widget builder.
    pub fn builder_mut(&mut self) -> &mut WidgetBuilder {
        &mut self.builder
    }

    /// Predefined widgets on offer.
    #[must_use]
    pub const fn catalog(&self) -> &PredefinedCatalog {
        &self.catalog
    }

    /// Active tab.
    #[must_use]
    pub const fn tab(&self) -> Category {
        self.builder.tab()
    }

    /// Switch tab. Predefined selections on other tabs are kept.
    pub fn select_tab(&mut self, tab: Category) -> Option<TabChanged> {
        self.builder.select_tab(tab)
    }

    /// Toggle a predefined widget. Returns false for an unknown entry.
    pub fn toggle_predefined(&mut self, category: Category, index: usize) -> bool {
        if self.catalog.get(category, index).is_none() {
            return false;
        }
        let key = (category, index);
        if !self.toggled.remove(&key) {
            self.toggled.insert(key);
        }
        true
    }

    /// Whether a predefined widget is checked.
    #[must_use]
    pub fn is_toggled(&self, category: Category, index: usize) -> bool {
        self.toggled.contains(&(category, index))
    }

    /// Whether confirm is enabled.
    #[must_use]
    pub fn can_confirm(&self) -> bool {
        self.open && self.target.is_some() && (self.builder.can_confirm() || !self.toggled.is_empty())
    }

    /// Collect drafts and close.
    ///
    /// Checked predefined widgets come first in tab then catalog order,
    /// followed by the builder's widget. Returns `None` and keeps state when
    /// confirm is disabled.
    pub fn confirm(&mut self) -> Option<PanelSubmission> {
        if !self.can_confirm() {
            return None;
        }
        let section_id = self.target.clone()?;

        let mut drafts: Vec<WidgetDraft> = self
            .toggled
            .iter()
            .filter_map(|(category, index)| self.catalog.get(*category, *index).cloned())
            .collect();
        drafts.extend(self.builder.build());

        tracing::debug!(section_id = %section_id, count = drafts.len(), "add-widget panel confirmed");
        self.close();
        Some(PanelSubmission { section_id, drafts })
    }

    fn reset_form(&mut self) {
        self.builder.reset();
        self.toggled.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::WidgetType;

    #[test]
    fn test_starts_closed() {
        let panel = AddWidgetPanel::default();
        assert!(!panel.is_open());
        assert!(!panel.can_confirm());
        assert_eq!(panel.target(), None);
    }

    #[test]
    fn test_open_for_section_sets_tab() {
        let mut panel = AddWidgetPanel::default();
        panel.open_for_section("registry");
        assert!(panel.is_open());
        assert_eq!(panel.tab(), Category::Image);
        assert_eq!(panel.target(), Some("registry"));

        panel.open_for_section("unknown");
        assert_eq!(panel.tab(), Category::Cspm);
    }

    #[test]
    fn test_open_from_header() {
        let mut panel = AddWidgetPanel::default();
        panel.open_from_header();
        assert_eq!(panel.target(), Some("cspm"));
        assert_eq!(panel.tab(), Category::Cspm);
    }

    #[test]
    fn test_confirm_disabled_without_selection() {
        let mut panel = AddWidgetPanel::default();
        panel.open_for_section("cspm");
        assert!(!panel.can_confirm());
        assert_eq!(panel.confirm(), None);
        assert!(panel.is_open());
    }

    #[test]
    fn test_confirm_builder_widget() {
        let mut panel = AddWidgetPanel::default();
        panel.open_for_section("cspm");
        panel.builder_mut().select_type(WidgetType::CloudAccounts);
        panel.builder_mut().set_input("connected", "3");

        let submission = panel.confirm().unwrap();
        assert_eq!(submission.section_id, "cspm");
        assert_eq!(submission.drafts.len(), 1);
        assert_eq!(submission.drafts[0].data.as_ref().unwrap().total, 3);
        assert!(!panel.is_open());
        assert_eq!(panel.target(), None);
    }

    #[test]
    fn test_confirm_predefined_order() {
        let mut panel = AddWidgetPanel::default();
        panel.open_for_section("ticket");
        assert!(panel.toggle_predefined(Category::Ticket, 1));
        assert!(panel.toggle_predefined(Category::Cspm, 0));
        assert!(panel.toggle_predefined(Category::Ticket, 0));

        let names: Vec<_> = panel
            .confirm()
            .unwrap()
            .drafts
            .into_iter()
            .map(|d| d.name)
            .collect();
        assert_eq!(names, ["Widget 1", "Support Tickets", "Incident Response"]);
    }

    #[test]
    fn test_predefined_then_builder() {
        let mut panel = AddWidgetPanel::default();
        panel.open_for_section("cwpp");
        panel.toggle_predefined(Category::Cwpp, 0);
        panel.builder_mut().select_type(WidgetType::CwppCustom);
        panel.builder_mut().set_input("title", "Mine");

        let drafts = panel.confirm().unwrap().drafts;
        assert_eq!(drafts.len(), 2);
        assert_eq!(drafts[0].name, "Widget 2");
        assert_eq!(drafts[1].name, "Mine");
    }

    #[test]
    fn test_toggle_twice_unchecks() {
        let mut panel = AddWidgetPanel::default();
        panel.open_for_section("cspm");
        panel.toggle_predefined(Category::Cspm, 1);
        assert!(panel.is_toggled(Category::Cspm, 1));
        panel.toggle_predefined(Category::Cspm, 1);
        assert!(!panel.is_toggled(Category::Cspm, 1));
        assert!(!panel.can_confirm());
    }

    #[test]
    fn test_toggle_unknown_entry() {
        let mut panel = AddWidgetPanel::default();
        assert!(!panel.toggle_predefined(Category::Image, 9));
    }

    #[test]
    fn test_tab_change_keeps_toggles_clears_type() {
        let mut panel = AddWidgetPanel::default();
        panel.open_for_section("cspm");
        panel.toggle_predefined(Category::Cspm, 0);
        panel.builder_mut().select_type(WidgetType::CloudAccounts);

        assert!(panel.select_tab(Category::Image).is_some());
        assert!(panel.is_toggled(Category::Cspm, 0));
        assert_eq!(panel.builder().selected_type(), None);
    }

    #[test]
    fn test_close_resets() {
        let mut panel = AddWidgetPanel::default();
        panel.open_for_section("cspm");
        panel.toggle_predefined(Category::Cspm, 0);
        panel.builder_mut().select_type(WidgetType::CloudAccounts);
        panel.close();

        assert!(!panel.is_open());
        assert!(!panel.is_toggled(Category::Cspm, 0));
        assert_eq!(panel.builder().selected_type(), None);
    }

    #[test]
    fn test_reopen_clears_previous_form() {
        let mut panel = AddWidgetPanel::default();
        panel.open_for_section("cspm");
        panel.builder_mut().select_type(WidgetType::CloudAccounts);
        panel.open_for_section("cspm");
        assert!(!panel.can_confirm());
    }
}
