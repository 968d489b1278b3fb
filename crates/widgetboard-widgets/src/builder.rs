//! Widget builder: turns a selected widget type plus raw form inputs into a
//! [`WidgetDraft`].
//!
//! The builder is a small state machine:
//!
//! ```text
//! NoTypeSelected --select_type--> Editing(type) --build--> NoTypeSelected
//!        ^                             |
//!        +------- select_tab ----------+
//! ```
//!
//! Changing to a different category tab always returns to `NoTypeSelected`
//! and clears the form.

use crate::catalog::{FieldKind, WidgetType};
use crate::input::parse_count;
use std::collections::BTreeMap;
use widgetboard_core::{
    Category, ChartKind, ChartWidgetData, ColorToken, Segment, WidgetDraft,
};

/// Builder state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuilderState {
    /// No widget type chosen; confirm is disabled
    NoTypeSelected,
    /// A type is chosen and its form is shown
    Editing(WidgetType),
}

/// Message emitted when the active tab changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabChanged {
    /// Previously active tab
    pub from: Category,
    /// Newly active tab
    pub to: Category,
}

/// Form state for synthesizing one widget.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WidgetBuilder {
    tab: Category,
    selected: Option<WidgetType>,
    inputs: BTreeMap<&'static str, String>,
}

impl WidgetBuilder {
    /// Create a builder on the CSPM tab.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder on the given tab.
    #[must_use]
    pub fn with_tab(tab: Category) -> Self {
        Self {
            tab,
            ..Self::default()
        }
    }

    /// Active category tab.
    #[must_use]
    pub const fn tab(&self) -> Category {
        self.tab
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> BuilderState {
        match self.selected {
            Some(ty) => BuilderState::Editing(ty),
            None => BuilderState::NoTypeSelected,
        }
    }

    /// Selected widget type.
    #[must_use]
    pub const fn selected_type(&self) -> Option<WidgetType> {
        self.selected
    }

    /// Types offered on the active tab.
    #[must_use]
    pub const fn available_types(&self) -> &'static [WidgetType] {
        WidgetType::for_category(self.tab)
    }

    /// Switch category tab.
    ///
    /// A different tab clears the selected type and the form; the same tab
    /// leaves everything untouched.
    pub fn select_tab(&mut self, tab: Category) -> Option<TabChanged> {
        if tab == self.tab {
            return None;
        }
        let change = TabChanged { from: self.tab, to: tab };
        self.tab = tab;
        self.clear_form();
        tracing::debug!(from = %change.from, to = %change.to, "builder tab changed");
        Some(change)
    }

    /// Choose a widget type from the active tab.
    ///
    /// Returns false, leaving state unchanged, when the type is not offered
    /// on the active tab. Choosing a different type clears the form.
    pub fn select_type(&mut self, ty: WidgetType) -> bool {
        if ty.category() != self.tab {
            return false;
        }
        if self.selected != Some(ty) {
            self.inputs.clear();
            self.selected = Some(ty);
            tracing::debug!(widget_type = %ty, "builder type selected");
        }
        true
    }

    /// Set a raw form value.
    ///
    /// Returns false when no type is selected or the key is not one of the
    /// selected type's fields.
    pub fn set_input(&mut self, key: &str, value: impl Into<String>) -> bool {
        let Some(field) = self.selected.and_then(|ty| ty.field(key)) else {
            return false;
        };
        self.inputs.insert(field.key, value.into());
        true
    }

    /// Raw form value; empty when unset.
    #[must_use]
    pub fn input(&self, key: &str) -> &str {
        self.inputs.get(key).map_or("", String::as_str)
    }

    /// Whether confirm is enabled.
    #[must_use]
    pub const fn can_confirm(&self) -> bool {
        self.selected.is_some()
    }

    /// Draft the current form would produce, without resetting.
    #[must_use]
    pub fn preview(&self) -> Option<WidgetDraft> {
        self.selected.map(|ty| synthesize(ty, |key| self.input(key)))
    }

    /// Produce a draft and reset the form.
    ///
    /// Returns `None`, leaving state unchanged, when no type is selected.
    pub fn build(&mut self) -> Option<WidgetDraft> {
        let draft = self.preview()?;
        tracing::debug!(name = %draft.name, category = %draft.category, "builder submitted");
        self.clear_form();
        Some(draft)
    }

    /// Return to `NoTypeSelected`, clearing inputs and keeping the tab.
    pub fn reset(&mut self) {
        self.clear_form();
    }

    fn clear_form(&mut self) {
        self.selected = None;
        self.inputs.clear();
    }
}

/// Build a draft for `ty`, reading raw inputs through `input`.
///
/// Count fields go through [`parse_count`]; chart totals are the exact sum of
/// the coerced values.
#[must_use]
pub fn synthesize<'a>(ty: WidgetType, input: impl Fn(&str) -> &'a str) -> WidgetDraft {
    let count = |key: &str| -> i64 {
        debug_assert!(ty.field(key).is_some_and(|f| f.kind == FieldKind::Count));
        parse_count(input(key))
    };

    match ty {
        WidgetType::CloudAccounts => WidgetDraft::text(
            ty.label(),
            "Connected and Not Connected accounts overview",
            Category::Cspm,
        )
        .with_chart(ChartWidgetData::from_segments(
            ChartKind::Donut,
            vec![
                Segment::with_token("Connected", count("connected"), ColorToken::Primary),
                Segment::with_token("Not Connected", count("not-connected"), ColorToken::Neutral),
            ],
        )),
        WidgetType::RiskAssessment => WidgetDraft::text(
            ty.label(),
            "Security risk distribution across cloud accounts",
            Category::Cspm,
        )
        .with_chart(ChartWidgetData::from_segments(
            ChartKind::Donut,
            vec![
                Segment::with_token("Failed", count("failed"), ColorToken::High),
                Segment::with_token("Warning", count("warning"), ColorToken::Medium),
                Segment::with_token("Not available", count("not-available"), ColorToken::Neutral),
                Segment::with_token("Passed", count("passed"), ColorToken::Low),
            ],
        )),
        WidgetType::ImageRisk => {
            let data = ChartWidgetData::from_segments(
                ChartKind::Progress,
                vec![
                    Segment::with_token("Critical", count("critical"), ColorToken::Critical),
                    Segment::with_token("High", count("high"), ColorToken::High),
                    Segment::with_token("Medium", count("medium"), ColorToken::Medium),
                ],
            );
            WidgetDraft::text(
                ty.label(),
                format!("{} Total Vulnerabilities breakdown by severity", data.total),
                Category::Image,
            )
            .with_chart(data)
        }
        WidgetType::ImageSecurity => {
            let data = ChartWidgetData::from_segments(
                ChartKind::Progress,
                vec![
                    Segment::with_token("Critical", count("critical"), ColorToken::Critical),
                    Segment::with_token("High", count("high"), ColorToken::High),
                    Segment::with_token("Medium", count("medium"), ColorToken::Medium),
                    Segment::with_token("Low", count("low"), ColorToken::Low),
                ],
            );
            WidgetDraft::text(
                ty.label(),
                format!("{} Total Images security analysis", data.total),
                Category::Image,
            )
            .with_chart(data)
        }
        WidgetType::CwppCustom => {
            WidgetDraft::text(input("title"), input("message"), Category::Cwpp)
        }
    }
}
