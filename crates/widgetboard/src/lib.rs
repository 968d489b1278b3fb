//! Widgetboard: a categorized dashboard of widget cards.
//!
//! Sections hold widgets; widgets carry either a donut chart, a progress
//! bar or plain text. Widgets are added through a builder panel, removed
//! per card, and searched across every section.
//!
//! # Quick Start
//!
//! ```
//! use widgetboard::{Dashboard, WidgetType};
//!
//! let mut dashboard = Dashboard::default();
//! dashboard.open_add_widget("cspm");
//! let builder = dashboard.panel_mut().builder_mut();
//! builder.select_type(WidgetType::CloudAccounts);
//! builder.set_input("connected", "3");
//! builder.set_input("not-connected", "1");
//!
//! let ids = dashboard.confirm_add_widget();
//! assert_eq!(ids.len(), 1);
//! assert_eq!(dashboard.snapshot().widget_count("cspm"), Some(3));
//! ```

mod app;
pub mod render;

pub use app::Dashboard;
pub use render::{progress_bar, render_text, render_widget, visible_snapshot};

pub use widgetboard_core::*;
pub use widgetboard_widgets::{
    filter_sections, parse_count, synthesize, AddWidgetPanel, BuilderState, FieldKind, FieldSpec,
    FilterOutcome, FilteredSection, PanelSubmission, PredefinedCatalog, TabChanged, WidgetBuilder,
    WidgetType, HEADER_SECTION,
};
pub use widgetboard_yaml::{Manifest, ManifestError, ValidationIssue};

/// Stateful widget logic.
pub mod widgets {
    pub use widgetboard_widgets::*;
}

/// Manifest loading.
pub mod yaml {
    pub use widgetboard_yaml::*;
}
