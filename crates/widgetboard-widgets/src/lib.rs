//! Stateful dashboard logic for widgetboard: the widget-type catalog, the
//! widget builder, the add-widget panel and the section search filter.

pub mod builder;
pub mod catalog;
pub mod filter;
pub mod input;
pub mod panel;

pub use builder::{synthesize, BuilderState, TabChanged, WidgetBuilder};
pub use catalog::{FieldKind, FieldSpec, PredefinedCatalog, WidgetType};
pub use filter::{filter_sections, FilterOutcome, FilteredSection};
pub use input::{parse_count, MAX_COUNT};
pub use panel::{AddWidgetPanel, PanelSubmission, HEADER_SECTION};
