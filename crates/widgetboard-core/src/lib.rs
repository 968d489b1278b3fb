//! Core types for the widgetboard dashboard.
//!
//! This crate provides the foundation used by the other widgetboard crates:
//! - Data model: [`Widget`], [`Section`], [`ChartWidgetData`], [`Category`]
//! - Chart math: [`donut_arcs`], [`progress_widths`]
//! - State: [`Store`] and the dashboard-specific [`DashboardStore`]
//! - Segment palette: [`ColorToken`]

mod chart;
mod color;
mod dashboard;
mod model;
mod state;

pub use chart::{donut_arcs, fraction, progress_widths, DonutArc, DonutGeometry};
pub use color::{Color, ColorParseError, ColorToken};
pub use dashboard::{DashboardData, DashboardMessage, DashboardStore, IdGenerator, SequentialIds};
pub use model::{
    Category, ChartKind, ChartWidgetData, Section, SectionKind, Segment, UnknownCategory, Widget,
    WidgetDraft,
};
pub use state::{State, Store, SubscriptionId, Transition};
