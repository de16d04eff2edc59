//! Selection-driven aggregation of well production and injection series.
//!
//! This crate turns the wells a user has picked into chart-ready series:
//! the [`catalog::WellCatalog`] knows every plottable well, the
//! [`selection::SelectionState`] tracks which of them are picked, the
//! [`repository::SeriesRepository`] fetches their history, and
//! [`aggregation::aggregate`] combines it per date before
//! [`projector`] hands it to the chart surface. [`session::Session`] wires
//! the pieces into one cycle per selection change.

pub mod aggregation;
pub mod catalog;
pub mod projector;
pub mod rates;
pub mod repository;
pub mod search;
pub mod selection;
pub mod session;

pub use aggregation::{aggregate, AggregatedSeries, Aggregation, Metric, SeriesPoint};
pub use catalog::{CatalogOptions, WellCatalog};
pub use projector::{project, project_all, ChartLine, ChartPayload, DateValue};
pub use repository::{InjectionByWell, ProductionByWell, SeriesRepository};
pub use search::SearchIndex;
pub use selection::{SearchPolicy, SelectionState};
pub use session::{Charts, CycleOutcome, CycleTicket, Session};
