//! Core types for the well production viewer.
//!
//! Everything downstream (the SQLite store, the aggregation engine, the CLI)
//! speaks in terms of the types defined here:
//!
//! - [`well::Well`]: master data for one completion (id, legal name, map
//!   coordinates, type and reservoir tags)
//! - [`record::ProductionRecord`] / [`record::InjectionRecord`]: one reporting
//!   period of history for one well
//! - [`source::WellSource`]: the read-only store interface
//! - [`error::WellError`]: the error taxonomy surfaced to callers

pub mod dates;
pub mod error;
pub mod record;
pub mod source;
pub mod well;

pub use error::WellError;
pub use record::{InjectionRecord, ProductionRecord};
pub use source::WellSource;
pub use well::{Well, WellId};
