//! SQLite store layer for well master data and production/injection history.
//!
//! This crate is the concrete store behind the [`wpv_core::WellSource`]
//! interface. It can either load CSV exports of the field database into an
//! in-memory SQLite database, or open an existing SQLite file read-only.
//!
//! # Architecture
//!
//! - `Rc<RefCell<Connection>>` wrapper; the store has a single logical user
//! - In-memory SQLite via `rusqlite` for CSV-backed sessions
//! - Typed query methods returning [`wpv_core`] records; dates are parsed and
//!   validated here so nothing downstream handles loosely typed rows
//!
//! # Usage
//!
//! ```rust
//! use wpv_db::Database;
//!
//! let db = Database::new().unwrap();
//!
//! db.load_wells("WELL_LEGAL_NAME,COMPLETION_LEGAL_NAME,COMPLETION_COORDINATE_X,COMPLETION_COORDINATE_Y\nSCH-012,SCH-012:UI,290100.5,9970200.0\n").unwrap();
//! db.load_production("COMP_S_NAME,PROD_DT,VO_OIL_PROD,VO_GAS_PROD,VO_WAT_PROD,DIAS_ON\nSCH-012:UI,2024-01-31,3100,410,950,31\n").unwrap();
//!
//! let wells = db.query_wells().unwrap();
//! let production = db.query_production(&["SCH-012:UI".to_string()]).unwrap();
//! assert_eq!(wells.len(), 1);
//! assert_eq!(production.len(), 1);
//! ```
//!
//! # Tables
//!
//! See [`schema::create_schema`] for the full SQL schema.
//!
//! - `wells` - Completion master data (legal name, coordinates)
//! - `well_types` - Type and reservoir tags per completion
//! - `production` - Monthly oil, gas, water volumes and days on
//! - `injection` - Monthly injected water volume and pressure

pub mod schema;
mod loader;
mod queries;
mod source;

use rusqlite::{Connection, OpenFlags};
use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

/// SQLite database holding wells and their history.
///
/// This struct is cheaply cloneable (via `Rc`); clones share one connection.
///
/// # Example
///
/// ```rust
/// use wpv_db::Database;
///
/// let db = Database::new().unwrap();
/// db.load_wells("WELL_LEGAL_NAME,COMPLETION_LEGAL_NAME,COMPLETION_COORDINATE_X,COMPLETION_COORDINATE_Y\nSCH-012,SCH-012:UI,290100.5,9970200.0\n").unwrap();
/// let wells = db.query_wells().unwrap();
/// assert_eq!(wells.len(), 1);
/// ```
#[derive(Clone, Debug)]
pub struct Database {
    conn: Rc<RefCell<Connection>>,
}

impl Database {
    /// Create a new in-memory database with the full schema applied.
    ///
    /// The database is empty after creation; use the `load_*` methods
    /// to populate it with CSV data.
    pub fn new() -> anyhow::Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(schema::create_schema())?;
        Ok(Self {
            conn: Rc::new(RefCell::new(conn)),
        })
    }

    /// Open an existing database file read-only.
    ///
    /// The file must already contain the tables from [`schema::create_schema`].
    pub fn open_read_only(path: &Path) -> anyhow::Result<Self> {
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        log::info!("[WPV] db: opened {} read-only", path.display());
        Ok(Self {
            conn: Rc::new(RefCell::new(conn)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WELLS_CSV: &str = "\
WELL_LEGAL_NAME,COMPLETION_LEGAL_NAME,COMPLETION_COORDINATE_X,COMPLETION_COORDINATE_Y
SCH-012,SCH-012:UI,290100.5,9970200.0
";

    #[test]
    fn database_creates_successfully() {
        let db = Database::new();
        assert!(db.is_ok(), "Database should create without errors");
    }

    #[test]
    fn database_is_cloneable() {
        let db = Database::new().unwrap();
        let db2 = db.clone();
        // Both should reference the same underlying connection
        db.load_wells(WELLS_CSV).unwrap();
        let wells = db2.query_wells().unwrap();
        assert_eq!(wells.len(), 1, "Clone should see same data via shared Rc");
    }

    #[test]
    fn database_starts_empty() {
        let db = Database::new().unwrap();
        let wells = db.query_wells().unwrap();
        assert!(wells.is_empty(), "New database should have no wells");
    }

    #[test]
    fn open_read_only_fails_for_missing_file() {
        let path = std::env::temp_dir().join("wpv-db-does-not-exist.sqlite");
        assert!(Database::open_read_only(&path).is_err());
    }
}
