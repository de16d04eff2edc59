//! SQL schema definitions for the well database.
//!
//! The schema is applied as a single batch when an in-memory database is
//! initialized. File-backed databases opened read-only are expected to
//! already carry it.

/// Returns the full SQL schema as a single batch string.
///
/// This creates the following tables:
///
/// - `wells` - Completion master data (completion id, legal well name, map coordinates)
/// - `well_types` - Type and reservoir tags keyed by completion id
/// - `production` - Production rows (completion id, date, oil, gas, water, days on)
/// - `injection` - Injection rows (completion id, date, injected water, pressure)
///
/// History tables have no primary key: the field database occasionally
/// reports the same period twice, and those rows are combined at
/// aggregation time rather than overwritten here.
pub fn create_schema() -> &'static str {
    r#"
    CREATE TABLE IF NOT EXISTS wells (
        well_id TEXT PRIMARY KEY,
        well_name TEXT NOT NULL,
        x REAL NOT NULL,
        y REAL NOT NULL
    );

    CREATE TABLE IF NOT EXISTS well_types (
        well_id TEXT PRIMARY KEY,
        well_type TEXT NOT NULL,
        reservoir TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS production (
        well_id TEXT NOT NULL,
        date TEXT NOT NULL,
        oil REAL NOT NULL,
        gas REAL NOT NULL,
        water REAL NOT NULL,
        days_on REAL NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_prod_well ON production(well_id);
    CREATE INDEX IF NOT EXISTS idx_prod_date ON production(date);

    CREATE TABLE IF NOT EXISTS injection (
        well_id TEXT NOT NULL,
        date TEXT NOT NULL,
        water_injected REAL NOT NULL,
        pressure REAL
    );
    CREATE INDEX IF NOT EXISTS idx_inj_well ON injection(well_id);
    CREATE INDEX IF NOT EXISTS idx_inj_date ON injection(date);
    "#
}
