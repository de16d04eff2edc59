//! CSV data loading functions for populating the in-memory SQLite database.
//!
//! Each loader parses CSV data from a string slice and inserts rows into the
//! corresponding table. The CSV formats are the table exports of the field
//! database, headers included, columns read by position.
//!
//! # CSV Formats
//!
//! - **Wells**: `WELL_LEGAL_NAME,COMPLETION_LEGAL_NAME,COMPLETION_COORDINATE_X,COMPLETION_COORDINATE_Y`
//! - **Well types**: `COMPLETION_LEGAL_NAME,TIPO_POZO,RESERVORIO`
//! - **Production**: `COMP_S_NAME,PROD_DT,VO_OIL_PROD,VO_GAS_PROD,VO_WAT_PROD,DIAS_ON`
//! - **Injection**: `COMPLETION_LEGAL_NAME,Date,Water_INJ_CALDAY,press_iny`
//!
//! Dates may be `YYYY-MM-DD`, `YYYYMMDD` or `YYYY-MM-DD HH:MM:SS`; they are
//! normalized to `YYYY-MM-DD` on insert.

use crate::Database;
use rusqlite::params;
use wpv_core::dates::{format_date, parse_record_date};

/// Parse a numeric cell. NaN and infinities are rejected like any other
/// non-numeric text, since SQLite cannot store them in a REAL column.
fn parse_number(field: Option<&str>) -> Option<f64> {
    field
        .and_then(|s| s.trim().parse().ok())
        .filter(|v: &f64| v.is_finite())
}

/// Parse a volume column. Empty cells are a zero volume; anything else
/// non-numeric makes the row unusable.
fn parse_volume(field: Option<&str>) -> Option<f64> {
    if field.unwrap_or("").trim().is_empty() {
        Some(0.0)
    } else {
        parse_number(field)
    }
}

fn normalize_date(field: Option<&str>) -> Option<String> {
    parse_record_date(field.unwrap_or(""))
        .ok()
        .map(|date| format_date(&date))
}

impl Database {
    /// Load completion master data from CSV string.
    ///
    /// Expected format (with headers):
    /// `WELL_LEGAL_NAME,COMPLETION_LEGAL_NAME,COMPLETION_COORDINATE_X,COMPLETION_COORDINATE_Y`
    ///
    /// Rows without a completion id, a well name, or numeric coordinates are
    /// skipped since they cannot be placed on the map. A completion id that
    /// appears twice keeps its first row; later rows count as skipped.
    ///
    /// # Example CSV
    /// ```text
    /// WELL_LEGAL_NAME,COMPLETION_LEGAL_NAME,COMPLETION_COORDINATE_X,COMPLETION_COORDINATE_Y
    /// SCH-012,SCH-012:UI,290100.5,9970200.0
    /// ```
    pub fn load_wells(&self, csv_data: &str) -> anyhow::Result<()> {
        let conn = self.conn.borrow();
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(csv_data.as_bytes());

        let mut count = 0u32;
        let mut skipped = 0u32;
        for result in rdr.records() {
            let r = result?;
            let well_name = r.get(0).unwrap_or("").trim();
            let well_id = r.get(1).unwrap_or("").trim();
            let x = parse_number(r.get(2));
            let y = parse_number(r.get(3));

            let (Some(x), Some(y)) = (x, y) else {
                skipped += 1;
                continue;
            };
            if well_id.is_empty() || well_name.is_empty() {
                skipped += 1;
                continue;
            }

            let inserted = conn.execute(
                "INSERT OR IGNORE INTO wells (well_id, well_name, x, y)
                 VALUES (?1, ?2, ?3, ?4)",
                params![well_id, well_name, x, y],
            )?;
            if inserted == 0 {
                log::warn!("[WPV] loader: duplicate well {}, keeping the first row", well_id);
                skipped += 1;
                continue;
            }
            count += 1;
        }
        log::info!("[WPV] loader: Loaded {} wells, skipped {} invalid", count, skipped);
        Ok(())
    }

    /// Load well type and reservoir tags from CSV string.
    ///
    /// Expected format (with headers): `COMPLETION_LEGAL_NAME,TIPO_POZO,RESERVORIO`
    ///
    /// Tags for completions that are not in `wells` are kept; they are simply
    /// never joined.
    ///
    /// # Example CSV
    /// ```text
    /// COMPLETION_LEGAL_NAME,TIPO_POZO,RESERVORIO
    /// SCH-012:UI,PRODUCTOR,U INFERIOR
    /// ```
    pub fn load_well_types(&self, csv_data: &str) -> anyhow::Result<()> {
        let conn = self.conn.borrow();
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(csv_data.as_bytes());

        let mut count = 0u32;
        for result in rdr.records() {
            let r = result?;
            let well_id = r.get(0).unwrap_or("").trim();
            let well_type = r.get(1).unwrap_or("").trim();
            let reservoir = r.get(2).unwrap_or("").trim();
            if well_id.is_empty() {
                continue;
            }

            conn.execute(
                "INSERT OR REPLACE INTO well_types (well_id, well_type, reservoir)
                 VALUES (?1, ?2, ?3)",
                params![well_id, well_type, reservoir],
            )?;
            count += 1;
        }
        log::info!("[WPV] loader: Loaded {} well type tags", count);
        Ok(())
    }

    /// Load production history from CSV string.
    ///
    /// Expected format (with headers):
    /// `COMP_S_NAME,PROD_DT,VO_OIL_PROD,VO_GAS_PROD,VO_WAT_PROD,DIAS_ON`
    ///
    /// Empty volume cells load as zero. Rows with an empty completion id, an
    /// unparseable date, or a non-numeric volume (including `nan` and `inf`)
    /// are skipped.
    ///
    /// # Example CSV
    /// ```text
    /// COMP_S_NAME,PROD_DT,VO_OIL_PROD,VO_GAS_PROD,VO_WAT_PROD,DIAS_ON
    /// SCH-012:UI,2024-01-31,3100,410,950,31
    /// SCH-012:UI,2024-02-29,2900,,1010,29
    /// ```
    pub fn load_production(&self, csv_data: &str) -> anyhow::Result<()> {
        let conn = self.conn.borrow();
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(csv_data.as_bytes());

        let mut count = 0u32;
        let mut skipped = 0u32;
        for result in rdr.records() {
            let r = result?;
            let well_id = r.get(0).unwrap_or("").trim();
            let date = normalize_date(r.get(1));
            let oil = parse_volume(r.get(2));
            let gas = parse_volume(r.get(3));
            let water = parse_volume(r.get(4));
            let days_on = parse_volume(r.get(5));

            let (Some(date), Some(oil), Some(gas), Some(water), Some(days_on)) =
                (date, oil, gas, water, days_on)
            else {
                skipped += 1;
                continue;
            };
            if well_id.is_empty() {
                skipped += 1;
                continue;
            }

            conn.execute(
                "INSERT INTO production (well_id, date, oil, gas, water, days_on)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![well_id, date, oil, gas, water, days_on],
            )?;
            count += 1;
        }
        log::info!(
            "[WPV] loader: Loaded {} production rows, skipped {} invalid",
            count,
            skipped
        );
        Ok(())
    }

    /// Load injection history from CSV string.
    ///
    /// Expected format (with headers):
    /// `COMPLETION_LEGAL_NAME,Date,Water_INJ_CALDAY,press_iny`
    ///
    /// An empty, non-numeric or non-finite pressure is stored as NULL. Rows with an empty
    /// completion id, an unparseable date, or a non-numeric volume are skipped.
    ///
    /// # Example CSV
    /// ```text
    /// COMPLETION_LEGAL_NAME,Date,Water_INJ_CALDAY,press_iny
    /// SCH-050:TI,2024-01-31,12000,1850
    /// SCH-050:TI,2024-02-29,11800,
    /// ```
    pub fn load_injection(&self, csv_data: &str) -> anyhow::Result<()> {
        let conn = self.conn.borrow();
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(csv_data.as_bytes());

        let mut count = 0u32;
        let mut skipped = 0u32;
        for result in rdr.records() {
            let r = result?;
            let well_id = r.get(0).unwrap_or("").trim();
            let date = normalize_date(r.get(1));
            let water_injected = parse_volume(r.get(2));
            let pressure = parse_number(r.get(3));

            let (Some(date), Some(water_injected)) = (date, water_injected) else {
                skipped += 1;
                continue;
            };
            if well_id.is_empty() {
                skipped += 1;
                continue;
            }

            conn.execute(
                "INSERT INTO injection (well_id, date, water_injected, pressure)
                 VALUES (?1, ?2, ?3, ?4)",
                params![well_id, date, water_injected, pressure],
            )?;
            count += 1;
        }
        log::info!(
            "[WPV] loader: Loaded {} injection rows, skipped {} invalid",
            count,
            skipped
        );
        Ok(())
    }
}
