//! Typed query methods for retrieving wells and their history.
//!
//! All queries return [`wpv_core`] types. Dates are parsed here, at the
//! fetch boundary, so a malformed date in a file-backed database surfaces as
//! a query error instead of leaking loosely typed rows downstream.

use crate::Database;
use rusqlite::params_from_iter;
use wpv_core::dates::parse_date;
use wpv_core::{InjectionRecord, ProductionRecord, Well, WellId};

/// Build `?1, ?2, ... ?n` for an `IN (...)` clause.
fn placeholders(n: usize) -> String {
    (1..=n)
        .map(|i| format!("?{}", i))
        .collect::<Vec<_>>()
        .join(", ")
}

impl Database {
    /// Get master data for every well, ordered by completion id.
    ///
    /// Type and reservoir tags are joined from `well_types`; wells without
    /// tags get empty strings.
    pub fn query_wells(&self) -> anyhow::Result<Vec<Well>> {
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(
            "SELECT w.well_id, w.well_name, w.x, w.y,
                    COALESCE(t.well_type, ''), COALESCE(t.reservoir, '')
             FROM wells w
             LEFT JOIN well_types t ON w.well_id = t.well_id
             ORDER BY w.well_id",
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok(Well {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    x: row.get(2)?,
                    y: row.get(3)?,
                    well_type: row.get(4)?,
                    reservoir: row.get(5)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        log::info!("[WPV] query: query_wells returned {} records", rows.len());
        Ok(rows)
    }

    /// Get production history for the given completions.
    ///
    /// Rows are ordered by completion id then date. Completions without rows
    /// simply contribute nothing.
    pub fn query_production(&self, well_ids: &[WellId]) -> anyhow::Result<Vec<ProductionRecord>> {
        if well_ids.is_empty() {
            return Ok(Vec::new());
        }
        let conn = self.conn.borrow();
        let sql = format!(
            "SELECT well_id, date, oil, gas, water, days_on FROM production
             WHERE well_id IN ({})
             ORDER BY well_id, date",
            placeholders(well_ids.len())
        );
        let mut stmt = conn.prepare(&sql)?;
        let raw_rows: Vec<(String, String, f64, f64, f64, f64)> = stmt
            .query_map(params_from_iter(well_ids.iter()), |row| {
                Ok((
                    row.get(0)?,
                    row.get(1)?,
                    row.get(2)?,
                    row.get(3)?,
                    row.get(4)?,
                    row.get(5)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        let mut results = Vec::with_capacity(raw_rows.len());
        for (well_id, date_str, oil, gas, water, days_on) in raw_rows {
            results.push(ProductionRecord {
                date: parse_date(&date_str)
                    .map_err(|e| anyhow::anyhow!("production row for {}: {}", well_id, e))?,
                well_id,
                oil,
                gas,
                water,
                days_on,
            });
        }
        log::info!(
            "[WPV] query: query_production returned {} records for {} wells",
            results.len(),
            well_ids.len()
        );
        Ok(results)
    }

    /// Get injection history for the given completions.
    ///
    /// Rows are ordered by completion id then date. A NULL pressure comes
    /// back as `None`.
    pub fn query_injection(&self, well_ids: &[WellId]) -> anyhow::Result<Vec<InjectionRecord>> {
        if well_ids.is_empty() {
            return Ok(Vec::new());
        }
        let conn = self.conn.borrow();
        let sql = format!(
            "SELECT well_id, date, water_injected, pressure FROM injection
             WHERE well_id IN ({})
             ORDER BY well_id, date",
            placeholders(well_ids.len())
        );
        let mut stmt = conn.prepare(&sql)?;
        let raw_rows: Vec<(String, String, f64, Option<f64>)> = stmt
            .query_map(params_from_iter(well_ids.iter()), |row| {
                Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        let mut results = Vec::with_capacity(raw_rows.len());
        for (well_id, date_str, water_injected, pressure) in raw_rows {
            results.push(InjectionRecord {
                date: parse_date(&date_str)
                    .map_err(|e| anyhow::anyhow!("injection row for {}: {}", well_id, e))?,
                well_id,
                water_injected,
                pressure,
            });
        }
        log::info!(
            "[WPV] query: query_injection returned {} records for {} wells",
            results.len(),
            well_ids.len()
        );
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    /// Helper to create a database with two producers and one injector.
    fn sample_db() -> Database {
        let db = Database::new().unwrap();

        db.load_wells(
            "\
WELL_LEGAL_NAME,COMPLETION_LEGAL_NAME,COMPLETION_COORDINATE_X,COMPLETION_COORDINATE_Y
SCH-012,SCH-012:UI,290100.5,9970200.0
SCH-013,SCH-013:HS,290900.0,9971000.0
SCH-050,SCH-050:TI,291250.0,9968800.0
",
        )
        .unwrap();

        db.load_well_types(
            "\
COMPLETION_LEGAL_NAME,TIPO_POZO,RESERVORIO
SCH-012:UI,PRODUCTOR,U INFERIOR
SCH-050:TI,INYECTOR,TIYUYACU
",
        )
        .unwrap();

        db.load_production(
            "\
COMP_S_NAME,PROD_DT,VO_OIL_PROD,VO_GAS_PROD,VO_WAT_PROD,DIAS_ON
SCH-012:UI,2024-02-29,2900,400,1010,29
SCH-012:UI,2024-01-31,3100,410,950,31
SCH-013:HS,2024-01-31,1500,200,3000,31
",
        )
        .unwrap();

        db.load_injection(
            "\
COMPLETION_LEGAL_NAME,Date,Water_INJ_CALDAY,press_iny
SCH-050:TI,2024-01-31,12000,1850
SCH-050:TI,2024-02-29,11800,
",
        )
        .unwrap();

        db
    }

    fn ids(v: &[&str]) -> Vec<WellId> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn placeholders_are_numbered() {
        assert_eq!(placeholders(1), "?1");
        assert_eq!(placeholders(3), "?1, ?2, ?3");
    }

    #[test]
    fn query_wells_joins_tags_and_orders_by_id() {
        let db = sample_db();
        let wells = db.query_wells().unwrap();
        assert_eq!(wells.len(), 3);
        assert_eq!(wells[0].id, "SCH-012:UI");
        assert_eq!(wells[0].name, "SCH-012");
        assert_eq!(wells[0].reservoir, "U INFERIOR");
        // No type row for SCH-013
        assert_eq!(wells[1].id, "SCH-013:HS");
        assert_eq!(wells[1].well_type, "");
        assert_eq!(wells[1].reservoir, "");
        assert_eq!(wells[2].well_type, "INYECTOR");
    }

    #[test]
    fn query_production_returns_ordered_rows_for_requested_wells() {
        let db = sample_db();
        let rows = db.query_production(&ids(&["SCH-012:UI"])).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].date, NaiveDate::from_ymd_opt(2024, 1, 31).unwrap());
        assert_eq!(rows[1].date, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        assert!((rows[0].oil - 3100.0).abs() < 0.01);
        assert!((rows[1].days_on - 29.0).abs() < 0.01);
    }

    #[test]
    fn query_production_for_multiple_wells() {
        let db = sample_db();
        let rows = db
            .query_production(&ids(&["SCH-013:HS", "SCH-012:UI"]))
            .unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].well_id, "SCH-012:UI");
        assert_eq!(rows[2].well_id, "SCH-013:HS");
    }

    #[test]
    fn query_production_for_well_without_rows_is_empty() {
        let db = sample_db();
        let rows = db.query_production(&ids(&["SCH-050:TI"])).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn query_production_with_no_ids_is_empty() {
        let db = sample_db();
        assert!(db.query_production(&[]).unwrap().is_empty());
        assert!(db.query_injection(&[]).unwrap().is_empty());
    }

    #[test]
    fn query_injection_keeps_missing_pressure() {
        let db = sample_db();
        let rows = db.query_injection(&ids(&["SCH-050:TI"])).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].pressure, Some(1850.0));
        assert_eq!(rows[1].pressure, None);
        assert!((rows[1].water_injected - 11800.0).abs() < 0.01);
    }

    #[test]
    fn query_ids_are_bound_not_interpolated() {
        let db = sample_db();
        let rows = db
            .query_production(&ids(&["SCH-012:UI' OR '1'='1"]))
            .unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn query_production_rejects_malformed_stored_dates() {
        let db = sample_db();
        db.conn
            .borrow()
            .execute(
                "INSERT INTO production (well_id, date, oil, gas, water, days_on)
                 VALUES ('SCH-013:HS', '31/03/2024', 1, 1, 1, 1)",
                [],
            )
            .unwrap();
        assert!(db.query_production(&ids(&["SCH-013:HS"])).is_err());
    }
}
