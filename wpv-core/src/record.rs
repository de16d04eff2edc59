use crate::well::WellId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One reporting period of production for one well.
///
/// Volumes are in barrels (oil, water) and thousand cubic feet (gas) as
/// reported by the store; the engine never converts units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionRecord {
    pub well_id: WellId,
    pub date: NaiveDate,
    pub oil: f64,
    pub gas: f64,
    pub water: f64,
    /// Days the well was on production during the period.
    pub days_on: f64,
}

/// One reporting period of water injection for one well.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InjectionRecord {
    pub well_id: WellId,
    pub date: NaiveDate,
    /// Injected water volume in barrels.
    pub water_injected: f64,
    /// Injection pressure in psi. `None` when the store has no reading.
    pub pressure: Option<f64>,
}
