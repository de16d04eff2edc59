use crate::Database;
use wpv_core::error::Result;
use wpv_core::{InjectionRecord, ProductionRecord, Well, WellError, WellId, WellSource};

impl WellSource for Database {
    fn read_wells(&self) -> Result<Vec<Well>> {
        self.query_wells()
            .map_err(|e| WellError::data_source("wells", e))
    }

    fn read_production(&self, ids: &[WellId]) -> Result<Vec<ProductionRecord>> {
        self.query_production(ids)
            .map_err(|e| WellError::data_source("production", e))
    }

    fn read_injection(&self, ids: &[WellId]) -> Result<Vec<InjectionRecord>> {
        self.query_injection(ids)
            .map_err(|e| WellError::data_source("injection", e))
    }
}
