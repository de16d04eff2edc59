use crate::error::Result;
use crate::record::{InjectionRecord, ProductionRecord};
use crate::well::{Well, WellId};

/// Read-only access to the field database.
///
/// Implementations must treat an identifier without rows as a valid,
/// empty answer. Errors are reserved for connectivity and query failures
/// and are reported as [`WellError::DataSource`](crate::WellError::DataSource).
pub trait WellSource {
    /// Read the master data of every well, in any order.
    fn read_wells(&self) -> Result<Vec<Well>>;

    /// Read the production rows of the given wells, ordered by well then date.
    fn read_production(&self, ids: &[WellId]) -> Result<Vec<ProductionRecord>>;

    /// Read the injection rows of the given wells, ordered by well then date.
    fn read_injection(&self, ids: &[WellId]) -> Result<Vec<InjectionRecord>>;
}

impl<T: WellSource + ?Sized> WellSource for &T {
    fn read_wells(&self) -> Result<Vec<Well>> {
        (**self).read_wells()
    }

    fn read_production(&self, ids: &[WellId]) -> Result<Vec<ProductionRecord>> {
        (**self).read_production(ids)
    }

    fn read_injection(&self, ids: &[WellId]) -> Result<Vec<InjectionRecord>> {
        (**self).read_injection(ids)
    }
}
