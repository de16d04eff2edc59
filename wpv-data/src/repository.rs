//! On-demand fetch of per-well history.

use crate::catalog::WellCatalog;
use std::collections::BTreeMap;
use wpv_core::error::Result;
use wpv_core::{InjectionRecord, ProductionRecord, WellId, WellSource};

/// Production rows grouped by well, each group ordered by date.
pub type ProductionByWell = BTreeMap<WellId, Vec<ProductionRecord>>;

/// Injection rows grouped by well, each group ordered by date.
pub type InjectionByWell = BTreeMap<WellId, Vec<InjectionRecord>>;

/// Fetches history for catalog wells from a [`WellSource`].
///
/// Every requested catalog well appears in the returned map; wells without
/// rows map to an empty sequence. Ids unknown to the catalog are dropped
/// before the store is queried.
pub struct SeriesRepository<'a, S> {
    catalog: &'a WellCatalog,
    source: S,
}

impl<'a, S: WellSource> SeriesRepository<'a, S> {
    pub fn new(catalog: &'a WellCatalog, source: S) -> Self {
        Self { catalog, source }
    }

    pub fn fetch_production<I, T>(&self, ids: I) -> Result<ProductionByWell>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let known = self.known_ids(ids);
        let rows = self.source.read_production(&known)?;
        Ok(group_by_well(known, rows, |r| &r.well_id, |r| r.date))
    }

    pub fn fetch_injection<I, T>(&self, ids: I) -> Result<InjectionByWell>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let known = self.known_ids(ids);
        let rows = self.source.read_injection(&known)?;
        Ok(group_by_well(known, rows, |r| &r.well_id, |r| r.date))
    }

    fn known_ids<I, T>(&self, ids: I) -> Vec<WellId>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let mut known: Vec<WellId> = ids
            .into_iter()
            .filter(|id| self.catalog.contains(id.as_ref()))
            .map(|id| id.as_ref().to_string())
            .collect();
        known.sort();
        known.dedup();
        known
    }
}

/// Seed one empty group per requested id, then file rows under their well.
///
/// Rows for wells that were not requested are dropped. Groups are re-sorted
/// by date (stable) so the ordering does not depend on the store.
fn group_by_well<R, D: Ord>(
    ids: Vec<WellId>,
    rows: Vec<R>,
    well_of: impl Fn(&R) -> &WellId,
    date_of: impl Fn(&R) -> D,
) -> BTreeMap<WellId, Vec<R>> {
    let mut grouped: BTreeMap<WellId, Vec<R>> =
        ids.into_iter().map(|id| (id, Vec::new())).collect();
    for row in rows {
        if let Some(group) = grouped.get_mut(well_of(&row)) {
            group.push(row);
        }
    }
    for group in grouped.values_mut() {
        group.sort_by_key(|r| date_of(r));
    }
    grouped
}
