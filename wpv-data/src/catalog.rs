//! The per-session well catalog.

use std::collections::{BTreeSet, HashMap};
use wpv_core::error::Result;
use wpv_core::{Well, WellError, WellId, WellSource};

/// Load-time filtering of the catalog.
#[derive(Debug, Clone, Default)]
pub struct CatalogOptions {
    /// Wells whose display name contains this marker are left out
    /// (e.g. `"PLA"` for plant and platform pseudo-wells).
    pub exclude_marker: Option<String>,
}

/// Immutable index of every well known to this session.
///
/// Wells are kept sorted by identifier, which is the order `all()` and every
/// id-returning query use.
#[derive(Debug, Clone, Default)]
pub struct WellCatalog {
    wells: Vec<Well>,
    index: HashMap<WellId, usize>,
}

impl WellCatalog {
    /// Read all wells from the store in one bulk read.
    ///
    /// Fails with [`WellError::DataSource`] if the store is unusable; no
    /// partial catalog is ever returned.
    pub fn load<S: WellSource + ?Sized>(source: &S, options: &CatalogOptions) -> Result<Self> {
        let wells = source.read_wells()?;
        Ok(Self::from_wells(wells, options))
    }

    /// Build a catalog from already-read wells.
    ///
    /// Duplicate identifiers keep the first occurrence, the same rule the
    /// SQLite loader applies to `wells.csv`.
    pub fn from_wells(wells: Vec<Well>, options: &CatalogOptions) -> Self {
        let total = wells.len();
        let mut wells: Vec<Well> = match options.exclude_marker.as_deref() {
            Some(marker) if !marker.is_empty() => wells
                .into_iter()
                .filter(|w| !w.name.contains(marker))
                .collect(),
            _ => wells,
        };
        wells.sort_by(|a, b| a.id.cmp(&b.id));

        let before_dedup = wells.len();
        wells.dedup_by(|b, a| a.id == b.id);
        if wells.len() != before_dedup {
            log::warn!(
                "[WPV] catalog: dropped {} duplicate well ids",
                before_dedup - wells.len()
            );
        }

        let index = wells
            .iter()
            .enumerate()
            .map(|(i, w)| (w.id.clone(), i))
            .collect();
        log::info!(
            "[WPV] catalog: {} wells loaded, {} excluded",
            wells.len(),
            total - before_dedup
        );
        Self { wells, index }
    }

    /// Look up one well. Unknown ids are a caller bug and fail loudly.
    pub fn get(&self, id: &str) -> Result<&Well> {
        self.index
            .get(id)
            .map(|&i| &self.wells[i])
            .ok_or_else(|| WellError::NotFound(id.to_string()))
    }

    /// Every well, sorted by identifier.
    pub fn all(&self) -> &[Well] {
        &self.wells
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.wells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wells.is_empty()
    }

    /// Distinct non-empty reservoir tags, sorted.
    pub fn reservoirs(&self) -> Vec<String> {
        self.wells
            .iter()
            .filter(|w| !w.reservoir.is_empty())
            .map(|w| w.reservoir.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Ids of wells tagged with any of the given reservoirs, catalog order.
    pub fn in_reservoirs(&self, tags: &[String]) -> Vec<WellId> {
        self.wells
            .iter()
            .filter(|w| tags.iter().any(|t| *t == w.reservoir))
            .map(|w| w.id.clone())
            .collect()
    }

    /// Ids of wells inside the box spanned by two map corners, catalog order.
    pub fn within_box(&self, x0: f64, y0: f64, x1: f64, y1: f64) -> Vec<WellId> {
        self.wells
            .iter()
            .filter(|w| w.is_within(x0, y0, x1, y1))
            .map(|w| w.id.clone())
            .collect()
    }
}
