//! Catalog listing commands.

use log::info;
use std::collections::BTreeSet;
use std::io::Write;
use wpv_core::WellSource;
use wpv_data::{CatalogOptions, SearchIndex, WellCatalog};

/// Write catalog wells as CSV, optionally narrowed by name search and
/// reservoir tags. Both filters must match when both are given.
pub fn run_wells<S: WellSource, W: Write>(
    source: &S,
    options: &CatalogOptions,
    search: Option<&str>,
    reservoirs: &[String],
    out: &mut W,
) -> anyhow::Result<()> {
    let catalog = WellCatalog::load(source, options)?;

    let by_name: Option<BTreeSet<String>> =
        search.map(|text| SearchIndex::new(&catalog).query(text).into_iter().collect());
    let by_reservoir: Option<BTreeSet<String>> = if reservoirs.is_empty() {
        None
    } else {
        Some(catalog.in_reservoirs(reservoirs).into_iter().collect())
    };

    let mut wtr = csv::Writer::from_writer(out);
    let mut count = 0usize;
    for well in catalog.all() {
        if by_name.as_ref().is_some_and(|ids| !ids.contains(&well.id)) {
            continue;
        }
        if by_reservoir.as_ref().is_some_and(|ids| !ids.contains(&well.id)) {
            continue;
        }
        wtr.serialize(well)?;
        count += 1;
    }
    wtr.flush()?;

    info!("[WPV] wells: listed {} of {} wells", count, catalog.len());
    Ok(())
}

/// Write the distinct reservoir tags, one per line.
pub fn run_reservoirs<S: WellSource, W: Write>(
    source: &S,
    options: &CatalogOptions,
    out: &mut W,
) -> anyhow::Result<()> {
    let catalog = WellCatalog::load(source, options)?;
    for reservoir in catalog.reservoirs() {
        writeln!(out, "{}", reservoir)?;
    }
    Ok(())
}
