//! Aggregated series output for a one-shot selection.

use crate::OutputFormat;
use log::{info, warn};
use std::io::Write;
use wpv_core::WellSource;
use wpv_data::{CatalogOptions, ChartPayload, SearchIndex, Session, WellCatalog};

/// Select `ids` plus any search matches, run one cycle and print the
/// resulting chart lines.
pub fn run_series<S: WellSource, W: Write>(
    source: &S,
    options: &CatalogOptions,
    ids: &[String],
    search: Option<&str>,
    format: OutputFormat,
    rates: bool,
    out: &mut W,
) -> anyhow::Result<()> {
    let catalog = WellCatalog::load(source, options)?;

    let mut selection: Vec<String> = Vec::new();
    for id in ids {
        if catalog.contains(id) {
            selection.push(id.clone());
        } else {
            warn!("[WPV] series: {} is not in the catalog, ignoring", id);
        }
    }
    if let Some(text) = search {
        selection.extend(SearchIndex::new(&catalog).query(text));
    }

    let mut session = Session::new(&catalog, source);
    session.search_select(&selection)?;
    let charts = session
        .charts()
        .ok_or_else(|| anyhow::anyhow!("no charts were rendered"))?;
    info!("[WPV] series: aggregated {} wells", charts.selection.len());

    let payload = if rates { &charts.rates } else { &charts.volumes };
    match format {
        OutputFormat::Csv => write_csv(payload, out),
        OutputFormat::Json => {
            writeln!(out, "{}", payload.to_json()?)?;
            Ok(())
        }
    }
}

/// Long-format CSV: one `metric,date,value` row per chart point.
fn write_csv<W: Write>(payload: &ChartPayload, out: &mut W) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record(["metric", "date", "value"])?;
    for line in &payload.lines {
        for point in &line.points {
            let value = point.value.to_string();
            wtr.write_record([line.key.as_str(), point.date.as_str(), value.as_str()])?;
        }
    }
    wtr.flush()?;
    Ok(())
}
