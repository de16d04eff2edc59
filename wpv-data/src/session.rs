//! The selection → fetch → aggregate → project cycle.
//!
//! A [`Session`] runs one cycle per selection mutation. Hosts that fetch off
//! the UI thread can drive the cycle in pieces with
//! [`begin_cycle`](Session::begin_cycle), [`run_cycle`](Session::run_cycle)
//! and [`finish_cycle`](Session::finish_cycle): a cycle whose selection
//! generation was superseded before it finished is discarded, so only the
//! latest selection is ever rendered.

use crate::aggregation::{aggregate, Aggregation};
use crate::catalog::WellCatalog;
use crate::projector::{project_all, project_rates, ChartPayload};
use crate::rates::{injection_rate, production_rates};
use crate::repository::SeriesRepository;
use crate::search::SearchIndex;
use crate::selection::{SearchPolicy, SelectionState};
use std::collections::BTreeSet;
use wpv_core::error::Result;
use wpv_core::{WellId, WellSource};

/// The result of one completed cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct Charts {
    /// Selection generation the charts were computed for.
    pub generation: u64,
    pub selection: BTreeSet<WellId>,
    pub aggregation: Aggregation,
    /// Volume, days-on and pressure lines.
    pub volumes: ChartPayload,
    /// Calendar-day rate lines.
    pub rates: ChartPayload,
}

/// A snapshot of the selection a cycle was started for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleTicket {
    generation: u64,
    selection: BTreeSet<WellId>,
}

impl CycleTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn selection(&self) -> &BTreeSet<WellId> {
        &self.selection
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// The result became the current charts.
    Rendered,
    /// The selection changed while the cycle ran; the result was dropped.
    Discarded,
}

pub struct Session<'a, S> {
    catalog: &'a WellCatalog,
    search: SearchIndex<'a>,
    repository: SeriesRepository<'a, S>,
    selection: SelectionState,
    /// Reservoir tags whose wells are visible; empty shows the whole field.
    reservoir_filter: Vec<String>,
    charts: Option<Charts>,
}

impl<'a, S: WellSource> Session<'a, S> {
    pub fn new(catalog: &'a WellCatalog, source: S) -> Self {
        Self {
            catalog,
            search: SearchIndex::new(catalog),
            repository: SeriesRepository::new(catalog, source),
            selection: SelectionState::new(),
            reservoir_filter: Vec::new(),
            charts: None,
        }
    }

    pub fn catalog(&self) -> &'a WellCatalog {
        self.catalog
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// Active reservoir tags, sorted. Empty means no filter.
    pub fn reservoir_filter(&self) -> &[String] {
        &self.reservoir_filter
    }

    /// True if the well passes the reservoir filter.
    pub fn is_visible(&self, id: &str) -> bool {
        if self.reservoir_filter.is_empty() {
            return self.catalog.contains(id);
        }
        self.catalog
            .get(id)
            .is_ok_and(|w| self.reservoir_filter.contains(&w.reservoir))
    }

    /// Ids of the wells that pass the reservoir filter, catalog order.
    pub fn visible_wells(&self) -> Vec<WellId> {
        if self.reservoir_filter.is_empty() {
            self.catalog.all().iter().map(|w| w.id.clone()).collect()
        } else {
            self.catalog.in_reservoirs(&self.reservoir_filter)
        }
    }

    /// Show only wells of the given reservoirs (none: the whole field).
    ///
    /// Changing the filter clears the selection.
    pub fn set_reservoir_filter<I, T>(&mut self, tags: I) -> Result<CycleOutcome>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let mut tags: Vec<String> = tags
            .into_iter()
            .map(|t| t.as_ref().trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();
        tags.sort();
        tags.dedup();
        log::info!("[WPV] session: reservoir filter {:?}", tags);
        self.reservoir_filter = tags;
        self.clear()
    }

    /// Replace the selection with every visible well (Ctrl+A).
    pub fn select_all_visible(&mut self) -> Result<CycleOutcome> {
        let ids = self.visible_wells();
        self.search_select(ids)
    }

    /// The last successfully rendered charts, if any cycle has completed.
    pub fn charts(&self) -> Option<&Charts> {
        self.charts.as_ref()
    }

    pub fn click_well(&mut self, id: &str) -> Result<CycleOutcome> {
        self.selection.click_well(self.catalog, id);
        self.refresh()
    }

    pub fn ctrl_click_well(&mut self, id: &str) -> Result<CycleOutcome> {
        self.selection.ctrl_click_well(self.catalog, id);
        self.refresh()
    }

    pub fn search_select<I, T>(&mut self, ids: I) -> Result<CycleOutcome>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        self.selection.search_select(self.catalog, ids);
        self.refresh()
    }

    /// Add wells to the selection without removing any.
    pub fn extend<I, T>(&mut self, ids: I) -> Result<CycleOutcome>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        self.selection.extend(self.catalog, ids);
        self.refresh()
    }

    pub fn clear(&mut self) -> Result<CycleOutcome> {
        self.selection.clear();
        self.refresh()
    }

    /// Box selection on the map. With `keep_existing` (Ctrl held) the wells
    /// in the box are added; otherwise they replace the selection. Wells
    /// hidden by the reservoir filter are never picked.
    pub fn select_box(
        &mut self,
        x0: f64,
        y0: f64,
        x1: f64,
        y1: f64,
        keep_existing: bool,
    ) -> Result<CycleOutcome> {
        let ids: Vec<WellId> = self
            .catalog
            .within_box(x0, y0, x1, y1)
            .into_iter()
            .filter(|id| self.is_visible(id))
            .collect();
        if keep_existing {
            self.extend(ids)
        } else {
            self.search_select(ids)
        }
    }

    /// Run a text search and apply it according to `policy`.
    ///
    /// Returns the matching ids in catalog order. Under
    /// [`SearchPolicy::ListOnly`] the selection is untouched and no cycle
    /// runs; under [`SearchPolicy::SelectMatches`] the matches become the
    /// selection (an empty query clears it) and one cycle runs.
    pub fn search(&mut self, text: &str, policy: SearchPolicy) -> Result<Vec<WellId>> {
        let matches = self.search.query(text);
        if policy == SearchPolicy::SelectMatches {
            if text.trim().is_empty() {
                self.selection.clear();
            } else {
                self.selection.search_select(self.catalog, &matches);
            }
            self.refresh()?;
        }
        Ok(matches)
    }

    /// Snapshot the current selection for a cycle.
    ///
    /// Selected wells hidden by the reservoir filter are left out of the
    /// charts.
    pub fn begin_cycle(&self) -> CycleTicket {
        CycleTicket {
            generation: self.selection.generation(),
            selection: self
                .selection
                .current()
                .iter()
                .filter(|id| self.is_visible(id))
                .cloned()
                .collect(),
        }
    }

    /// Fetch, aggregate and project for the ticket's selection.
    ///
    /// This does not touch session state and may be called long after
    /// `begin_cycle`.
    pub fn run_cycle(&self, ticket: &CycleTicket) -> Result<Charts> {
        let production = self.repository.fetch_production(&ticket.selection)?;
        let injection = self.repository.fetch_injection(&ticket.selection)?;
        let aggregation = aggregate(&ticket.selection, &production, &injection);
        let volumes = project_all(&aggregation);
        let rates = project_rates(&production_rates(&aggregation), &injection_rate(&aggregation));
        Ok(Charts {
            generation: ticket.generation,
            selection: ticket.selection.clone(),
            aggregation,
            volumes,
            rates,
        })
    }

    /// Install a finished cycle if its selection is still current.
    ///
    /// Stale results, successful or not, are discarded. A failed current
    /// cycle leaves the previous charts in place and returns the error.
    pub fn finish_cycle(
        &mut self,
        ticket: CycleTicket,
        result: Result<Charts>,
    ) -> Result<CycleOutcome> {
        if ticket.generation != self.selection.generation() {
            log::debug!(
                "[WPV] session: discarding cycle for generation {} (current {})",
                ticket.generation,
                self.selection.generation()
            );
            return Ok(CycleOutcome::Discarded);
        }
        match result {
            Ok(charts) => {
                log::debug!(
                    "[WPV] session: rendered generation {} for {} wells",
                    charts.generation,
                    charts.selection.len()
                );
                self.charts = Some(charts);
                Ok(CycleOutcome::Rendered)
            }
            Err(e) => {
                log::warn!(
                    "[WPV] session: cycle for generation {} failed, keeping last charts: {}",
                    ticket.generation,
                    e
                );
                Err(e)
            }
        }
    }

    fn refresh(&mut self) -> Result<CycleOutcome> {
        let ticket = self.begin_cycle();
        let result = self.run_cycle(&ticket);
        self.finish_cycle(ticket, result)
    }
}
