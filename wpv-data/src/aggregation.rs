//! Combining per-well history into field series.
//!
//! # Time axis
//!
//! Production and injection each get their own axis: the union of every
//! date on which at least one selected well reported a row of that kind.
//! Nothing is interpolated and no date is invented.
//!
//! # Combination rules
//!
//! | Metric           | Rule | Well without a row on a date        |
//! |------------------|------|-------------------------------------|
//! | oil, gas, water  | sum  | contributes 0                       |
//! | days on          | sum  | contributes 0                       |
//! | water injected   | sum  | contributes 0                       |
//! | pressure         | mean | excluded from numerator and count   |
//!
//! A date on which no selected well reported pressure is left out of the
//! pressure series.
//!
//! The rule column is [`Metric::combine`]; `aggregate` reads it for every
//! metric. Accumulators start from the first contribution rather than from
//! zero, so a single-well selection reproduces that well's values bit for bit.

use crate::repository::{InjectionByWell, ProductionByWell};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use wpv_core::{InjectionRecord, ProductionRecord, WellId};

/// A charted quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Oil,
    Gas,
    Water,
    DaysOn,
    WaterInjected,
    Pressure,
}

/// How values of one metric are combined across wells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combine {
    Sum,
    Mean,
}

impl Metric {
    pub const ALL: [Metric; 6] = [
        Metric::Oil,
        Metric::Gas,
        Metric::Water,
        Metric::DaysOn,
        Metric::WaterInjected,
        Metric::Pressure,
    ];

    pub fn combine(self) -> Combine {
        match self {
            Metric::Pressure => Combine::Mean,
            _ => Combine::Sum,
        }
    }

    /// Stable machine-readable key, used for chart line ids and CSV headers.
    pub fn key(self) -> &'static str {
        match self {
            Metric::Oil => "oil",
            Metric::Gas => "gas",
            Metric::Water => "water",
            Metric::DaysOn => "days_on",
            Metric::WaterInjected => "water_injected",
            Metric::Pressure => "pressure",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Metric::Oil => "Oil (bbl)",
            Metric::Gas => "Gas (Mcf)",
            Metric::Water => "Water (bbl)",
            Metric::DaysOn => "Days on",
            Metric::WaterInjected => "Water injected (bbl)",
            Metric::Pressure => "Injection pressure (psi)",
        }
    }
}

/// A single (date, value) pair of an aggregated series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// One metric over the selection, strictly increasing by date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregatedSeries {
    pub metric: Metric,
    pub points: Vec<SeriesPoint>,
}

impl AggregatedSeries {
    fn empty(metric: Metric) -> Self {
        Self {
            metric,
            points: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.points.iter().map(|p| p.date)
    }

    /// Value on `date`, if the series has a point there.
    pub fn value_on(&self, date: NaiveDate) -> Option<f64> {
        self.points
            .binary_search_by_key(&date, |p| p.date)
            .ok()
            .map(|i| self.points[i].value)
    }
}

/// Every metric's series for one selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Aggregation {
    pub oil: AggregatedSeries,
    pub gas: AggregatedSeries,
    pub water: AggregatedSeries,
    pub days_on: AggregatedSeries,
    pub water_injected: AggregatedSeries,
    pub pressure: AggregatedSeries,
}

impl Aggregation {
    /// The result for an empty selection: every series empty.
    pub fn empty() -> Self {
        Self {
            oil: AggregatedSeries::empty(Metric::Oil),
            gas: AggregatedSeries::empty(Metric::Gas),
            water: AggregatedSeries::empty(Metric::Water),
            days_on: AggregatedSeries::empty(Metric::DaysOn),
            water_injected: AggregatedSeries::empty(Metric::WaterInjected),
            pressure: AggregatedSeries::empty(Metric::Pressure),
        }
    }

    pub fn series(&self, metric: Metric) -> &AggregatedSeries {
        match metric {
            Metric::Oil => &self.oil,
            Metric::Gas => &self.gas,
            Metric::Water => &self.water,
            Metric::DaysOn => &self.days_on,
            Metric::WaterInjected => &self.water_injected,
            Metric::Pressure => &self.pressure,
        }
    }

    /// All series in [`Metric::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = &AggregatedSeries> + '_ {
        Metric::ALL.into_iter().map(move |m| self.series(m))
    }
}

/// Per-date accumulator for one metric, following [`Metric::combine`].
///
/// Starts from the first contribution rather than from zero.
#[derive(Debug, Clone, Copy)]
enum Accumulator {
    Total(f64),
    Mean { sum: f64, count: u32 },
}

impl Accumulator {
    fn start(combine: Combine, value: f64) -> Self {
        match combine {
            Combine::Sum => Accumulator::Total(value),
            Combine::Mean => Accumulator::Mean { sum: value, count: 1 },
        }
    }

    fn add(&mut self, value: f64) {
        match self {
            Accumulator::Total(total) => *total += value,
            Accumulator::Mean { sum, count } => {
                *sum += value;
                *count += 1;
            }
        }
    }

    fn value(&self) -> f64 {
        match *self {
            Accumulator::Total(total) => total,
            Accumulator::Mean { sum, count } => sum / count as f64,
        }
    }
}

/// Fold one metric over `rows`. Rows whose value is `None` (a missing
/// pressure reading) contribute neither to the value nor to the date axis.
fn combine_metric<'r, R: 'r>(
    metric: Metric,
    rows: impl Iterator<Item = &'r R>,
    date_of: impl Fn(&R) -> NaiveDate,
    value_of: impl Fn(&R) -> Option<f64>,
) -> AggregatedSeries {
    let mut by_date: BTreeMap<NaiveDate, Accumulator> = BTreeMap::new();
    for row in rows {
        let Some(value) = value_of(row) else {
            continue;
        };
        by_date
            .entry(date_of(row))
            .and_modify(|acc| acc.add(value))
            .or_insert_with(|| Accumulator::start(metric.combine(), value));
    }
    AggregatedSeries {
        metric,
        points: by_date
            .into_iter()
            .map(|(date, acc)| SeriesPoint {
                date,
                value: acc.value(),
            })
            .collect(),
    }
}

/// Combine the history of the selected wells into one series per metric.
///
/// Only map entries whose key is in `selection` contribute; the maps may
/// hold more wells than are selected. Wells are visited in identifier order,
/// so the floating-point summation order is deterministic.
pub fn aggregate(
    selection: &BTreeSet<WellId>,
    production: &ProductionByWell,
    injection: &InjectionByWell,
) -> Aggregation {
    let production_rows = || {
        production
            .iter()
            .filter(|(id, _)| selection.contains(*id))
            .flat_map(|(_, records)| records.iter())
    };
    let injection_rows = || {
        injection
            .iter()
            .filter(|(id, _)| selection.contains(*id))
            .flat_map(|(_, records)| records.iter())
    };
    let production_series = |metric: Metric, pick: fn(&ProductionRecord) -> f64| {
        combine_metric(metric, production_rows(), |r| r.date, |r| Some(pick(r)))
    };
    let injection_series = |metric: Metric, pick: fn(&InjectionRecord) -> Option<f64>| {
        combine_metric(metric, injection_rows(), |r| r.date, pick)
    };

    let aggregation = Aggregation {
        oil: production_series(Metric::Oil, |r| r.oil),
        gas: production_series(Metric::Gas, |r| r.gas),
        water: production_series(Metric::Water, |r| r.water),
        days_on: production_series(Metric::DaysOn, |r| r.days_on),
        water_injected: injection_series(Metric::WaterInjected, |r| Some(r.water_injected)),
        pressure: injection_series(Metric::Pressure, |r| r.pressure),
    };
    log::debug!(
        "[WPV] aggregate: {} wells -> {} production dates, {} injection dates",
        selection.len(),
        aggregation.oil.len(),
        aggregation.water_injected.len()
    );
    aggregation
}
