//! Conversion of aggregated series into chart-ready point lists.
//!
//! The chart surface receives exactly the dates present in the series; there
//! is no resampling, interpolation or smoothing here.

use crate::aggregation::{AggregatedSeries, Aggregation, SeriesPoint};
use crate::rates::{InjectionRate, ProductionRates};
use serde::Serialize;
use wpv_core::dates::format_date;

/// A single (date, value) pair used for line chart data points.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DateValue {
    /// Date in "YYYY-MM-DD" format.
    pub date: String,
    pub value: f64,
}

/// One named line of a chart.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChartLine {
    /// Machine-readable id (e.g. `"oil"`, `"water_cut"`).
    pub key: String,
    /// Axis/legend label.
    pub label: String,
    pub points: Vec<DateValue>,
}

/// Everything the chart surface draws for one selection.
#[derive(Debug, Clone, Serialize, PartialEq, Default)]
pub struct ChartPayload {
    pub lines: Vec<ChartLine>,
}

impl ChartPayload {
    pub fn line(&self, key: &str) -> Option<&ChartLine> {
        self.lines.iter().find(|l| l.key == key)
    }

    /// Serialize for the chart bridge.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Points of one aggregated series, in order.
pub fn project(series: &AggregatedSeries) -> Vec<DateValue> {
    project_points(&series.points)
}

pub fn project_points(points: &[SeriesPoint]) -> Vec<DateValue> {
    points
        .iter()
        .map(|p| DateValue {
            date: format_date(&p.date),
            value: p.value,
        })
        .collect()
}

/// One line per metric, in [`Metric::ALL`](crate::aggregation::Metric::ALL) order.
pub fn project_all(aggregation: &Aggregation) -> ChartPayload {
    ChartPayload {
        lines: aggregation
            .iter()
            .map(|series| ChartLine {
                key: series.metric.key().to_string(),
                label: series.metric.label().to_string(),
                points: project(series),
            })
            .collect(),
    }
}

/// Rate lines for the production and injection rate charts.
pub fn project_rates(production: &ProductionRates, injection: &InjectionRate) -> ChartPayload {
    let line = |key: &str, label: &str, points: &[SeriesPoint]| ChartLine {
        key: key.to_string(),
        label: label.to_string(),
        points: project_points(points),
    };
    ChartPayload {
        lines: vec![
            line("oil_rate", "Oil rate (bbl/d)", &production.oil_rate),
            line("gas_rate", "Gas rate (Mcf/d)", &production.gas_rate),
            line("water_rate", "Water rate (bbl/d)", &production.water_rate),
            line("liquid_rate", "Liquid rate (bbl/d)", &production.liquid_rate),
            line("water_cut", "BSW (%)", &production.water_cut),
            line(
                "water_injection_rate",
                "Water injection rate (bbl/d)",
                &injection.water_injection_rate,
            ),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregation::{aggregate, Metric};
    use crate::rates::{injection_rate, production_rates};
    use crate::repository::tests::{date, inj, oil};
    use crate::repository::{InjectionByWell, ProductionByWell};
    use std::collections::BTreeSet;

    fn sample_aggregation() -> Aggregation {
        let mut prod = ProductionByWell::new();
        prod.insert(
            "X".to_string(),
            vec![
                oil("X", date(2024, 1, 31), 310.0),
                oil("X", date(2024, 3, 31), 620.0),
            ],
        );
        let mut inj_map = InjectionByWell::new();
        inj_map.insert(
            "I".to_string(),
            vec![inj("I", date(2024, 2, 29), 2900.0, None)],
        );
        let selection: BTreeSet<String> = ["X".to_string(), "I".to_string()].into();
        aggregate(&selection, &prod, &inj_map)
    }

    #[test]
    fn project_keeps_exact_dates_and_values() {
        let agg = sample_aggregation();
        let points = project(&agg.oil);
        assert_eq!(
            points,
            vec![
                DateValue {
                    date: "2024-01-31".to_string(),
                    value: 310.0
                },
                DateValue {
                    date: "2024-03-31".to_string(),
                    value: 620.0
                },
            ]
        );
    }

    #[test]
    fn project_all_has_one_line_per_metric() {
        let agg = sample_aggregation();
        let payload = project_all(&agg);
        assert_eq!(payload.lines.len(), Metric::ALL.len());
        assert_eq!(payload.lines[0].key, "oil");
        assert_eq!(payload.line("water_injected").unwrap().points.len(), 1);
        // no pressure readings: the line exists but is empty
        assert!(payload.line("pressure").unwrap().points.is_empty());
    }

    #[test]
    fn project_all_of_empty_aggregation_has_empty_lines() {
        let payload = project_all(&Aggregation::empty());
        assert_eq!(payload.lines.len(), Metric::ALL.len());
        assert!(payload.lines.iter().all(|l| l.points.is_empty()));
    }

    #[test]
    fn payload_serializes_to_json() {
        let payload = project_all(&sample_aggregation());
        let json = payload.to_json().unwrap();
        assert!(json.starts_with(r#"{"lines":[{"key":"oil","label":"Oil (bbl)","points":[{"date":"2024-01-31","value":310.0}"#));
    }

    #[test]
    fn project_rates_names_every_line() {
        let agg = sample_aggregation();
        let payload = project_rates(&production_rates(&agg), &injection_rate(&agg));
        let keys: Vec<&str> = payload.lines.iter().map(|l| l.key.as_str()).collect();
        assert_eq!(
            keys,
            vec![
                "oil_rate",
                "gas_rate",
                "water_rate",
                "liquid_rate",
                "water_cut",
                "water_injection_rate"
            ]
        );
        assert_eq!(payload.line("oil_rate").unwrap().points[0].value, 10.0);
        assert_eq!(
            payload.line("water_injection_rate").unwrap().points[0].value,
            100.0
        );
    }
}
