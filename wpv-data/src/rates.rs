//! Calendar-day rates derived from aggregated monthly volumes.
//!
//! A rate is the period volume divided by the number of days in the calendar
//! month of the period date. Days on are not used as the divisor: field
//! reports quote calendar-day rates. No curve fitting happens here.

use crate::aggregation::{Aggregation, SeriesPoint};
use serde::Serialize;
use wpv_core::dates::days_in_month;

#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct ProductionRates {
    pub oil_rate: Vec<SeriesPoint>,
    pub gas_rate: Vec<SeriesPoint>,
    pub water_rate: Vec<SeriesPoint>,
    /// Oil rate + water rate.
    pub liquid_rate: Vec<SeriesPoint>,
    /// Water rate / liquid rate in percent (BSW), 0 when nothing flowed.
    pub water_cut: Vec<SeriesPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct InjectionRate {
    pub water_injection_rate: Vec<SeriesPoint>,
}

pub fn production_rates(aggregation: &Aggregation) -> ProductionRates {
    let mut rates = ProductionRates::default();
    // oil, gas and water share one date axis
    let rows = aggregation
        .oil
        .points
        .iter()
        .zip(&aggregation.gas.points)
        .zip(&aggregation.water.points);
    for ((oil, gas), water) in rows {
        let date = oil.date;
        let days = days_in_month(&date) as f64;
        let oil_rate = oil.value / days;
        let water_rate = water.value / days;
        let liquid_rate = oil_rate + water_rate;
        let water_cut = if liquid_rate == 0.0 {
            0.0
        } else {
            water_rate / liquid_rate * 100.0
        };

        let point = |value| SeriesPoint { date, value };
        rates.oil_rate.push(point(oil_rate));
        rates.gas_rate.push(point(gas.value / days));
        rates.water_rate.push(point(water_rate));
        rates.liquid_rate.push(point(liquid_rate));
        rates.water_cut.push(point(water_cut));
    }
    rates
}

pub fn injection_rate(aggregation: &Aggregation) -> InjectionRate {
    InjectionRate {
        water_injection_rate: aggregation
            .water_injected
            .points
            .iter()
            .map(|p| SeriesPoint {
                date: p.date,
                value: p.value / days_in_month(&p.date) as f64,
            })
            .collect(),
    }
}
