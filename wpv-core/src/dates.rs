//! Date parsing and calendar helpers.

use chrono::{Datelike, NaiveDate, NaiveDateTime};

/// Canonical storage and chart date format: "YYYY-MM-DD".
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Format a NaiveDate as "YYYY-MM-DD"
pub fn format_date(date: &NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parse a date string in "YYYY-MM-DD" format
pub fn parse_date(s: &str) -> anyhow::Result<NaiveDate> {
    Ok(NaiveDate::parse_from_str(s, DATE_FORMAT)?)
}

/// Parse a date as exported by the field database.
///
/// Accepts "YYYY-MM-DD", compact "YYYYMMDD", and timestamped
/// "YYYY-MM-DD HH:MM:SS" (the time part is dropped).
pub fn parse_record_date(s: &str) -> anyhow::Result<NaiveDate> {
    let s = s.trim();
    if let Ok(date) = NaiveDate::parse_from_str(s, DATE_FORMAT) {
        return Ok(date);
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y%m%d") {
        return Ok(date);
    }
    match NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        Ok(dt) => Ok(dt.date()),
        Err(_) => anyhow::bail!("unrecognized date '{}'", s),
    }
}

/// Number of calendar days in the month containing `date`.
pub fn days_in_month(date: &NaiveDate) -> u32 {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|first_of_next| first_of_next.pred_opt())
        .map(|last| last.day())
        // Only unreachable dates at the edge of chrono's range end up here.
        .unwrap_or(31)
}
