//! Date parsing and display formatting.
//!
//! Parsing is forgiving: the backend emits ISO 8601 timestamps, older
//! records carry bare `YYYY-MM-DD` strings, and formatters return the
//! input unchanged when it does not parse.

use chrono::{DateTime, Datelike, NaiveDate, Timelike};

use crate::protocol::YearRange;

/// Parse a bare date or the date part of an ISO 8601 timestamp.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date);
    }
    DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.date_naive())
}

/// Format as `YYYY-MM-DD`.
pub fn to_yyyy_mm_dd(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Year of the date string, if it parses.
pub fn year_of(value: &str) -> Option<i32> {
    parse_date(value).map(|d| d.year())
}

/// Whether the date string falls inside the inclusive year range.
/// Unparseable dates never match.
pub fn in_year_range(value: &str, range: &YearRange) -> bool {
    year_of(value).is_some_and(|year| range.contains(year))
}

/// Absolute day count between two date strings; zero when either side
/// does not parse.
pub fn days_between(start: &str, end: &str) -> i64 {
    match (parse_date(start), parse_date(end)) {
        (Some(start), Some(end)) => (end - start).num_days().abs(),
        _ => 0,
    }
}

/// Japanese display form, `2024年1月15日`. Returns the input unchanged
/// when it does not parse.
pub fn format_date(value: &str) -> String {
    match parse_date(value) {
        Some(date) => format!("{}年{}月{}日", date.year(), date.month(), date.day()),
        None => value.to_string(),
    }
}

/// Japanese date-time display form, `2024年1月15日 10:30`. Bare dates and
/// unparseable input fall back like [`format_date`].
pub fn format_date_time(value: &str, include_seconds: bool) -> String {
    let Ok(dt) = DateTime::parse_from_rfc3339(value) else {
        return format_date(value);
    };
    let mut formatted = format!(
        "{}年{}月{}日 {:02}:{:02}",
        dt.year(),
        dt.month(),
        dt.day(),
        dt.hour(),
        dt.minute()
    );
    if include_seconds {
        formatted.push_str(&format!(":{:02}", dt.second()));
    }
    formatted
}
