//! Canonical calendar-day keys.
//!
//! Multi-date selection needs set membership over calendar days, and the
//! records the engine emits carry days as strings. `NaiveDate` is the
//! timezone-free carrier inside the engine; the `YYYY-MM-DD` key is the
//! stable textual form at the edges.

use chrono::{DateTime, Local, NaiveDate};

const KEY_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, thiserror::Error)]
pub enum DateKeyError {
    #[error("Malformed date key: {0}")]
    Malformed(String),
}

/// Format a calendar day as its zero-padded `YYYY-MM-DD` key.
pub fn to_key(day: NaiveDate) -> String {
    day.format(KEY_FORMAT).to_string()
}

/// Parse a `YYYY-MM-DD` key back into a calendar day.
pub fn from_key(key: &str) -> Result<NaiveDate, DateKeyError> {
    NaiveDate::parse_from_str(key, KEY_FORMAT)
        .map_err(|_| DateKeyError::Malformed(key.to_string()))
}

/// The local calendar day of an instant.
///
/// Two instants on the same local day map to the same key regardless of
/// their time-of-day.
pub fn local_day(instant: &DateTime<Local>) -> NaiveDate {
    instant.date_naive()
}

/// Whole days from `start` to `end`; negative when `end` precedes `start`.
pub fn days_between(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days()
}

/// Every day from `start` (inclusive) to `end` (exclusive), ascending.
///
/// For a stay this yields exactly the nights: check-out day excluded.
/// Empty when `end` is not after `start`.
pub fn days_in_range(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    start.iter_days().take_while(|day| *day < end).collect()
}
