//! Upstream timestamps.
//!
//! The facility feed writes `YYYY-MM-DD HH:MM:SS` without an offset. The
//! values are UTC.

use chrono::{DateTime, NaiveDateTime, Utc};

pub const UPSTREAM_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parse an upstream timestamp. `None` when the text does not match the format.
pub fn parse_upstream_time(s: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(s.trim(), UPSTREAM_TIME_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}

pub fn format_upstream_time(t: DateTime<Utc>) -> String {
    t.format(UPSTREAM_TIME_FORMAT).to_string()
}
