//! Timestamp and percentage formatting.
//!
//! The store keeps every timestamp as text in a single fixed layout,
//! `YYYY-MM-DD HH:MM:SS`, so this module is the only place that knows it.
//! It also parses the looser text a user types on the command line, where a
//! bare date is accepted and means midnight.
//!
//! ## Examples
//!
//! ```rust
//! use taskdesk::libs::formatter::{format_timestamp, parse_timestamp};
//!
//! let ts = parse_timestamp("2024-03-01 09:30:00").unwrap();
//! assert_eq!(format_timestamp(&ts), "2024-03-01 09:30:00");
//! ```

use super::error::ValidationError;
use chrono::{Local, NaiveDate, NaiveDateTime, SubsecRound};

/// Layout used for every timestamp column.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Layout accepted for date-only user input.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn format_timestamp(value: &NaiveDateTime) -> String {
    value.format(TIMESTAMP_FORMAT).to_string()
}

pub fn parse_timestamp(value: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT)
}

/// Current local wall-clock time with the sub-second part dropped.
///
/// Values stored with [`TIMESTAMP_FORMAT`] only keep whole seconds, so model
/// timestamps are truncated up front to survive a round trip unchanged.
pub fn now() -> NaiveDateTime {
    Local::now().naive_local().trunc_subsecs(0)
}

/// Drops the sub-second part of a timestamp.
pub fn truncate(value: NaiveDateTime) -> NaiveDateTime {
    value.trunc_subsecs(0)
}

/// Parses a date typed by a user into a timestamp.
///
/// Accepts either the full storage layout or a bare `YYYY-MM-DD`, which maps to
/// midnight of that day. `field` names the input in the returned error.
pub fn parse_date_input(field: &'static str, value: &str) -> Result<NaiveDateTime, ValidationError> {
    let value = value.trim();
    if let Ok(ts) = parse_timestamp(value) {
        return Ok(ts);
    }

    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .ok_or_else(|| ValidationError::InvalidTimestamp {
            field,
            value: value.to_string(),
        })
}

/// Renders a progress percentage the way tables show it, e.g. `42%`.
pub fn format_percent(value: f64) -> String {
    format!("{:.0}%", value.clamp(0.0, 100.0).floor())
}
