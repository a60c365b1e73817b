//! Clock-time and calendar-date parsing and formatting.
//!
//! Stored schedules and bookings carry wall-clock times as `"HH:MM"` strings.
//! Everything past this module works with `chrono` values.

use crate::error::{Result, SlotError};
use chrono::{NaiveDate, NaiveTime};

/// Parse a wall-clock time: `"HH:MM"`, `"H:MM"` or `"HH:MM:SS"`.
pub fn parse_clock(s: &str) -> Result<NaiveTime> {
    let trimmed = s.trim();
    NaiveTime::parse_from_str(trimmed, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M:%S"))
        .map_err(|_| SlotError::InvalidSchedule(format!("invalid time of day '{}'", s)))
}

/// Format a time as zero-padded 24-hour `"HH:MM"`.
pub fn format_clock(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

/// Format a time for display, e.g. `"9:30 AM"`.
pub fn display_time(time: NaiveTime) -> String {
    time.format("%-I:%M %p").to_string()
}

/// Parse an ISO calendar date (`"YYYY-MM-DD"`).
///
/// # Errors
/// Returns `SlotError::InvalidArgument` if the string is not a valid date.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| SlotError::InvalidArgument(format!("invalid date '{}', expected YYYY-MM-DD", s)))
}

/// Serde adapter for `NaiveTime` as `"HH:MM"`.
pub(crate) mod clock_format {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_clock(*time))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let s = String::deserialize(deserializer)?;
        super::parse_clock(&s).map_err(serde::de::Error::custom)
    }
}
