//! Existing bookings and repair of raw booking records.
//!
//! Booking records are read as loose JSON documents. A record that cannot be
//! placed on the day is skipped with a warning; a record with a missing or
//! malformed duration is treated as [`DEFAULT_BOOKING_MINUTES`] long. Neither
//! case fails the whole day.

use crate::time::parse_clock;
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde_json::Value;

/// Duration assumed for a blocking booking whose stored duration is unusable.
///
/// Never zero: a zero-length booking would conflict with nothing.
pub const DEFAULT_BOOKING_MINUTES: u32 = 60;

/// Lifecycle state of a booking record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingStatus {
    Confirmed,
    Pending,
    Cancelled,
    Declined,
    Completed,
    Other(String),
}

impl BookingStatus {
    /// Case-insensitive parse; unknown values are kept as `Other`.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "confirmed" => BookingStatus::Confirmed,
            "pending" => BookingStatus::Pending,
            "cancelled" | "canceled" => BookingStatus::Cancelled,
            "declined" => BookingStatus::Declined,
            "completed" => BookingStatus::Completed,
            other => BookingStatus::Other(other.to_string()),
        }
    }

    /// Only confirmed and pending bookings occupy their time.
    pub fn blocks_slots(&self) -> bool {
        matches!(self, BookingStatus::Confirmed | BookingStatus::Pending)
    }
}

/// A booking that occupies time on the requested day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExistingBooking {
    pub start_time: NaiveTime,
    pub duration_minutes: u32,
}

impl ExistingBooking {
    pub fn new(start_time: NaiveTime, duration_minutes: u32) -> Self {
        Self {
            start_time,
            duration_minutes,
        }
    }

    /// Start instant on `date`.
    pub fn start_on(&self, date: NaiveDate) -> NaiveDateTime {
        date.and_time(self.start_time)
    }

    /// End instant on `date` (exclusive).
    pub fn end_on(&self, date: NaiveDate) -> NaiveDateTime {
        self.start_on(date) + Duration::minutes(i64::from(self.duration_minutes))
    }
}

/// A booking record as fetched from the store, before repair.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingRecord {
    pub start_time: Option<String>,
    pub duration: Option<Value>,
    pub status: Option<String>,
}

impl BookingRecord {
    /// Extract the fields the calculator needs from a stored document.
    ///
    /// Start time is read from `startTime`, `time`, or `start`; duration from
    /// `durationMinutes` or `duration`. Non-object documents yield an empty
    /// record, which [`into_booking`](Self::into_booking) then discards.
    pub fn from_document(doc: &Value) -> Self {
        Self {
            start_time: first_field(doc, &["startTime", "time", "start"])
                .and_then(Value::as_str)
                .map(str::to_string),
            duration: first_field(doc, &["durationMinutes", "duration"]).cloned(),
            status: first_field(doc, &["status"])
                .and_then(Value::as_str)
                .map(str::to_string),
        }
    }

    pub fn status(&self) -> Option<BookingStatus> {
        self.status.as_deref().map(BookingStatus::parse)
    }

    /// Repair this record into an [`ExistingBooking`].
    ///
    /// Returns `None` when the record does not block time (missing or
    /// non-blocking status) or has no usable start time.
    pub fn into_booking(self) -> Option<ExistingBooking> {
        if !self.status().is_some_and(|s| s.blocks_slots()) {
            return None;
        }

        let start_time = match self.start_time.as_deref().and_then(parse_start_time) {
            Some(t) => t,
            None => {
                tracing::warn!(
                    start_time = ?self.start_time,
                    "skipping booking record without a usable start time"
                );
                return None;
            }
        };

        let duration_minutes = match self.duration.as_ref().and_then(parse_duration) {
            Some(minutes) => minutes,
            None => {
                tracing::warn!(
                    duration = ?self.duration,
                    default = DEFAULT_BOOKING_MINUTES,
                    "booking duration missing or malformed, using default"
                );
                DEFAULT_BOOKING_MINUTES
            }
        };

        Some(ExistingBooking::new(start_time, duration_minutes))
    }
}

/// Repair a day's raw booking documents, keeping only those that block time.
pub fn normalize_bookings(docs: &[Value]) -> Vec<ExistingBooking> {
    docs.iter()
        .filter_map(|doc| BookingRecord::from_document(doc).into_booking())
        .collect()
}

fn first_field<'a>(doc: &'a Value, names: &[&str]) -> Option<&'a Value> {
    names
        .iter()
        .filter_map(|name| doc.get(*name))
        .find(|v| !v.is_null())
}

/// Start time of day from `"HH:MM"` or a full ISO datetime.
///
/// Datetimes keep the wall-clock time as written; an RFC 3339 offset is not
/// converted.
fn parse_start_time(s: &str) -> Option<NaiveTime> {
    if let Ok(t) = parse_clock(s) {
        return Some(t);
    }
    let trimmed = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_local().time());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
        .map(|dt| dt.time())
}

/// A positive whole number of minutes, given as a JSON number or numeric string.
fn parse_duration(value: &Value) -> Option<u32> {
    let minutes = match value {
        Value::Number(n) => n.as_u64().or_else(|| n.as_f64().and_then(positive_minutes))?,
        Value::String(s) => s.trim().parse::<f64>().ok().and_then(positive_minutes)?,
        _ => return None,
    };
    u32::try_from(minutes).ok().filter(|m| *m > 0)
}

fn positive_minutes(f: f64) -> Option<u64> {
    (f.is_finite() && f > 0.0).then(|| f.round() as u64)
}
