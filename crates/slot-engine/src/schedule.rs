//! Weekly operating hours and normalization of stored schedule documents.
//!
//! Vendor documents come from a loosely-typed document store: day keys may be
//! weekday names or indices, and the open/close fields appear under several
//! synonyms. [`WeeklySchedule::from_document`] is the single place those
//! variants are resolved; the calculator only ever sees the canonical shape.

use crate::error::{Result, SlotError};
use crate::time::parse_clock;
use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
use serde::Deserialize;
use serde_json::Value;

/// Opening time used when a day is marked open but carries no times.
pub fn default_open_time() -> NaiveTime {
    NaiveTime::from_hms_opt(9, 0, 0).expect("09:00 is a valid time")
}

/// Closing time used when a day is marked open but carries no times.
pub fn default_close_time() -> NaiveTime {
    NaiveTime::from_hms_opt(17, 0, 0).expect("17:00 is a valid time")
}

/// Operating hours for one day of the week.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DaySchedule {
    pub is_open: bool,
    pub open_time: NaiveTime,
    pub close_time: NaiveTime,
}

impl DaySchedule {
    pub fn open(open_time: NaiveTime, close_time: NaiveTime) -> Self {
        Self {
            is_open: true,
            open_time,
            close_time,
        }
    }

    pub fn closed() -> Self {
        Self {
            is_open: false,
            open_time: default_open_time(),
            close_time: default_close_time(),
        }
    }
}

impl Default for DaySchedule {
    fn default() -> Self {
        Self::closed()
    }
}

/// A vendor's operating hours, indexed Sunday (0) through Saturday (6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WeeklySchedule {
    days: [DaySchedule; 7],
}

impl WeeklySchedule {
    pub fn new(days: [DaySchedule; 7]) -> Self {
        Self { days }
    }

    /// A schedule with every day closed.
    pub fn closed() -> Self {
        Self::default()
    }

    /// Builder-style setter for a single weekday.
    pub fn with_day(mut self, weekday: Weekday, day: DaySchedule) -> Self {
        self.days[weekday.num_days_from_sunday() as usize] = day;
        self
    }

    pub fn day(&self, weekday: Weekday) -> &DaySchedule {
        &self.days[weekday.num_days_from_sunday() as usize]
    }

    /// Hours for the weekday `date` falls on.
    pub fn for_date(&self, date: NaiveDate) -> &DaySchedule {
        self.day(date.weekday())
    }

    /// Normalize a stored schedule document into canonical form.
    ///
    /// The document is a JSON object keyed by weekday. Keys may be full names
    /// (`"monday"`), three-letter abbreviations (`"mon"`) in any case, or
    /// Sunday-based indices (`"0"`..`"6"`). Unrecognized keys are ignored.
    ///
    /// Per day, the open time is read from `openTime`, `start`, or `open`
    /// (first non-empty wins) and the close time from `closeTime`, `end`, or
    /// `close`. A day is open only when `isOpen` is `true` (or the string
    /// `"true"`):
    ///
    /// - a day absent from the document, or stored as `null`, is closed;
    /// - a day entry with the wrong shape is logged and treated as closed;
    /// - a day marked open with no times uses 09:00–17:00.
    ///
    /// # Errors
    /// Returns `SlotError::InvalidSchedule` if the document is not an object
    /// or an open day's time string is unparseable.
    pub fn from_document(doc: &Value) -> Result<Self> {
        let map = doc.as_object().ok_or_else(|| {
            SlotError::InvalidSchedule("schedule document must be an object".to_string())
        })?;

        let mut schedule = Self::closed();
        for (key, entry) in map {
            let Some(weekday) = parse_weekday_key(key) else {
                tracing::debug!(key = %key, "ignoring unrecognized schedule key");
                continue;
            };
            if entry.is_null() {
                continue;
            }
            let raw = match RawDaySchedule::deserialize(entry) {
                Ok(raw) => raw,
                Err(e) => {
                    tracing::warn!(
                        key = %key,
                        error = %e,
                        "malformed schedule entry, treating day as closed"
                    );
                    continue;
                }
            };
            schedule = schedule.with_day(weekday, raw.normalize(key)?);
        }
        Ok(schedule)
    }
}

/// A schedule day as stored, before synonym resolution.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDaySchedule {
    #[serde(default, alias = "is_open")]
    is_open: Option<Value>,
    #[serde(default, alias = "open_time")]
    open_time: Option<String>,
    #[serde(default)]
    start: Option<String>,
    #[serde(default)]
    open: Option<String>,
    #[serde(default, alias = "close_time")]
    close_time: Option<String>,
    #[serde(default)]
    end: Option<String>,
    #[serde(default)]
    close: Option<String>,
}

impl RawDaySchedule {
    fn normalize(self, key: &str) -> Result<DaySchedule> {
        if !open_flag(key, self.is_open.as_ref()) {
            return Ok(DaySchedule::closed());
        }
        let open_time = match first_present([self.open_time, self.start, self.open]) {
            Some(s) => parse_clock(&s)?,
            None => default_open_time(),
        };
        let close_time = match first_present([self.close_time, self.end, self.close]) {
            Some(s) => parse_clock(&s)?,
            None => default_close_time(),
        };
        Ok(DaySchedule::open(open_time, close_time))
    }
}

fn first_present<const N: usize>(candidates: [Option<String>; N]) -> Option<String> {
    candidates
        .into_iter()
        .flatten()
        .find(|s| !s.trim().is_empty())
}

/// Read an `isOpen` flag stored as a bool or a `"true"`/`"false"` string.
/// Anything else closes the day.
fn open_flag(key: &str, value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) if s.trim().eq_ignore_ascii_case("true") => true,
        Some(Value::String(s)) if s.trim().eq_ignore_ascii_case("false") => false,
        Some(other) => {
            tracing::warn!(
                key = %key,
                is_open = %other,
                "unrecognized isOpen value, treating day as closed"
            );
            false
        }
    }
}

fn parse_weekday_key(key: &str) -> Option<Weekday> {
    let key = key.trim().to_ascii_lowercase();
    let weekday = match key.as_str() {
        "0" | "sun" | "sunday" => Weekday::Sun,
        "1" | "mon" | "monday" => Weekday::Mon,
        "2" | "tue" | "tues" | "tuesday" => Weekday::Tue,
        "3" | "wed" | "wednesday" => Weekday::Wed,
        "4" | "thu" | "thur" | "thurs" | "thursday" => Weekday::Thu,
        "5" | "fri" | "friday" => Weekday::Fri,
        "6" | "sat" | "saturday" => Weekday::Sat,
        _ => return None,
    };
    Some(weekday)
}
