//! Appointment availability: the 30-minute slot grid for one vendor-day.
//!
//! Given a weekly schedule, the day's blocking bookings, the requested
//! service duration, and the current wall-clock instant, produce every
//! candidate start time from opening until the service no longer fits before
//! closing. Each candidate is flagged available or not; callers see the
//! full grid, not only the open slots.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::booking::ExistingBooking;
use crate::conflict;
use crate::error::{Result, SlotError};
use crate::schedule::WeeklySchedule;
use crate::time::{clock_format, display_time};

/// Fixed distance between consecutive candidate start times.
pub const SLOT_INTERVAL_MINUTES: i64 = 30;

/// One candidate appointment start time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateSlot {
    /// Start time on the requested date, serialized as `"HH:MM"`.
    #[serde(rename = "time", with = "clock_format")]
    pub start_time: NaiveTime,
    /// Display form of the start time, e.g. `"9:30 AM"`.
    #[serde(rename = "display")]
    pub display_time: String,
    pub available: bool,
}

/// Compute the slot grid for `date`.
///
/// Candidates start at opening time and step forward by
/// [`SLOT_INTERVAL_MINUTES`]. Generation stops at the first candidate whose
/// service would run past closing, so every returned slot fits. A candidate
/// is unavailable when it overlaps a booking (half-open, touching is fine)
/// or, when `date` is `now`'s date, when it starts before `now`.
///
/// `now` is the vendor's local wall-clock time. A closed day yields an empty
/// list, not a list of unavailable slots.
///
/// # Errors
/// Returns `SlotError::InvalidArgument` if `service_duration_minutes` is zero.
pub fn compute_availability(
    schedule: &WeeklySchedule,
    bookings: &[ExistingBooking],
    date: NaiveDate,
    service_duration_minutes: u32,
    now: NaiveDateTime,
) -> Result<Vec<CandidateSlot>> {
    if service_duration_minutes == 0 {
        return Err(SlotError::InvalidArgument(
            "service duration must be greater than zero".to_string(),
        ));
    }

    let day = schedule.for_date(date);
    if !day.is_open {
        tracing::debug!(%date, "vendor closed on requested day");
        return Ok(Vec::new());
    }

    let open = date.and_time(day.open_time);
    let close = date.and_time(day.close_time);
    let service = Duration::minutes(i64::from(service_duration_minutes));
    let step = Duration::minutes(SLOT_INTERVAL_MINUTES);
    let is_today = now.date() == date;

    let mut slots = Vec::new();
    let mut start = open;
    while start < close {
        let end = start + service;
        // Later candidates start even later, so none of them can fit either.
        if end > close {
            break;
        }

        let conflict = conflict::first_conflict(start, end, date, bookings).is_some();
        let past = is_today && start < now;

        slots.push(CandidateSlot {
            start_time: start.time(),
            display_time: display_time(start.time()),
            available: !conflict && !past,
        });
        start += step;
    }

    tracing::debug!(
        %date,
        total = slots.len(),
        available = slots.iter().filter(|s| s.available).count(),
        "computed slot grid"
    );
    Ok(slots)
}

/// The earliest available slot in a computed grid.
pub fn first_available(slots: &[CandidateSlot]) -> Option<&CandidateSlot> {
    slots.iter().find(|s| s.available)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::DaySchedule;
    use chrono::Weekday;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn zero_duration_is_rejected() {
        let schedule = WeeklySchedule::closed();
        let date = NaiveDate::from_ymd_opt(2026, 3, 16).unwrap();
        let now = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap().and_time(t(8, 0));
        let result = compute_availability(&schedule, &[], date, 0, now);
        assert!(matches!(result, Err(SlotError::InvalidArgument(_))));
    }

    #[test]
    fn inverted_hours_produce_no_slots() {
        // 2026-03-16 is a Monday.
        let schedule =
            WeeklySchedule::closed().with_day(Weekday::Mon, DaySchedule::open(t(17, 0), t(9, 0)));
        let date = NaiveDate::from_ymd_opt(2026, 3, 16).unwrap();
        let now = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap().and_time(t(8, 0));
        let slots = compute_availability(&schedule, &[], date, 30, now).unwrap();
        assert!(slots.is_empty());
    }

    #[test]
    fn first_available_skips_unavailable() {
        let slots = vec![
            CandidateSlot {
                start_time: t(9, 0),
                display_time: "9:00 AM".to_string(),
                available: false,
            },
            CandidateSlot {
                start_time: t(9, 30),
                display_time: "9:30 AM".to_string(),
                available: true,
            },
        ];
        assert_eq!(first_available(&slots).unwrap().start_time, t(9, 30));
        assert!(first_available(&slots[..1]).is_none());
    }
}
