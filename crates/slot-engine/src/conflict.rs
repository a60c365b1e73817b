//! Detect overlap between a candidate slot and existing bookings.
//!
//! Intervals are half-open `[start, end)`. A slot that ends exactly when a
//! booking starts (or starts exactly when one ends) is NOT a conflict.

use crate::booking::ExistingBooking;
use chrono::{NaiveDate, NaiveDateTime};

/// Two half-open intervals overlap iff `a_start < b_end && a_end > b_start`.
pub fn overlaps(
    a_start: NaiveDateTime,
    a_end: NaiveDateTime,
    b_start: NaiveDateTime,
    b_end: NaiveDateTime,
) -> bool {
    a_start < b_end && a_end > b_start
}

/// Return the first booking on `date` that overlaps `[start, end)`, if any.
pub fn first_conflict<'a>(
    start: NaiveDateTime,
    end: NaiveDateTime,
    date: NaiveDate,
    bookings: &'a [ExistingBooking],
) -> Option<&'a ExistingBooking> {
    bookings
        .iter()
        .find(|b| overlaps(start, end, b.start_on(date), b.end_on(date)))
}
