//! Tests for the slot grid calculator.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use slot_engine::{compute_availability, CandidateSlot, DaySchedule, ExistingBooking, WeeklySchedule};

// ── Helpers ─────────────────────────────────────────────────────────────────

fn t(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// 2026-03-16 is a Monday.
fn monday() -> NaiveDate {
    date(2026, 3, 16)
}

/// A clock reading well before the requested day.
fn earlier_now() -> NaiveDateTime {
    date(2026, 3, 1).and_time(t(8, 0))
}

fn nine_to_five_every_day() -> WeeklySchedule {
    let mut schedule = WeeklySchedule::closed();
    for weekday in [
        Weekday::Sun,
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
    ] {
        schedule = schedule.with_day(weekday, DaySchedule::open(t(9, 0), t(17, 0)));
    }
    schedule
}

fn times(slots: &[CandidateSlot]) -> Vec<NaiveTime> {
    slots.iter().map(|s| s.start_time).collect()
}

fn slot_at(slots: &[CandidateSlot], time: NaiveTime) -> &CandidateSlot {
    slots
        .iter()
        .find(|s| s.start_time == time)
        .unwrap_or_else(|| panic!("no slot at {}", time))
}

// ── Open day, no bookings, 60-minute service ────────────────────────────────

#[test]
fn open_day_without_bookings_fills_until_service_fits() {
    let slots =
        compute_availability(&nine_to_five_every_day(), &[], monday(), 60, earlier_now()).unwrap();

    // 09:00 through 16:00 inclusive; 16:30 + 60 min would run past 17:00.
    assert_eq!(slots.len(), 15);
    assert_eq!(slots[0].start_time, t(9, 0));
    assert_eq!(slots[14].start_time, t(16, 0));
    assert!(slots.iter().all(|s| s.available));
    assert!(!times(&slots).contains(&t(16, 30)));
}

#[test]
fn display_times_are_twelve_hour() {
    let slots =
        compute_availability(&nine_to_five_every_day(), &[], monday(), 60, earlier_now()).unwrap();
    assert_eq!(slots[0].display_time, "9:00 AM");
    assert_eq!(slots[1].display_time, "9:30 AM");
    assert_eq!(slot_at(&slots, t(12, 0)).display_time, "12:00 PM");
    assert_eq!(slots[14].display_time, "4:00 PM");
}

// ── One booking, touching endpoints are fine ────────────────────────────────

#[test]
fn booking_blocks_overlapping_slots_but_not_touching_ones() {
    let bookings = vec![ExistingBooking::new(t(14, 0), 60)];
    let slots =
        compute_availability(&nine_to_five_every_day(), &bookings, monday(), 30, earlier_now())
            .unwrap();

    // 09:00..16:30 for a 30-minute service.
    assert_eq!(slots.len(), 16);
    assert!(slot_at(&slots, t(13, 30)).available, "13:30-14:00 only touches the booking");
    assert!(!slot_at(&slots, t(14, 0)).available);
    assert!(!slot_at(&slots, t(14, 30)).available);
    assert!(slot_at(&slots, t(15, 0)).available, "15:00 starts as the booking ends");
}

#[test]
fn longer_service_conflicts_earlier() {
    // Booking 10:00-11:30, 60-minute service.
    let bookings = vec![ExistingBooking::new(t(10, 0), 90)];
    let slots =
        compute_availability(&nine_to_five_every_day(), &bookings, monday(), 60, earlier_now())
            .unwrap();

    assert!(slot_at(&slots, t(9, 0)).available, "09:00-10:00 touches 10:00");
    assert!(!slot_at(&slots, t(9, 30)).available);
    assert!(!slot_at(&slots, t(10, 0)).available);
    assert!(!slot_at(&slots, t(10, 30)).available);
    assert!(!slot_at(&slots, t(11, 0)).available);
    assert!(slot_at(&slots, t(11, 30)).available);
}

#[test]
fn unavailable_slots_stay_in_the_grid() {
    let bookings = vec![ExistingBooking::new(t(9, 0), 8 * 60)];
    let slots =
        compute_availability(&nine_to_five_every_day(), &bookings, monday(), 30, earlier_now())
            .unwrap();

    assert_eq!(slots.len(), 16);
    assert!(slots.iter().all(|s| !s.available));
}

// ── Same-day past masking ───────────────────────────────────────────────────

#[test]
fn same_day_slots_before_now_are_unavailable() {
    let now = monday().and_time(t(15, 10));
    let slots = compute_availability(&nine_to_five_every_day(), &[], monday(), 30, now).unwrap();

    for slot in &slots {
        if slot.start_time < t(15, 10) {
            assert!(!slot.available, "{} should be in the past", slot.start_time);
        } else {
            assert!(slot.available, "{} should be open", slot.start_time);
        }
    }
    assert!(!slot_at(&slots, t(15, 0)).available);
    assert!(slot_at(&slots, t(15, 30)).available);
}

#[test]
fn slot_starting_exactly_now_is_available() {
    let now = monday().and_time(t(11, 0));
    let slots = compute_availability(&nine_to_five_every_day(), &[], monday(), 30, now).unwrap();
    assert!(!slot_at(&slots, t(10, 30)).available);
    assert!(slot_at(&slots, t(11, 0)).available);
}

#[test]
fn past_masking_only_applies_to_today() {
    // Clock reads late on the Sunday before; Monday is untouched.
    let now = date(2026, 3, 15).and_time(t(23, 0));
    let slots = compute_availability(&nine_to_five_every_day(), &[], monday(), 30, now).unwrap();
    assert!(slots.iter().all(|s| s.available));
}

#[test]
fn past_dates_are_not_masked() {
    let now = date(2026, 3, 20).and_time(t(12, 0));
    let slots = compute_availability(&nine_to_five_every_day(), &[], monday(), 30, now).unwrap();
    assert_eq!(slots.len(), 16);
    assert!(slots.iter().all(|s| s.available));
}

// ── Closed days ─────────────────────────────────────────────────────────────

#[test]
fn vendor_closed_all_week_never_has_slots() {
    let schedule = WeeklySchedule::closed();
    for offset in 0..7 {
        let day = monday() + Duration::days(offset);
        let slots = compute_availability(&schedule, &[], day, 30, earlier_now()).unwrap();
        assert!(slots.is_empty(), "{} should be closed", day);
    }
}

#[test]
fn closed_weekday_returns_empty_even_when_other_days_open() {
    let schedule = nine_to_five_every_day().with_day(Weekday::Mon, DaySchedule::closed());
    let slots = compute_availability(&schedule, &[], monday(), 30, earlier_now()).unwrap();
    assert!(slots.is_empty());

    let tuesday = monday() + Duration::days(1);
    let slots = compute_availability(&schedule, &[], tuesday, 30, earlier_now()).unwrap();
    assert_eq!(slots.len(), 16);
}

// ── Grid shape ──────────────────────────────────────────────────────────────

#[test]
fn grid_starts_at_opening_even_off_the_half_hour() {
    let schedule =
        WeeklySchedule::closed().with_day(Weekday::Mon, DaySchedule::open(t(9, 15), t(12, 0)));
    let slots = compute_availability(&schedule, &[], monday(), 30, earlier_now()).unwrap();
    assert_eq!(
        times(&slots),
        vec![t(9, 15), t(9, 45), t(10, 15), t(10, 45), t(11, 15)]
    );
}

#[test]
fn service_longer_than_opening_hours_yields_nothing() {
    let schedule =
        WeeklySchedule::closed().with_day(Weekday::Mon, DaySchedule::open(t(10, 0), t(11, 0)));
    let slots = compute_availability(&schedule, &[], monday(), 90, earlier_now()).unwrap();
    assert!(slots.is_empty());
}

#[test]
fn service_exactly_filling_the_day_yields_one_slot() {
    let schedule =
        WeeklySchedule::closed().with_day(Weekday::Mon, DaySchedule::open(t(9, 0), t(17, 0)));
    let slots = compute_availability(&schedule, &[], monday(), 8 * 60, earlier_now()).unwrap();
    assert_eq!(times(&slots), vec![t(9, 0)]);
}

#[test]
fn late_closing_does_not_spill_into_next_day() {
    let schedule =
        WeeklySchedule::closed().with_day(Weekday::Mon, DaySchedule::open(t(22, 0), t(23, 59)));
    let slots = compute_availability(&schedule, &[], monday(), 60, earlier_now()).unwrap();
    assert_eq!(times(&slots), vec![t(22, 0), t(22, 30)]);
}
