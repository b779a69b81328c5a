//! Tests for slot enumeration and free windows.

use booking_engine::hours::parse_timezone;
use booking_engine::slots::{enumerate_slots, enumerate_slots_in, free_windows, DEFAULT_SLOT_MINUTES};
use booking_engine::{OpeningHours, TableBooking, TimeInterval};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
}

fn at(hour: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 15, hour, min, 0).unwrap()
}

fn booking(id: &str, start: (u32, u32), end: (u32, u32)) -> TableBooking {
    let interval = TimeInterval::new(at(start.0, start.1), at(end.0, end.1)).unwrap();
    TableBooking::new(id, "t1", interval, 4).unwrap()
}

fn hours(s: &str) -> OpeningHours {
    s.parse().unwrap()
}

#[test]
fn two_hour_window_yields_two_hourly_slots() {
    let slots: Vec<_> = enumerate_slots(day(), &hours("12:00 - 14:00"), &[], 90, 60).collect();
    assert_eq!(slots, vec![at(12, 0), at(13, 0)]);
}

#[test]
fn partial_last_slot_is_dropped() {
    let slots: Vec<_> = enumerate_slots(day(), &hours("12:00 - 14:30"), &[], 0, 60).collect();
    assert_eq!(slots, vec![at(12, 0), at(13, 0)]);
}

#[test]
fn slot_longer_than_opening_yields_nothing() {
    let slots: Vec<_> = enumerate_slots(day(), &hours("12:00 - 12:45"), &[], 0, 60).collect();
    assert!(slots.is_empty());
}

#[test]
fn booked_evening_removes_blocked_slots() {
    // Booking 18:00-20:00 + 90 minutes blocks slots overlapping 18:00-21:30.
    let existing = vec![booking("b1", (18, 0), (20, 0))];
    let slots: Vec<_> =
        enumerate_slots(day(), &hours("12:00 - 23:00"), &existing, 90, DEFAULT_SLOT_MINUTES)
            .collect();

    let expected = vec![
        at(12, 0),
        at(13, 0),
        at(14, 0),
        at(15, 0),
        at(16, 0),
        at(17, 0),
        at(22, 0),
    ];
    assert_eq!(slots, expected);
}

#[test]
fn half_hour_slots_resume_right_after_margin() {
    let existing = vec![booking("b1", (18, 0), (20, 0))];
    let slots: Vec<_> =
        enumerate_slots(day(), &hours("17:00 - 23:00"), &existing, 90, 30).collect();
    assert_eq!(
        slots,
        vec![
            at(17, 0),
            at(17, 30),
            at(21, 30),
            at(22, 0),
            at(22, 30)
        ]
    );
}

#[test]
fn fully_booked_day_is_empty() {
    let existing = vec![booking("b1", (12, 0), (23, 0))];
    let slots: Vec<_> = enumerate_slots(day(), &hours("12:00 - 23:00"), &existing, 0, 60).collect();
    assert!(slots.is_empty());
}

#[test]
fn zero_slot_duration_yields_nothing() {
    let mut slots = enumerate_slots(day(), &hours("12:00 - 23:00"), &[], 0, 0);
    assert_eq!(slots.next(), None);
}

#[test]
fn slots_are_restartable_and_ascending() {
    let existing = vec![booking("b1", (14, 0), (15, 0))];
    let slots = enumerate_slots(day(), &hours("12:00 - 20:00"), &existing, 30, 60);

    let first: Vec<_> = slots.clone().collect();
    let second: Vec<_> = slots.collect();
    assert_eq!(first, second);
    assert!(first.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn enumeration_in_timezone_uses_local_opening() {
    let tz = parse_timezone("Europe/Rome").unwrap();
    let window = hours("12:00 - 14:00").window_in(day(), tz).unwrap();
    let slots: Vec<_> = enumerate_slots_in(window, &[], 0, 60).collect();
    assert_eq!(slots, vec![at(11, 0), at(12, 0)]);
}

#[test]
fn free_windows_apply_trailing_margin() {
    let window = hours("12:00 - 23:00").window_on(day());
    let existing = vec![booking("b1", (18, 0), (20, 0))];

    let free = free_windows(&window, &existing, 90);

    assert_eq!(free.len(), 2);
    assert_eq!((free[0].start, free[0].end), (at(12, 0), at(18, 0)));
    assert_eq!(free[0].duration_minutes, 360);
    assert_eq!((free[1].start, free[1].end), (at(21, 30), at(23, 0)));
    assert_eq!(free[1].duration_minutes, 90);
}

#[test]
fn free_windows_merge_margin_overlaps() {
    // 13:00 + 60 margin reaches into the 13:30 booking.
    let window = hours("12:00 - 18:00").window_on(day());
    let existing = vec![booking("b2", (13, 30), (15, 0)), booking("b1", (12, 0), (13, 0))];

    let free = free_windows(&window, &existing, 60);

    assert_eq!(free.len(), 1);
    assert_eq!((free[0].start, free[0].end), (at(16, 0), at(18, 0)));
}

#[test]
fn free_windows_clip_margin_at_closing() {
    let window = hours("12:00 - 23:00").window_on(day());
    let existing = vec![booking("b1", (21, 0), (22, 30))];

    let free = free_windows(&window, &existing, 90);

    assert_eq!(free.len(), 1);
    assert_eq!(free[0].end, at(21, 0));
}
