//! Margin-aware availability of a single table.
//!
//! A booking blocks its table over `[start, end + margin)`: the reservation
//! itself plus the cleanup margin that trails it. No margin applies in front
//! of a booking. A request is available when it overlaps none of the blocked
//! intervals. Adjacent intervals (one ends exactly when the other starts) do
//! not overlap.
//!
//! Every function here works on the bookings of ONE table. Nothing filters by
//! table id; passing bookings from other tables silently yields wrong answers.
//! Use [`bookings_for_table`] to narrow a restaurant-wide list first.

use chrono::{DateTime, Duration, Utc};

use crate::interval::{TableBooking, TimeInterval};

/// The instant a table is free again after a booking ending at `booking_end`.
pub fn next_available_time(booking_end: DateTime<Utc>, margin_minutes: u32) -> DateTime<Utc> {
    booking_end + Duration::minutes(i64::from(margin_minutes))
}

/// True when `requested` conflicts with `booking` once the margin is applied.
///
/// Rejects iff `requested.start < booking.end + margin` and
/// `requested.end > booking.start`.
pub fn blocks(booking: &TableBooking, requested: &TimeInterval, margin_minutes: u32) -> bool {
    let free_from = next_available_time(booking.interval().end(), margin_minutes);
    requested.start() < free_from && requested.end() > booking.interval().start()
}

/// Whether `requested` can be seated on the table holding `existing_bookings`.
///
/// The bookings are only read. An empty list is always available.
pub fn is_available(
    requested: &TimeInterval,
    existing_bookings: &[TableBooking],
    margin_minutes: u32,
) -> bool {
    !existing_bookings
        .iter()
        .any(|b| blocks(b, requested, margin_minutes))
}

/// The bookings that make `requested` unavailable, in input order.
pub fn blocking_bookings<'a>(
    requested: &TimeInterval,
    existing_bookings: &'a [TableBooking],
    margin_minutes: u32,
) -> Vec<&'a TableBooking> {
    existing_bookings
        .iter()
        .filter(|b| blocks(b, requested, margin_minutes))
        .collect()
}

/// Earliest instant at or after `requested.start` from which a request of the
/// same length fits, considering only the trailing margins of the blocking
/// bookings. Returns `None` when `requested` is already available.
///
/// Each step jumps past the margin of the latest-ending blocker, so the loop
/// terminates after at most one step per booking.
pub fn earliest_free_start(
    requested: &TimeInterval,
    existing_bookings: &[TableBooking],
    margin_minutes: u32,
) -> Option<DateTime<Utc>> {
    let length = requested.end() - requested.start();
    let mut candidate = *requested;
    let mut moved = false;

    loop {
        let latest = blocking_bookings(&candidate, existing_bookings, margin_minutes)
            .into_iter()
            .map(|b| next_available_time(b.interval().end(), margin_minutes))
            .max();
        match latest {
            None => return moved.then(|| candidate.start()),
            Some(free_from) => {
                candidate = TimeInterval::from_ordered(free_from, free_from + length);
                moved = true;
            }
        }
    }
}

/// The bookings held by `table_id`, copied out of a restaurant-wide list.
pub fn bookings_for_table(bookings: &[TableBooking], table_id: &str) -> Vec<TableBooking> {
    bookings
        .iter()
        .filter(|b| b.table_id() == table_id)
        .cloned()
        .collect()
}
