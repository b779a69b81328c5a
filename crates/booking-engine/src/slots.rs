//! Slot enumeration and free windows over a table's day.

use std::iter::FusedIterator;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::Serialize;

use crate::availability::{is_available, next_available_time};
use crate::hours::OpeningHours;
use crate::interval::{TableBooking, TimeInterval};

/// Slot granularity used when the caller has no preference.
pub const DEFAULT_SLOT_MINUTES: u32 = 60;

/// Lazy, ascending sequence of available slot starts.
///
/// Cloning yields an independent iterator from the same position, so a fresh
/// clone taken before iteration restarts the sequence.
#[derive(Debug, Clone)]
pub struct Slots<'a> {
    cursor: DateTime<Utc>,
    close: DateTime<Utc>,
    step: Duration,
    bookings: &'a [TableBooking],
    margin_minutes: u32,
}

impl Iterator for Slots<'_> {
    type Item = DateTime<Utc>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.step <= Duration::zero() {
            return None;
        }
        loop {
            let slot_end = self.cursor + self.step;
            // A slot that would run past closing is never offered.
            if slot_end > self.close {
                self.cursor = self.close;
                return None;
            }
            let slot = TimeInterval::from_ordered(self.cursor, slot_end);
            self.cursor = slot_end;
            if is_available(&slot, self.bookings, self.margin_minutes) {
                return Some(slot.start());
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.step <= Duration::zero() || self.cursor >= self.close {
            return (0, Some(0));
        }
        let remaining = (self.close - self.cursor).num_minutes() / self.step.num_minutes();
        (0, usize::try_from(remaining).ok())
    }
}

impl FusedIterator for Slots<'_> {}

/// Available slot starts on `day` between opening and closing, stepped by
/// `slot_minutes`, reading wall-clock hours as UTC.
///
/// `existing_bookings` must belong to one table. A zero `slot_minutes` yields
/// nothing.
pub fn enumerate_slots<'a>(
    day: NaiveDate,
    hours: &OpeningHours,
    existing_bookings: &'a [TableBooking],
    margin_minutes: u32,
    slot_minutes: u32,
) -> Slots<'a> {
    enumerate_slots_in(
        hours.window_on(day),
        existing_bookings,
        margin_minutes,
        slot_minutes,
    )
}

/// Like [`enumerate_slots`] but over an already resolved opening window, e.g.
/// one produced by [`OpeningHours::window_in`].
pub fn enumerate_slots_in(
    window: TimeInterval,
    existing_bookings: &[TableBooking],
    margin_minutes: u32,
    slot_minutes: u32,
) -> Slots<'_> {
    tracing::trace!(
        start = %window.start(),
        end = %window.end(),
        slot_minutes,
        bookings = existing_bookings.len(),
        "enumerating slots"
    );
    Slots {
        cursor: window.start(),
        close: window.end(),
        step: Duration::minutes(i64::from(slot_minutes)),
        bookings: existing_bookings,
        margin_minutes,
    }
}

/// A gap in a table's day during which it is neither booked nor being reset.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FreeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub duration_minutes: i64,
}

/// Merge each booking's blocked interval `[start, end + margin)`, clipped to
/// the window. Returns sorted, non-overlapping periods.
fn merge_blocked_periods(
    bookings: &[TableBooking],
    margin_minutes: u32,
    window: &TimeInterval,
) -> Vec<(DateTime<Utc>, DateTime<Utc>)> {
    let mut periods: Vec<(DateTime<Utc>, DateTime<Utc>)> = bookings
        .iter()
        .map(|b| {
            (
                b.interval().start(),
                next_available_time(b.interval().end(), margin_minutes),
            )
        })
        .filter(|&(start, end)| start < window.end() && end > window.start())
        .map(|(start, end)| (start.max(window.start()), end.min(window.end())))
        .collect();

    periods.sort_by_key(|&(start, end)| (start, end));

    let mut merged: Vec<(DateTime<Utc>, DateTime<Utc>)> = Vec::with_capacity(periods.len());
    for (start, end) in periods {
        if let Some(last) = merged.last_mut() {
            if start <= last.1 {
                last.1 = last.1.max(end);
                continue;
            }
        }
        merged.push((start, end));
    }
    merged
}

/// Free windows of one table within `window`, sorted by start.
///
/// Unlike [`enumerate_slots`] this is not quantised: each window is a maximal
/// gap, and any request that fits inside one is available.
pub fn free_windows(
    window: &TimeInterval,
    existing_bookings: &[TableBooking],
    margin_minutes: u32,
) -> Vec<FreeWindow> {
    let blocked = merge_blocked_periods(existing_bookings, margin_minutes, window);

    let mut free = Vec::new();
    let mut cursor = window.start();
    for (blocked_start, blocked_end) in blocked {
        if cursor < blocked_start {
            free.push(FreeWindow {
                start: cursor,
                end: blocked_start,
                duration_minutes: (blocked_start - cursor).num_minutes(),
            });
        }
        cursor = cursor.max(blocked_end);
    }

    if cursor < window.end() {
        free.push(FreeWindow {
            start: cursor,
            end: window.end(),
            duration_minutes: (window.end() - cursor).num_minutes(),
        });
    }

    free
}
