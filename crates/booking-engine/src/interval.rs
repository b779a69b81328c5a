//! Validated time intervals and the booking records placed on tables.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{BookingError, Result};

/// A half-open time range `[start, end)` with `start < end`.
///
/// The only way to obtain one is through [`TimeInterval::new`] (or
/// deserialization, which calls it), so every interval in memory is valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawInterval")]
pub struct TimeInterval {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

#[derive(Deserialize)]
struct RawInterval {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TryFrom<RawInterval> for TimeInterval {
    type Error = BookingError;

    fn try_from(raw: RawInterval) -> Result<Self> {
        TimeInterval::new(raw.start, raw.end)
    }
}

impl TimeInterval {
    /// Build an interval, rejecting `start >= end`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self> {
        if start >= end {
            return Err(BookingError::InvalidInterval {
                start: start.to_rfc3339(),
                end: end.to_rfc3339(),
            });
        }
        Ok(Self { start, end })
    }

    /// For endpoints already known to be ordered.
    pub(crate) fn from_ordered(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        debug_assert!(start < end, "interval start must precede end");
        Self { start, end }
    }

    /// Build an interval of `minutes` length starting at `start`.
    pub fn starting_at(start: DateTime<Utc>, minutes: u32) -> Result<Self> {
        Self::new(start, start + Duration::minutes(i64::from(minutes)))
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// Half-open overlap test. Adjacent intervals do not overlap.
    pub fn overlaps(&self, other: &TimeInterval) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// True when `other` lies entirely inside this interval.
    pub fn contains(&self, other: &TimeInterval) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

/// An existing reservation on one table.
///
/// Immutable once built: the engine only reads bookings to test new requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BookingRecord", into = "BookingRecord")]
pub struct TableBooking {
    id: String,
    table_id: String,
    interval: TimeInterval,
    party_size: u32,
    customer_name: Option<String>,
}

/// Wire shape of a booking as returned by the `/bookings` resource.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BookingRecord {
    id: String,
    table_id: String,
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
    party_size: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    customer_name: Option<String>,
}

impl TryFrom<BookingRecord> for TableBooking {
    type Error = BookingError;

    fn try_from(record: BookingRecord) -> Result<Self> {
        let interval = TimeInterval::new(record.start_time, record.end_time)?;
        let booking = TableBooking::new(record.id, record.table_id, interval, record.party_size)?;
        Ok(match record.customer_name {
            Some(name) => booking.with_customer_name(name),
            None => booking,
        })
    }
}

impl From<TableBooking> for BookingRecord {
    fn from(booking: TableBooking) -> Self {
        Self {
            id: booking.id,
            table_id: booking.table_id,
            start_time: booking.interval.start,
            end_time: booking.interval.end,
            party_size: booking.party_size,
            customer_name: booking.customer_name,
        }
    }
}

impl TableBooking {
    /// Build a booking. `party_size` must be positive.
    ///
    /// The table id is carried as-is; nothing checks that the table exists.
    pub fn new(
        id: impl Into<String>,
        table_id: impl Into<String>,
        interval: TimeInterval,
        party_size: u32,
    ) -> Result<Self> {
        if party_size == 0 {
            return Err(BookingError::InvalidPartySize(
                "a booking must seat at least one guest".to_string(),
            ));
        }
        Ok(Self {
            id: id.into(),
            table_id: table_id.into(),
            interval,
            party_size,
            customer_name: None,
        })
    }

    pub fn with_customer_name(mut self, name: impl Into<String>) -> Self {
        self.customer_name = Some(name.into());
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn table_id(&self) -> &str {
        &self.table_id
    }

    pub fn interval(&self) -> &TimeInterval {
        &self.interval
    }

    pub fn party_size(&self) -> u32 {
        self.party_size
    }

    pub fn customer_name(&self) -> Option<&str> {
        self.customer_name.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, hour, min, 0).unwrap()
    }

    #[test]
    fn rejects_empty_and_inverted_intervals() {
        assert!(TimeInterval::new(at(18, 0), at(18, 0)).is_err());
        assert!(TimeInterval::new(at(20, 0), at(18, 0)).is_err());
        assert!(TimeInterval::new(at(18, 0), at(20, 0)).is_ok());
    }

    #[test]
    fn zero_length_slot_is_rejected() {
        assert!(TimeInterval::starting_at(at(12, 0), 0).is_err());
    }

    #[test]
    fn adjacent_intervals_do_not_overlap() {
        let a = TimeInterval::new(at(18, 0), at(20, 0)).unwrap();
        let b = TimeInterval::new(at(20, 0), at(21, 0)).unwrap();
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }

    #[test]
    fn booking_requires_positive_party() {
        let interval = TimeInterval::new(at(18, 0), at(20, 0)).unwrap();
        assert!(TableBooking::new("b1", "t1", interval, 0).is_err());
    }

    #[test]
    fn booking_deserializes_from_wire_shape() {
        let json = r#"{
            "id": "b1",
            "tableId": "t1",
            "startTime": "2024-01-15T18:00:00Z",
            "endTime": "2024-01-15T20:00:00Z",
            "partySize": 4,
            "customerName": "Rossi"
        }"#;
        let booking: TableBooking = serde_json::from_str(json).unwrap();
        assert_eq!(booking.table_id(), "t1");
        assert_eq!(booking.interval().duration_minutes(), 120);
        assert_eq!(booking.customer_name(), Some("Rossi"));
    }

    #[test]
    fn inverted_booking_fails_to_deserialize() {
        let json = r#"{
            "id": "b1",
            "tableId": "t1",
            "startTime": "2024-01-15T20:00:00Z",
            "endTime": "2024-01-15T18:00:00Z",
            "partySize": 4
        }"#;
        assert!(serde_json::from_str::<TableBooking>(json).is_err());
    }
}
