//! Tables, their status, and the per-table candidates offered for a request.

use serde::{Deserialize, Serialize};

use crate::availability::{bookings_for_table, is_available};
use crate::error::{BookingError, Result};
use crate::interval::{TableBooking, TimeInterval};

/// Current state of a table on the floor plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableStatus {
    #[default]
    Available,
    Occupied,
    Reserved,
    Maintenance,
}

impl TableStatus {
    /// Whether a table in this state may receive bookings for a later time.
    ///
    /// `Occupied` and `Reserved` describe the present moment and say nothing
    /// about future slots; only `Maintenance` takes a table out of service.
    pub fn accepts_future_bookings(self) -> bool {
        match self {
            TableStatus::Available | TableStatus::Occupied | TableStatus::Reserved => true,
            TableStatus::Maintenance => false,
        }
    }
}

/// A table as returned by the `/tables` resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    pub id: String,
    /// Label shown to staff, e.g. "A1".
    pub number: String,
    pub zone_id: String,
    pub capacity: u32,
    #[serde(default)]
    pub status: TableStatus,
}

/// A table that is free for the requested slot, scored against the party.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableTableCandidate {
    pub table_id: String,
    pub capacity: u32,
    /// `capacity - party_size`; negative when the table alone is too small.
    pub efficiency: i64,
    /// `capacity >= party_size`.
    pub is_suitable: bool,
}

impl AvailableTableCandidate {
    pub fn new(table_id: impl Into<String>, capacity: u32, party_size: u32) -> Result<Self> {
        let table_id = table_id.into();
        if capacity == 0 {
            return Err(BookingError::InvalidCapacity(format!(
                "table {} has no seats",
                table_id
            )));
        }
        if party_size == 0 {
            return Err(BookingError::InvalidPartySize(
                "a party must have at least one guest".to_string(),
            ));
        }
        Ok(Self {
            table_id,
            capacity,
            efficiency: i64::from(capacity) - i64::from(party_size),
            is_suitable: capacity >= party_size,
        })
    }
}

/// Every table that can take `requested` for a party of `party_size`.
///
/// Tables under maintenance are skipped. `bookings` may span the whole
/// restaurant; each table is checked only against its own bookings.
/// Candidates keep the order of `tables`.
pub fn find_candidates(
    tables: &[Table],
    bookings: &[TableBooking],
    requested: &TimeInterval,
    margin_minutes: u32,
    party_size: u32,
) -> Result<Vec<AvailableTableCandidate>> {
    let mut candidates = Vec::new();

    for table in tables {
        if !table.status.accepts_future_bookings() {
            tracing::trace!(table = %table.id, status = ?table.status, "skipping table");
            continue;
        }
        let own = bookings_for_table(bookings, &table.id);
        if !is_available(requested, &own, margin_minutes) {
            tracing::trace!(table = %table.id, bookings = own.len(), "table is blocked");
            continue;
        }
        candidates.push(AvailableTableCandidate::new(
            table.id.clone(),
            table.capacity,
            party_size,
        )?);
    }

    tracing::debug!(
        start = %requested.start(),
        party_size,
        found = candidates.len(),
        "collected table candidates"
    );
    Ok(candidates)
}
