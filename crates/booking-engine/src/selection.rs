//! Greedy choice of one or more tables for a party.
//!
//! The heuristic is deliberately simple and NOT capacity-optimal:
//!
//! 1. Order candidates by ascending `efficiency` (stable, so ties keep input
//!    order).
//! 2. If any candidate is suitable on its own, return the first one.
//! 3. Otherwise take candidates in that order until their summed capacity
//!    covers the party.
//! 4. If all of them together fall short, there is no combination.
//!
//! It never searches for the combination with the fewest wasted seats; a
//! smaller waste may exist among combinations the greedy pass skips.

use crate::error::{BookingError, Result};
use crate::tables::AvailableTableCandidate;

/// Pick table ids for `party_size` guests, or `None` if the candidates cannot
/// seat them. A zero party yields `None`.
pub fn select_tables(candidates: &[AvailableTableCandidate], party_size: u32) -> Option<Vec<String>> {
    if party_size == 0 {
        return None;
    }

    let mut sorted: Vec<&AvailableTableCandidate> = candidates.iter().collect();
    sorted.sort_by_key(|c| c.efficiency);

    if let Some(single) = sorted.iter().find(|c| c.is_suitable) {
        return Some(vec![single.table_id.clone()]);
    }

    tracing::debug!(
        party_size,
        candidates = candidates.len(),
        "no single table fits, combining"
    );

    let mut selected = Vec::new();
    let mut total: u64 = 0;
    for candidate in sorted {
        if total >= u64::from(party_size) {
            break;
        }
        selected.push(candidate.table_id.clone());
        total += u64::from(candidate.capacity);
    }

    if total < u64::from(party_size) {
        tracing::debug!(party_size, total, "candidates cannot seat the party");
        return None;
    }
    Some(selected)
}

/// Summed capacity of the candidates whose ids appear in `selected`.
pub fn selected_capacity(candidates: &[AvailableTableCandidate], selected: &[String]) -> u64 {
    candidates
        .iter()
        .filter(|c| selected.contains(&c.table_id))
        .map(|c| u64::from(c.capacity))
        .sum()
}

/// Guard run before committing a booking: the selected tables must seat the
/// whole party. Returns the selected capacity.
pub fn check_selection(
    candidates: &[AvailableTableCandidate],
    selected: &[String],
    party_size: u32,
) -> Result<u64> {
    if selected.is_empty() {
        return Err(BookingError::InvalidCapacity(
            "no tables selected for booking".to_string(),
        ));
    }
    let capacity = selected_capacity(candidates, selected);
    if capacity < u64::from(party_size) {
        return Err(BookingError::InvalidCapacity(format!(
            "selected tables can only accommodate {} guests, but the party has {}",
            capacity, party_size
        )));
    }
    Ok(capacity)
}
