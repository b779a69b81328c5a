//! WASM bindings for booking-engine.
//!
//! Exposes the availability check, slot enumeration and table selection to the
//! dashboard via `wasm-bindgen`. Bookings, settings and candidates cross the
//! boundary as JSON strings in the same camelCase shape the REST API uses.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p booking-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir web/src/wasm/ \
//!   target/wasm32-unknown-unknown/release/booking_engine_wasm.wasm
//! ```

use booking_engine::{AvailableTableCandidate, RestaurantConfig, TableBooking, TimeInterval};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Serialize;
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Parse an ISO 8601 datetime string into `DateTime<Utc>`.
///
/// Accepts RFC 3339 (with offset) and naive local time, which is read as UTC.
fn parse_datetime(s: &str) -> Result<DateTime<Utc>, JsValue> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .map(|ndt| ndt.and_utc())
        .map_err(|e| JsValue::from_str(&format!("Invalid datetime '{}': {}", s, e)))
}

fn parse_bookings(json: &str) -> Result<Vec<TableBooking>, JsValue> {
    serde_json::from_str(json).map_err(|e| JsValue::from_str(&format!("Invalid bookings JSON: {}", e)))
}

fn parse_settings(json: &str) -> Result<RestaurantConfig, JsValue> {
    RestaurantConfig::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn requested(start: &str, end: &str) -> Result<TimeInterval, JsValue> {
    TimeInterval::new(parse_datetime(start)?, parse_datetime(end)?)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

fn to_json<T: Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// The instant a table is free again, as an RFC 3339 string.
#[wasm_bindgen(js_name = "nextAvailableTime")]
pub fn next_available_time(booking_end: &str, margin_minutes: u32) -> Result<String, JsValue> {
    let end = parse_datetime(booking_end)?;
    Ok(booking_engine::next_available_time(end, margin_minutes).to_rfc3339())
}

/// Whether `[start, end)` is free on the table holding `bookings_json`.
///
/// `bookings_json` must contain only that table's bookings.
#[wasm_bindgen(js_name = "isAvailable")]
pub fn is_available(
    start: &str,
    end: &str,
    bookings_json: &str,
    margin_minutes: u32,
) -> Result<bool, JsValue> {
    let interval = requested(start, end)?;
    let bookings = parse_bookings(bookings_json)?;
    Ok(booking_engine::is_available(&interval, &bookings, margin_minutes))
}

/// Available slot starts for one table on `date` (`YYYY-MM-DD`).
///
/// `settings_json` is the restaurant settings object; its margin, opening
/// hours and timezone apply. Returns a JSON array of RFC 3339 strings.
#[wasm_bindgen(js_name = "getAvailableTimeSlots")]
pub fn available_time_slots(
    date: &str,
    bookings_json: &str,
    settings_json: &str,
    slot_minutes: Option<u32>,
) -> Result<String, JsValue> {
    let day: NaiveDate = date
        .parse()
        .map_err(|e| JsValue::from_str(&format!("Invalid date '{}': {}", date, e)))?;
    let bookings = parse_bookings(bookings_json)?;
    let settings = parse_settings(settings_json)?;
    let window = settings
        .opening_window(day)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    let slots: Vec<String> = booking_engine::enumerate_slots_in(
        window,
        &bookings,
        settings.margin_minutes(),
        slot_minutes.unwrap_or(booking_engine::slots::DEFAULT_SLOT_MINUTES),
    )
    .map(|s| s.to_rfc3339())
    .collect();
    to_json(&slots)
}

/// Greedy table choice for a party. `candidates_json` is an array of
/// `{tableId, capacity, efficiency, isSuitable}`. Returns a JSON array of
/// table ids, or `null` when no combination seats the party.
#[wasm_bindgen(js_name = "findOptimalTableCombination")]
pub fn select_tables(candidates_json: &str, party_size: u32) -> Result<String, JsValue> {
    let candidates: Vec<AvailableTableCandidate> = serde_json::from_str(candidates_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid candidates JSON: {}", e)))?;
    to_json(&booking_engine::select_tables(&candidates, party_size))
}

/// "1 hour 30 minutes" style margin text.
#[wasm_bindgen(js_name = "formatTimeMargin")]
pub fn format_time_margin(minutes: u32) -> String {
    booking_engine::format_time_margin(minutes)
}
