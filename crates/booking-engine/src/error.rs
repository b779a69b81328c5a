//! Error types for booking-engine operations.
//!
//! Every variant is a local validation failure raised where a value is
//! constructed. The availability functions themselves never fail.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BookingError {
    /// A time interval whose start is not strictly before its end.
    #[error("Invalid interval: start {start} is not before end {end}")]
    InvalidInterval { start: String, end: String },

    /// Opening hours that could not be parsed or do not form a same-day window.
    #[error("Invalid opening hours: {0}")]
    InvalidOpeningHours(String),

    /// Booking rules with a field outside its allowed range.
    #[error("Invalid booking rules: {0}")]
    InvalidRules(String),

    #[error("Invalid slot duration: {0} minutes (must be greater than zero)")]
    InvalidSlotDuration(u32),

    #[error("Invalid party size: {0}")]
    InvalidPartySize(String),

    #[error("Invalid capacity: {0}")]
    InvalidCapacity(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    /// A local wall-clock time that does not exist in the restaurant's timezone
    /// (it falls inside a DST gap).
    #[error("Local time {time} does not exist in timezone {timezone}")]
    NonexistentLocalTime { time: String, timezone: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, BookingError>;
