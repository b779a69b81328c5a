//! # booking-engine
//!
//! Table availability for restaurant reservations.
//!
//! Given a restaurant's opening hours, a cleanup margin and the bookings already
//! placed on a table, the engine decides whether a new party can be seated in a
//! requested window and lists the open slots of a day. All functions are pure:
//! configuration is passed in explicitly and bookings are only read.
//!
//! The engine never sees live state. Two callers checking the same slot at the
//! same time can both get `true`; whatever store commits bookings must reject
//! the second write itself.
//!
//! ## Modules
//!
//! - [`availability`] - margin arithmetic and the per-table availability test
//! - [`slots`] - slot enumeration and free windows across a day
//! - [`selection`] - greedy single/multi-table choice for a party
//! - [`tables`] - tables, status, and candidate collection
//! - [`hours`] - opening hours parsing and timezone projection
//! - [`rules`] - booking rules and margin text
//! - [`config`] - restaurant settings loaded from JSON
//! - [`interval`] - validated intervals and booking records
//! - [`error`] - Error types

pub mod availability;
pub mod config;
pub mod error;
pub mod hours;
pub mod interval;
pub mod rules;
pub mod selection;
pub mod slots;
pub mod tables;

pub use availability::{
    blocking_bookings, bookings_for_table, earliest_free_start, is_available, next_available_time,
};
pub use config::RestaurantConfig;
pub use error::BookingError;
pub use hours::OpeningHours;
pub use interval::{TableBooking, TimeInterval};
pub use rules::{format_time_margin, time_margin_description, BookingRules};
pub use selection::{check_selection, select_tables};
pub use slots::{enumerate_slots, enumerate_slots_in, free_windows, FreeWindow, Slots};
pub use tables::{find_candidates, AvailableTableCandidate, Table, TableStatus};
