//! Booking rules configured in the restaurant settings, and the
//! human-readable margin text shown next to them.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{BookingError, Result};

/// Upper bound for the cleanup margin, matching the settings form.
pub const MAX_BOOKING_TIME_MARGIN: u32 = 240;

/// Reservation policy for a restaurant.
///
/// Only `booking_time_margin` feeds the availability computation. The other
/// fields gate requests before they reach it (`check_party_size`,
/// `is_within_advance_limit`) or are carried for the settings screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BookingRules {
    /// Minutes a table stays blocked after a booking ends.
    pub booking_time_margin: u32,
    pub max_party_size: u32,
    /// How many days ahead a booking may be made.
    pub advance_booking_limit: u32,
    /// Hours before the booking within which cancellation is charged.
    pub cancellation_policy: u32,
    pub deposit_required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deposit_amount: Option<f64>,
}

impl Default for BookingRules {
    fn default() -> Self {
        Self {
            booking_time_margin: 90,
            max_party_size: 12,
            advance_booking_limit: 30,
            cancellation_policy: 24,
            deposit_required: false,
            deposit_amount: None,
        }
    }
}

impl BookingRules {
    /// Default rules with the given margin, validated.
    pub fn with_margin(minutes: u32) -> Result<Self> {
        let rules = Self {
            booking_time_margin: minutes,
            ..Self::default()
        };
        rules.validate()?;
        Ok(rules)
    }

    /// Check every field against its allowed range.
    pub fn validate(&self) -> Result<()> {
        if self.booking_time_margin > MAX_BOOKING_TIME_MARGIN {
            return Err(BookingError::InvalidRules(format!(
                "bookingTimeMargin must be between 0 and {} minutes, got {}",
                MAX_BOOKING_TIME_MARGIN, self.booking_time_margin
            )));
        }
        if !(1..=50).contains(&self.max_party_size) {
            return Err(BookingError::InvalidRules(format!(
                "maxPartySize must be between 1 and 50, got {}",
                self.max_party_size
            )));
        }
        if !(1..=365).contains(&self.advance_booking_limit) {
            return Err(BookingError::InvalidRules(format!(
                "advanceBookingLimit must be between 1 and 365 days, got {}",
                self.advance_booking_limit
            )));
        }
        if self.cancellation_policy > 72 {
            return Err(BookingError::InvalidRules(format!(
                "cancellationPolicy must be between 0 and 72 hours, got {}",
                self.cancellation_policy
            )));
        }
        if let Some(amount) = self.deposit_amount {
            if !amount.is_finite() || amount < 0.0 {
                return Err(BookingError::InvalidRules(format!(
                    "depositAmount must be a non-negative number, got {}",
                    amount
                )));
            }
        }
        Ok(())
    }

    /// Reject parties of zero or above `max_party_size`.
    pub fn check_party_size(&self, party_size: u32) -> Result<()> {
        if party_size == 0 || party_size > self.max_party_size {
            return Err(BookingError::InvalidPartySize(format!(
                "party of {} is outside 1..={}",
                party_size, self.max_party_size
            )));
        }
        Ok(())
    }

    /// Last calendar day that may be booked when asking on `today`.
    pub fn latest_bookable_day(&self, today: NaiveDate) -> NaiveDate {
        today
            .checked_add_days(Days::new(u64::from(self.advance_booking_limit)))
            .unwrap_or(NaiveDate::MAX)
    }

    /// True when `day` is neither in the past nor beyond the advance limit.
    pub fn is_within_advance_limit(&self, today: NaiveDate, day: NaiveDate) -> bool {
        today <= day && day <= self.latest_bookable_day(today)
    }
}

/// Render a margin as "45 minutes", "1 hour" or "1 hour 30 minutes".
pub fn format_time_margin(minutes: u32) -> String {
    let hours = minutes / 60;
    let mins = minutes % 60;

    match (hours, mins) {
        (0, m) => plural(m, "minute"),
        (h, 0) => plural(h, "hour"),
        (h, m) => format!("{} {}", plural(h, "hour"), plural(m, "minute")),
    }
}

fn plural(n: u32, unit: &str) -> String {
    if n == 1 {
        format!("{} {}", n, unit)
    } else {
        format!("{} {}s", n, unit)
    }
}

/// One-sentence explanation of the margin for the settings screen.
pub fn time_margin_description(rules: &BookingRules) -> String {
    format!(
        "Tables remain unavailable for {} after each booking ends to allow for cleanup and preparation.",
        format_time_margin(rules.booking_time_margin)
    )
}
