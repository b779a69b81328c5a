//! Restaurant configuration as served by `/restaurant/settings`.

use chrono::NaiveDate;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{BookingError, Result};
use crate::hours::{parse_timezone, OpeningHours};
use crate::interval::TimeInterval;
use crate::rules::BookingRules;

/// Validated restaurant settings consumed by the engine's callers.
///
/// Built once per request from JSON and passed by reference; nothing in the
/// engine keeps it around between calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SettingsRecord", into = "SettingsRecord")]
pub struct RestaurantConfig {
    pub name: String,
    pub opening_hours: OpeningHours,
    pub timezone: Tz,
    pub booking_rules: BookingRules,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsRecord {
    #[serde(default)]
    name: String,
    opening_hours: OpeningHours,
    #[serde(default = "default_timezone")]
    timezone: String,
    #[serde(default)]
    booking_rules: BookingRules,
}

fn default_timezone() -> String {
    "UTC".to_string()
}

impl TryFrom<SettingsRecord> for RestaurantConfig {
    type Error = BookingError;

    fn try_from(record: SettingsRecord) -> Result<Self> {
        record.booking_rules.validate()?;
        Ok(Self {
            name: record.name,
            opening_hours: record.opening_hours,
            timezone: parse_timezone(&record.timezone)?,
            booking_rules: record.booking_rules,
        })
    }
}

impl From<RestaurantConfig> for SettingsRecord {
    fn from(config: RestaurantConfig) -> Self {
        Self {
            name: config.name,
            opening_hours: config.opening_hours,
            timezone: config.timezone.name().to_string(),
            booking_rules: config.booking_rules,
        }
    }
}

impl RestaurantConfig {
    /// Parse and validate settings JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn margin_minutes(&self) -> u32 {
        self.booking_rules.booking_time_margin
    }

    /// The opening window on `day` in the restaurant's timezone.
    pub fn opening_window(&self, day: NaiveDate) -> Result<TimeInterval> {
        self.opening_hours.window_in(day, self.timezone)
    }
}
