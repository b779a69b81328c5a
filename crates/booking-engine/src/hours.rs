//! Restaurant opening hours: parsing the `"HH:MM - HH:MM"` setting and
//! projecting it onto a calendar day.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{BookingError, Result};
use crate::interval::TimeInterval;

/// Default step of the booking form's time picker.
pub const DEFAULT_TIME_OPTION_STEP: u32 = 30;

/// A same-day opening window. `open < close`; overnight hours are not supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OpeningHours {
    open: NaiveTime,
    close: NaiveTime,
}

impl OpeningHours {
    pub fn new(open: NaiveTime, close: NaiveTime) -> Result<Self> {
        if open >= close {
            return Err(BookingError::InvalidOpeningHours(format!(
                "opening time {} is not before closing time {}",
                open.format("%H:%M"),
                close.format("%H:%M")
            )));
        }
        Ok(Self { open, close })
    }

    pub fn open(&self) -> NaiveTime {
        self.open
    }

    pub fn close(&self) -> NaiveTime {
        self.close
    }

    /// The opening window on `day`, reading wall-clock times as UTC.
    pub fn window_on(&self, day: NaiveDate) -> TimeInterval {
        TimeInterval::from_ordered(
            day.and_time(self.open).and_utc(),
            day.and_time(self.close).and_utc(),
        )
    }

    /// The opening window on `day` in the restaurant's timezone.
    ///
    /// Ambiguous wall-clock times (DST fall-back) resolve to the earliest
    /// instant. Times inside a DST gap are an error.
    pub fn window_in(&self, day: NaiveDate, tz: Tz) -> Result<TimeInterval> {
        let start = resolve_local(day, self.open, tz)?;
        let end = resolve_local(day, self.close, tz)?;
        TimeInterval::new(start, end)
    }

    /// Wall-clock start times offered by the booking form, from opening time
    /// up to (not including) closing time, every `step_minutes`.
    pub fn time_options(&self, step_minutes: u32) -> Result<Vec<NaiveTime>> {
        if step_minutes == 0 {
            return Err(BookingError::InvalidSlotDuration(step_minutes));
        }
        let step = Duration::minutes(i64::from(step_minutes));
        let mut options = Vec::new();
        let mut cursor = self.open;
        while cursor < self.close {
            options.push(cursor);
            let (next, wrapped) = cursor.overflowing_add_signed(step);
            if wrapped != 0 {
                break;
            }
            cursor = next;
        }
        Ok(options)
    }
}

fn resolve_local(day: NaiveDate, time: NaiveTime, tz: Tz) -> Result<DateTime<Utc>> {
    let local = day.and_time(time);
    tz.from_local_datetime(&local)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| BookingError::NonexistentLocalTime {
            time: local.format("%Y-%m-%dT%H:%M").to_string(),
            timezone: tz.name().to_string(),
        })
}

/// Parse an IANA timezone name such as `"Europe/Rome"`.
pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.parse::<Tz>()
        .map_err(|_| BookingError::InvalidTimezone(name.to_string()))
}

impl FromStr for OpeningHours {
    type Err = BookingError;

    fn from_str(s: &str) -> Result<Self> {
        let (open, close) = s.split_once('-').ok_or_else(|| {
            BookingError::InvalidOpeningHours(format!("expected \"HH:MM - HH:MM\", got {:?}", s))
        })?;
        OpeningHours::new(parse_clock(open)?, parse_clock(close)?)
    }
}

fn parse_clock(s: &str) -> Result<NaiveTime> {
    let trimmed = s.trim();
    NaiveTime::parse_from_str(trimmed, "%H:%M")
        .map_err(|e| BookingError::InvalidOpeningHours(format!("bad time {:?}: {}", trimmed, e)))
}

impl TryFrom<String> for OpeningHours {
    type Error = BookingError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<OpeningHours> for String {
    fn from(hours: OpeningHours) -> Self {
        hours.to_string()
    }
}

impl fmt::Display for OpeningHours {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {}",
            self.open.format("%H:%M"),
            self.close.format("%H:%M")
        )
    }
}
