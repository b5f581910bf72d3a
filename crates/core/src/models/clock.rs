//! Wall-clock times of day.
//!
//! Times travel as zero-padded `"HH:MM"` strings but are compared and
//! advanced as minute-of-day integers. Schedules are same-day only: adding
//! minutes past midnight yields `None` rather than wrapping.

use std::{fmt, str::FromStr};

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::errors::TimetableError;

pub const MINUTES_PER_DAY: u16 = 24 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime(u16);

impl ClockTime {
    /// Const constructor for literal times. Out-of-range input fails const evaluation.
    pub const fn at(hour: u16, minute: u16) -> Self {
        assert!(hour < 24 && minute < 60, "time of day out of range");
        Self(hour * 60 + minute)
    }

    /// Builds a time from a minute-of-day value; `minutes` must be below 1440.
    pub const fn from_minutes(minutes: u16) -> Option<Self> {
        if minutes < MINUTES_PER_DAY {
            Some(Self(minutes))
        } else {
            None
        }
    }

    pub const fn from_hm(hour: u16, minute: u16) -> Option<Self> {
        if hour < 24 && minute < 60 {
            Some(Self(hour * 60 + minute))
        } else {
            None
        }
    }

    pub const fn minutes(self) -> u16 {
        self.0
    }

    pub const fn hour(self) -> u16 {
        self.0 / 60
    }

    pub const fn minute(self) -> u16 {
        self.0 % 60
    }

    /// Advances by `minutes`, or `None` if that would cross midnight.
    pub fn checked_add_minutes(self, minutes: u32) -> Option<Self> {
        let total = u32::from(self.0).checked_add(minutes)?;
        u16::try_from(total).ok().and_then(Self::from_minutes)
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for ClockTime {
    type Err = TimetableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parsed = NaiveTime::parse_from_str(s.trim(), "%H:%M").map_err(|e| {
            TimetableError::Configuration(format!("invalid time of day '{}': {}", s, e))
        })?;
        // hour() < 24 and minute() < 60, so the conversion cannot fail
        Ok(Self((parsed.hour() * 60 + parsed.minute()) as u16))
    }
}

impl TryFrom<String> for ClockTime {
    type Error = TimetableError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ClockTime> for String {
    fn from(value: ClockTime) -> Self {
        value.to_string()
    }
}
