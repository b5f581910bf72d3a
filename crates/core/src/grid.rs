//! # Time Grid Builder
//!
//! Enumerates the start times of every period in a day. The walk begins at
//! `day_start`, emits the current time, then advances by the period length
//! for as long as the current time is before `day_end`. Only a period's
//! start is checked against `day_end`, so the last period may run past it.

use crate::{
    errors::{TimetableError, TimetableResult},
    models::{clock::ClockTime, request::GridConfig},
};

/// Ordered slot start times shared by every day of the week.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeGrid {
    slots: Vec<ClockTime>,
    period_minutes: u32,
}

impl TimeGrid {
    pub fn slots(&self) -> &[ClockTime] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn period_minutes(&self) -> u32 {
        self.period_minutes
    }

    pub fn contains(&self, time: ClockTime) -> bool {
        self.slots.binary_search(&time).is_ok()
    }
}

/// Builds the day grid for `config`.
///
/// # Errors
///
/// * `TimetableError::Configuration` - `day_start` is not before `day_end`,
///   or the period length is not positive
pub fn build_grid(config: &GridConfig) -> TimetableResult<TimeGrid> {
    if config.day_start >= config.day_end {
        return Err(TimetableError::Configuration(format!(
            "day start {} must be before day end {}",
            config.day_start, config.day_end
        )));
    }

    let period_minutes = u32::try_from(config.period_minutes)
        .ok()
        .filter(|minutes| *minutes > 0)
        .ok_or_else(|| {
            TimetableError::Configuration(format!(
                "period length must be a positive number of minutes, got {}",
                config.period_minutes
            ))
        })?;

    let mut slots = Vec::new();
    let mut current = Some(config.day_start);
    while let Some(time) = current {
        if time >= config.day_end {
            break;
        }
        slots.push(time);
        current = time.checked_add_minutes(period_minutes);
    }

    Ok(TimeGrid {
        slots,
        period_minutes,
    })
}
