//! # Section Scheduler
//!
//! Fills one section's week, day by day, walking the shared grid in order:
//!
//! 1. If a registered break starts at the slot, the slot becomes that break.
//!    Later slots whose start falls inside the break window (strictly before
//!    its end) are covered by the same break.
//! 2. Otherwise one subject is drawn from the pool, with the early-morning
//!    preference applied, and the slot becomes a class or lab.
//!
//! Every grid slot of every day gets exactly one entry.

use rand::Rng;
use tracing::debug;

use crate::{
    breaks::BreakRegistry,
    errors::TimetableResult,
    grid::TimeGrid,
    models::timetable::{ScheduleEntry, Section, SectionSchedule},
    pool::{Draw, SubjectPool},
    preferences::PreferenceSet,
};

/// Read-only inputs shared by every section of one run.
#[derive(Debug, Clone, Copy)]
pub struct SectionScheduler<'a> {
    grid: &'a TimeGrid,
    breaks: &'a BreakRegistry,
    pool: &'a SubjectPool,
    preferences: &'a PreferenceSet,
}

impl<'a> SectionScheduler<'a> {
    pub fn new(
        grid: &'a TimeGrid,
        breaks: &'a BreakRegistry,
        pool: &'a SubjectPool,
        preferences: &'a PreferenceSet,
    ) -> Self {
        Self {
            grid,
            breaks,
            pool,
            preferences,
        }
    }

    /// Builds the schedule for `section` across `days`, in day order.
    ///
    /// # Errors
    ///
    /// * `TimetableError::Configuration` - a non-break slot needs a subject
    ///   but the pool is empty
    pub fn schedule<R>(
        &self,
        section: &Section,
        days: &[String],
        rng: &mut R,
    ) -> TimetableResult<SectionSchedule>
    where
        R: Rng + ?Sized,
    {
        let mut entries = Vec::with_capacity(days.len() * self.grid.len());
        for day in days {
            self.schedule_day(day, rng, &mut entries)?;
        }

        debug!(
            section = %section.name,
            entries = entries.len(),
            "section scheduled"
        );
        Ok(SectionSchedule::new(entries))
    }

    fn schedule_day<R>(
        &self,
        day: &str,
        rng: &mut R,
        entries: &mut Vec<ScheduleEntry>,
    ) -> TimetableResult<()>
    where
        R: Rng + ?Sized,
    {
        let slots = self.grid.slots();
        let mut index = 0;
        while index < slots.len() {
            let time = slots[index];
            index += 1;

            if let Some(brk) = self.breaks.find(time) {
                entries.push(ScheduleEntry::rest(day, time, brk));
                while index < slots.len() && slots[index] < brk.end_time {
                    entries.push(ScheduleEntry::rest(day, slots[index], brk));
                    index += 1;
                }
                continue;
            }

            let entry = match self.pool.pick_for_slot(rng, day, time, self.preferences)? {
                Draw::Subject(subject) => ScheduleEntry::taught(day, time, subject),
                Draw::Free => ScheduleEntry::free(day, time),
            };
            entries.push(entry);
        }
        Ok(())
    }
}
