//! # Break Registry
//!
//! Holds the validated, immovable break windows for a run. A break fires on
//! a slot only when its start equals that slot's start exactly; breaks that
//! sit between grid boundaries are kept but never applied.

use tracing::warn;

use crate::{
    errors::{TimetableError, TimetableResult},
    grid::TimeGrid,
    models::{clock::ClockTime, timetable::Break},
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BreakRegistry {
    /// Sorted by start time; starts are unique and windows disjoint.
    breaks: Vec<Break>,
}

impl BreakRegistry {
    /// Validates `breaks` and builds the registry.
    ///
    /// Every problem is reported in a single error: windows whose end is not
    /// after their start, breaks sharing a start time, and overlapping windows.
    pub fn register(breaks: &[Break]) -> TimetableResult<Self> {
        let mut sorted = breaks.to_vec();
        sorted.sort_by_key(|brk| brk.start_time);

        let inverted: Vec<&str> = sorted
            .iter()
            .filter(|brk| brk.start_time >= brk.end_time)
            .map(|brk| brk.name.as_str())
            .collect();

        let mut duplicated = Vec::new();
        let mut overlapping = Vec::new();
        // `reaching` is the earlier break that ends last so far
        let mut reaching: Option<&Break> = None;
        for (earlier, later) in sorted.iter().zip(sorted.iter().skip(1)) {
            let widest = match reaching {
                Some(prev) if prev.end_time >= earlier.end_time => prev,
                _ => earlier,
            };
            if earlier.start_time == later.start_time {
                duplicated.push(format!("{}/{}", earlier.name, later.name));
            } else if later.start_time < widest.end_time {
                overlapping.push(format!("{}/{}", widest.name, later.name));
            }
            reaching = Some(widest);
        }

        let mut problems = Vec::new();
        if !inverted.is_empty() {
            problems.push(format!("end time must be after start time: {}", inverted.join(", ")));
        }
        if !duplicated.is_empty() {
            problems.push(format!("breaks share a start time: {}", duplicated.join(", ")));
        }
        if !overlapping.is_empty() {
            problems.push(format!("break windows overlap: {}", overlapping.join(", ")));
        }
        if !problems.is_empty() {
            return Err(TimetableError::Configuration(format!(
                "invalid breaks ({})",
                problems.join("; ")
            )));
        }

        Ok(Self { breaks: sorted })
    }

    /// The break starting exactly at `start`, if any.
    pub fn find(&self, start: ClockTime) -> Option<&Break> {
        self.breaks
            .binary_search_by_key(&start, |brk| brk.start_time)
            .ok()
            .map(|index| &self.breaks[index])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Break> {
        self.breaks.iter()
    }

    pub fn len(&self) -> usize {
        self.breaks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.breaks.is_empty()
    }

    /// Breaks whose start is not a slot start of `grid`; they never fire.
    pub fn unaligned<'a>(&'a self, grid: &'a TimeGrid) -> impl Iterator<Item = &'a Break> + 'a {
        self.breaks
            .iter()
            .filter(move |brk| !grid.contains(brk.start_time))
    }

    pub(crate) fn warn_unaligned(&self, grid: &TimeGrid) {
        for brk in self.unaligned(grid) {
            warn!(
                name = %brk.name,
                start = %brk.start_time,
                "break does not start on a grid slot and will not be applied"
            );
        }
    }
}
