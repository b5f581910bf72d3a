//! Soft scheduling toggles read by the subject draw.
//!
//! Only `avoid_early_mornings` changes output today. `prioritize_faculty` and
//! `maximize_breaks` are accepted and round-tripped but have no effect on slot
//! selection.

use serde::{Deserialize, Serialize};

use crate::models::clock::ClockTime;

/// Slots starting before this time are left free when early mornings are avoided.
pub const EARLY_MORNING_CUTOFF: ClockTime = ClockTime::at(10, 0);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PreferenceSet {
    pub prioritize_faculty: bool,
    pub avoid_early_mornings: bool,
    pub maximize_breaks: bool,
}

impl PreferenceSet {
    /// Whether a drawn subject at `time` must be replaced with a free slot.
    pub fn suppresses(&self, time: ClockTime) -> bool {
        self.avoid_early_mornings && time < EARLY_MORNING_CUTOFF
    }
}
