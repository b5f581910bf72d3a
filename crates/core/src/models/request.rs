use serde::{Deserialize, Serialize};

use super::{
    clock::ClockTime,
    timetable::{Break, Section, Subject, WeeklySchedule},
};
use crate::preferences::PreferenceSet;

pub const DEFAULT_PERIOD_MINUTES: i64 = 50;
pub const DEFAULT_DAY_START: ClockTime = ClockTime::at(8, 30);
pub const DEFAULT_DAY_END: ClockTime = ClockTime::at(16, 30);

pub const WEEKDAYS: [&str; 5] = ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday"];

/// Bounds and period length of one day's grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridConfig {
    pub day_start: ClockTime,
    pub day_end: ClockTime,
    pub period_minutes: i64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            day_start: DEFAULT_DAY_START,
            day_end: DEFAULT_DAY_END,
            period_minutes: DEFAULT_PERIOD_MINUTES,
        }
    }
}

/// A complete snapshot of everything one generation run needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateTimetableRequest {
    pub institute_name: String,
    pub department: String,
    #[serde(default)]
    pub semester: Option<String>,
    #[serde(default)]
    pub academic_year: Option<String>,
    #[serde(default = "default_days")]
    pub days: Vec<String>,
    #[serde(default = "default_day_start")]
    pub day_start: ClockTime,
    #[serde(default = "default_day_end")]
    pub day_end: ClockTime,
    #[serde(default = "default_period_minutes")]
    pub period_minutes: i64,
    pub subjects: Vec<Subject>,
    pub total_students: i64,
    pub sections: Vec<Section>,
    #[serde(default = "default_breaks")]
    pub breaks: Vec<Break>,
    #[serde(default)]
    pub preferences: PreferenceSet,
    /// Seed for subject draws; the serving layer picks one when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl GenerateTimetableRequest {
    pub fn grid_config(&self) -> GridConfig {
        GridConfig {
            day_start: self.day_start,
            day_end: self.day_end,
            period_minutes: self.period_minutes,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateTimetableResponse {
    pub seed: u64,
    pub grid: Vec<ClockTime>,
    pub timetables: WeeklySchedule,
}

pub fn default_days() -> Vec<String> {
    WEEKDAYS.iter().map(|day| day.to_string()).collect()
}

fn default_day_start() -> ClockTime {
    DEFAULT_DAY_START
}

fn default_day_end() -> ClockTime {
    DEFAULT_DAY_END
}

fn default_period_minutes() -> i64 {
    DEFAULT_PERIOD_MINUTES
}

/// Tea and lunch breaks every day unless the request says otherwise.
pub fn default_breaks() -> Vec<Break> {
    vec![
        Break {
            name: "Tea Break".to_string(),
            start_time: ClockTime::at(10, 30),
            end_time: ClockTime::at(10, 50),
        },
        Break {
            name: "Lunch Break".to_string(),
            start_time: ClockTime::at(12, 50),
            end_time: ClockTime::at(13, 45),
        },
    ]
}
