use std::{fmt, marker::PhantomData};

use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{MapAccess, Visitor},
};

use super::clock::ClockTime;

/// Label written into a slot that a preference left empty.
pub const FREE_SLOT: &str = "Free";

/// A schedulable subject together with the faculty member teaching it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    pub code: String,
    pub name: String,
    #[serde(alias = "faculty")]
    pub faculty_name: String,
    /// Lab subjects produce `lab` entries instead of `class` entries.
    #[serde(default)]
    pub lab: bool,
}

/// A cohort of students sharing one generated schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub name: String,
    #[serde(alias = "students")]
    pub student_count: u32,
}

/// A fixed, named break window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Break {
    pub name: String,
    pub start_time: ClockTime,
    pub end_time: ClockTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Class,
    Lab,
    Break,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub day: String,
    pub time: ClockTime,
    pub subject: String,
    pub faculty: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
}

impl ScheduleEntry {
    pub fn taught(day: &str, time: ClockTime, subject: &Subject) -> Self {
        Self {
            day: day.to_string(),
            time,
            subject: subject.name.clone(),
            faculty: subject.faculty_name.clone(),
            kind: if subject.lab {
                EntryKind::Lab
            } else {
                EntryKind::Class
            },
        }
    }

    pub fn free(day: &str, time: ClockTime) -> Self {
        Self {
            day: day.to_string(),
            time,
            subject: FREE_SLOT.to_string(),
            faculty: String::new(),
            kind: EntryKind::Class,
        }
    }

    pub fn rest(day: &str, time: ClockTime, brk: &Break) -> Self {
        Self {
            day: day.to_string(),
            time,
            subject: brk.name.clone(),
            faculty: String::new(),
            kind: EntryKind::Break,
        }
    }

    pub fn is_break(&self) -> bool {
        self.kind == EntryKind::Break
    }
}

/// One row of the flat `Day, Time, Subject, Faculty` projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRow {
    pub day: String,
    pub time: ClockTime,
    pub subject: String,
    pub faculty: String,
}

/// All entries for one section, ordered by day then time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionSchedule {
    entries: Vec<ScheduleEntry>,
}

impl SectionSchedule {
    pub fn new(entries: Vec<ScheduleEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[ScheduleEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn for_day<'a>(&'a self, day: &'a str) -> impl Iterator<Item = &'a ScheduleEntry> + 'a {
        self.entries.iter().filter(move |entry| entry.day == day)
    }

    pub fn at(&self, day: &str, time: ClockTime) -> Option<&ScheduleEntry> {
        self.entries
            .iter()
            .find(|entry| entry.day == day && entry.time == time)
    }

    pub fn export_rows(&self) -> Vec<ExportRow> {
        self.entries
            .iter()
            .map(|entry| ExportRow {
                day: entry.day.clone(),
                time: entry.time,
                subject: entry.subject.clone(),
                faculty: entry.faculty.clone(),
            })
            .collect()
    }
}

/// Per-section values kept in the order sections were inserted.
///
/// Serializes as a JSON object whose keys follow that order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionMap<T> {
    entries: Vec<(String, T)>,
}

/// Generated schedules keyed by section name, in section input order.
pub type WeeklySchedule = SectionMap<SectionSchedule>;

/// Flat export rows keyed by section name.
pub type ExportTable = SectionMap<Vec<ExportRow>>;

impl<T> Default for SectionMap<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T> SectionMap<T> {
    /// Adds `value` under `section`, replacing any earlier value in place.
    pub fn insert(&mut self, section: impl Into<String>, value: T) {
        let section = section.into();
        match self.entries.iter_mut().find(|(name, _)| *name == section) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((section, value)),
        }
    }

    pub fn get(&self, section: &str) -> Option<&T> {
        self.entries
            .iter()
            .find(|(name, _)| name == section)
            .map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }
}

impl SectionMap<SectionSchedule> {
    pub fn export_rows(&self) -> ExportTable {
        SectionMap {
            entries: self
                .entries
                .iter()
                .map(|(name, schedule)| (name.clone(), schedule.export_rows()))
                .collect(),
        }
    }
}

impl<T: Serialize> Serialize for SectionMap<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.entries.iter().map(|(name, value)| (name, value)))
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for SectionMap<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SectionMapVisitor<T>(PhantomData<T>);

        impl<'de, T: Deserialize<'de>> Visitor<'de> for SectionMapVisitor<T> {
            type Value = SectionMap<T>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of section names")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut map = SectionMap::default();
                while let Some((name, value)) = access.next_entry::<String, T>()? {
                    map.insert(name, value);
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(SectionMapVisitor(PhantomData))
    }
}
