use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Body of an optimization request: a timetable to improve and the constraints to honor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizeTimetableRequest {
    pub timetable: serde_json::Value,
    #[serde(default)]
    pub constraints: serde_json::Value,
}

/// Schedule document returned by the language-model generation path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelTimetable {
    pub schedule: Vec<ModelScheduleRow>,
    pub subjects: Vec<ModelSubject>,
}

/// One time band of the model's grid; every key other than `time` is a day name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelScheduleRow {
    pub time: String,
    #[serde(flatten)]
    pub days: BTreeMap<String, ModelCell>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelCell {
    pub subject: String,
    #[serde(default)]
    pub room: String,
    #[serde(rename = "type", default)]
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelSubject {
    pub code: String,
    pub name: String,
    pub faculty: String,
}
