//! Alternate generation path backed by a language model.
//!
//! The engine does not talk to the model itself. It writes the prompt and
//! checks the reply, which must be well-formed JSON in the [`ModelTimetable`]
//! shape. Anything else is a generation error; there is no fallback to the
//! deterministic generator.

use serde_json::{Map, Value};

use crate::{
    errors::{TimetableError, TimetableResult},
    models::external::ModelTimetable,
};

pub const SYSTEM_PROMPT: &str = "You are a helpful assistant that generates college timetables.";

pub const OPTIMIZE_SYSTEM_PROMPT: &str =
    "You are a helpful assistant that optimizes college timetables.";

/// Request keys forwarded to the model; everything else is dropped.
pub const CONSTRAINT_KEYS: [&str; 4] = ["courses", "faculty", "classrooms", "departments"];

const RESPONSE_SHAPE: &str = r#"{
  "schedule": [
    {
      "time": "8:30 - 9:20",
      "Monday": { "subject": "CS101", "room": "Room 101", "type": "lecture" },
      "Tuesday": { "subject": "MATH101", "room": "Room 102", "type": "lecture" }
    }
  ],
  "subjects": [
    { "code": "CS101", "name": "Introduction to Computer Science", "faculty": "Dr. John Doe" }
  ]
}"#;

/// Keeps only the [`CONSTRAINT_KEYS`] present in `body`.
///
/// A body that is not a JSON object projects to an empty object.
pub fn project_constraints(body: &Value) -> Value {
    let projected: Map<String, Value> = body
        .as_object()
        .map(|fields| {
            CONSTRAINT_KEYS
                .iter()
                .filter_map(|key| fields.get(*key).map(|v| ((*key).to_string(), v.clone())))
                .collect()
        })
        .unwrap_or_default();
    Value::Object(projected)
}

fn to_json(value: &Value, what: &str) -> TimetableResult<String> {
    serde_json::to_string(value)
        .map_err(|e| TimetableError::Generation(format!("cannot serialize {}: {}", what, e)))
}

/// Builds the user prompt for `constraints`.
///
/// # Errors
///
/// * `TimetableError::Generation` - the constraints cannot be serialized
pub fn build_prompt(constraints: &Value) -> TimetableResult<String> {
    let serialized = to_json(constraints, "constraints")?;

    Ok(format!(
        "Generate a weekly college timetable for these constraints:\n{serialized}\n\n\
         Rules:\n\
         - Cover Monday to Friday, from 8:30 AM to 3:35 PM.\n\
         - Use 50-minute periods and include breaks, one of them a lunch break.\n\
         - Give every course a time slot, a room and a faculty member with no clashes.\n\
         - Mix lectures, labs and special sessions such as placement training.\n\
         - Spread each course evenly over the week and match rooms to capacity and course type.\n\n\
         Reply with JSON only, in exactly this structure:\n{RESPONSE_SHAPE}\n"
    ))
}

/// Builds the user prompt asking the model to improve an existing `timetable`.
///
/// Pairs with [`OPTIMIZE_SYSTEM_PROMPT`]. The reply is held to the same
/// structure as a generated one.
///
/// # Errors
///
/// * `TimetableError::Generation` - the timetable or constraints cannot be serialized
pub fn build_optimize_prompt(timetable: &Value, constraints: &Value) -> TimetableResult<String> {
    let constraints = to_json(constraints, "constraints")?;
    let timetable = to_json(timetable, "timetable")?;

    Ok(format!(
        "Optimize this timetable based on these constraints:\n{constraints}\n\n\
         Timetable:\n{timetable}\n\n\
         Remove clashes, balance each course over the week and keep the breaks.\n\n\
         Reply with JSON only, in exactly this structure:\n{RESPONSE_SHAPE}\n"
    ))
}

/// Parses a model reply into a [`ModelTimetable`].
///
/// # Errors
///
/// * `TimetableError::Generation` - the reply is not JSON, or is JSON of the
///   wrong shape
pub fn parse_model_timetable(raw: &str) -> TimetableResult<ModelTimetable> {
    let value: Value = serde_json::from_str(raw).map_err(|e| {
        TimetableError::Generation(format!("model response is not well-formed JSON: {}", e))
    })?;

    serde_json::from_value(value).map_err(|e| {
        TimetableError::Generation(format!(
            "model response does not match the timetable structure: {}",
            e
        ))
    })
}
