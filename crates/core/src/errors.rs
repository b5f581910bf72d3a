use std::fmt;

use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TimetableError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Validation error: {}", join_issues(.0))]
    Validation(Vec<ValidationIssue>),

    #[error("Generation error: {0}")]
    Generation(String),
}

pub type TimetableResult<T> = Result<T, TimetableError>;

/// The request field a validation rule is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ValidationField {
    InstituteName,
    Department,
    Subjects,
    TotalStudents,
    Sections,
    Days,
    Timetable,
}

impl fmt::Display for ValidationField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValidationField::InstituteName => "instituteName",
            ValidationField::Department => "department",
            ValidationField::Subjects => "subjects",
            ValidationField::TotalStudents => "totalStudents",
            ValidationField::Sections => "sections",
            ValidationField::Days => "days",
            ValidationField::Timetable => "timetable",
        };
        f.write_str(name)
    }
}

/// One violated business rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub field: ValidationField,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(field: ValidationField, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

fn join_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
