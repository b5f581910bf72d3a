//! Business-rule checks run before any scheduling work.
//!
//! All rules are evaluated and every violation is returned together, in a
//! fixed order: institute, department, subjects, student totals, sections,
//! days, overall timetable size.

use std::collections::HashSet;

use crate::{
    errors::{TimetableError, TimetableResult, ValidationField, ValidationIssue},
    models::request::{GenerateTimetableRequest, GridConfig},
};

/// Upper bound on the number of scheduled days per week.
pub const MAX_DAYS: usize = 7;

/// Upper bound on the number of sections in one request.
pub const MAX_SECTIONS: usize = 64;

/// Upper bound on days x slots x sections for one request.
pub const MAX_ENTRIES: usize = 20_000;

/// Validates `request`, reporting every violated rule at once.
pub fn validate_request(request: &GenerateTimetableRequest) -> TimetableResult<()> {
    let mut issues = Vec::new();

    if request.institute_name.trim().is_empty() {
        issues.push(ValidationIssue::new(
            ValidationField::InstituteName,
            "Institute name is required",
        ));
    }

    if request.department.trim().is_empty() {
        issues.push(ValidationIssue::new(
            ValidationField::Department,
            "Department is required",
        ));
    }

    let incomplete: Vec<String> = request
        .subjects
        .iter()
        .enumerate()
        .filter(|(_, s)| {
            s.code.trim().is_empty() || s.name.trim().is_empty() || s.faculty_name.trim().is_empty()
        })
        .map(|(index, _)| (index + 1).to_string())
        .collect();
    if !incomplete.is_empty() {
        issues.push(ValidationIssue::new(
            ValidationField::Subjects,
            format!(
                "All subject fields are required (incomplete subjects: {})",
                incomplete.join(", ")
            ),
        ));
    }

    if request.total_students <= 0 {
        issues.push(ValidationIssue::new(
            ValidationField::TotalStudents,
            "Number of students must be greater than 0",
        ));
    }

    let assigned: i64 = request
        .sections
        .iter()
        .map(|section| i64::from(section.student_count))
        .sum();
    if assigned != request.total_students {
        issues.push(ValidationIssue::new(
            ValidationField::Sections,
            format!(
                "Total students in sections ({}) must match the total number of students ({})",
                assigned, request.total_students
            ),
        ));
    }

    if request.sections.len() > MAX_SECTIONS {
        issues.push(ValidationIssue::new(
            ValidationField::Sections,
            format!(
                "At most {} sections can be scheduled at once (got {})",
                MAX_SECTIONS,
                request.sections.len()
            ),
        ));
    }
    if request.sections.iter().any(|s| s.name.trim().is_empty()) {
        issues.push(ValidationIssue::new(
            ValidationField::Sections,
            "Every section needs a name",
        ));
    }
    if let Some(name) = first_duplicate(request.sections.iter().map(|s| s.name.as_str())) {
        issues.push(ValidationIssue::new(
            ValidationField::Sections,
            format!("Section name '{}' is used more than once", name),
        ));
    }

    if request.days.iter().any(|day| day.trim().is_empty()) {
        issues.push(ValidationIssue::new(
            ValidationField::Days,
            "Day names cannot be empty",
        ));
    }
    if let Some(day) = first_duplicate(request.days.iter().map(String::as_str)) {
        issues.push(ValidationIssue::new(
            ValidationField::Days,
            format!("Day '{}' is listed more than once", day),
        ));
    }

    if request.days.len() > MAX_DAYS {
        issues.push(ValidationIssue::new(
            ValidationField::Days,
            format!(
                "At most {} days can be scheduled (got {})",
                MAX_DAYS,
                request.days.len()
            ),
        ));
    }

    // An invalid grid is reported by the grid builder, not here.
    if let Some(slots) = slots_per_day(&request.grid_config()) {
        let entries = request
            .days
            .len()
            .saturating_mul(slots)
            .saturating_mul(request.sections.len());
        if entries > MAX_ENTRIES {
            issues.push(ValidationIssue::new(
                ValidationField::Timetable,
                format!(
                    "Requested timetable has {} entries ({} days x {} slots x {} sections), the limit is {}",
                    entries,
                    request.days.len(),
                    slots,
                    request.sections.len(),
                    MAX_ENTRIES
                ),
            ));
        }
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(TimetableError::Validation(issues))
    }
}

/// Number of slots the grid builder will emit per day, when the grid is valid.
fn slots_per_day(config: &GridConfig) -> Option<usize> {
    let period = usize::try_from(config.period_minutes).ok().filter(|p| *p > 0)?;
    let start = usize::from(config.day_start.minutes());
    let end = usize::from(config.day_end.minutes());
    (start < end).then(|| (end - start).div_ceil(period))
}

fn first_duplicate<'a>(names: impl Iterator<Item = &'a str>) -> Option<&'a str> {
    let mut seen = HashSet::new();
    names.into_iter().find(|name| !seen.insert(*name))
}
