//! # Schedule Assembler
//!
//! Entry point of the engine. Validates the request, builds the grid and the
//! break registry once, then runs the section scheduler for each section in
//! input order. Either a complete weekly schedule comes back or nothing does.

use rand::Rng;
use tracing::info;

use crate::{
    breaks::BreakRegistry,
    errors::TimetableResult,
    grid::build_grid,
    models::{request::GenerateTimetableRequest, timetable::WeeklySchedule},
    pool::SubjectPool,
    scheduler::SectionScheduler,
    validation::validate_request,
};

/// Generates one schedule per section.
///
/// Sections share a single `rng` and are drawn in input order, so the same
/// seed and request always give the same result.
///
/// # Errors
///
/// * `TimetableError::Validation` - the request breaks a business rule
/// * `TimetableError::Configuration` - bad grid bounds, bad breaks, or an
///   empty subject pool when a class slot needs a subject
pub fn generate<R>(request: &GenerateTimetableRequest, rng: &mut R) -> TimetableResult<WeeklySchedule>
where
    R: Rng + ?Sized,
{
    validate_request(request)?;

    let grid = build_grid(&request.grid_config())?;
    let breaks = BreakRegistry::register(&request.breaks)?;
    breaks.warn_unaligned(&grid);
    let pool = SubjectPool::load(request.subjects.clone());

    info!(
        sections = request.sections.len(),
        days = request.days.len(),
        slots_per_day = grid.len(),
        breaks = breaks.len(),
        subjects = pool.len(),
        "generating timetables"
    );

    let scheduler = SectionScheduler::new(&grid, &breaks, &pool, &request.preferences);
    let mut weekly = WeeklySchedule::default();
    for section in &request.sections {
        let schedule = scheduler.schedule(section, &request.days, rng)?;
        weekly.insert(section.name.clone(), schedule);
    }

    Ok(weekly)
}
