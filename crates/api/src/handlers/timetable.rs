//! # Timetable Handlers
//!
//! Runs the deterministic engine for a request. Each call gets its own
//! seeded generator; the seed is the request's, then the server default,
//! then a fresh random one. The seed used is echoed back so a run can be
//! reproduced.

use std::sync::Arc;

use axum::{Json, extract::State};
use rand::{SeedableRng, rngs::StdRng};
use timetablegen_core::{
    TimetableError, generate,
    grid::{TimeGrid, build_grid},
    models::{
        request::{GenerateTimetableRequest, GenerateTimetableResponse},
        timetable::{ExportTable, WeeklySchedule},
    },
};
use tracing::info;

use crate::{ApiState, middleware::error_handling::AppError};

/// Picks the seed for one generation run
pub fn resolve_seed(request_seed: Option<u64>, default_seed: Option<u64>) -> u64 {
    request_seed
        .or(default_seed)
        .unwrap_or_else(rand::random)
}

struct Generated {
    seed: u64,
    grid: TimeGrid,
    timetables: WeeklySchedule,
}

/// Runs the engine on the blocking pool
async fn run(state: &ApiState, request: GenerateTimetableRequest) -> Result<Generated, AppError> {
    let seed = resolve_seed(request.seed, state.config.default_seed);

    let generated = tokio::task::spawn_blocking(move || {
        let mut rng = StdRng::seed_from_u64(seed);
        let timetables = generate(&request, &mut rng)?;
        let grid = build_grid(&request.grid_config())?;
        Ok::<_, TimetableError>(Generated {
            seed,
            grid,
            timetables,
        })
    })
    .await
    .map_err(|e| TimetableError::Generation(format!("timetable generation task failed: {e}")))??;

    info!(seed, sections = generated.timetables.len(), "timetables generated");
    Ok(generated)
}

/// Generates one schedule per section
///
/// # Endpoint
///
/// ```text
/// POST /api/timetables
/// ```
///
/// # Errors
///
/// * `TimetableError::Validation` - business rules failed (400)
/// * `TimetableError::Configuration` - bad grid, breaks or empty subject pool (422)
/// * `TimetableError::Generation` - the generation task did not complete (502)
#[axum::debug_handler]
pub async fn generate_timetable(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<GenerateTimetableRequest>,
) -> Result<Json<GenerateTimetableResponse>, AppError> {
    let generated = run(&state, payload).await?;

    Ok(Json(GenerateTimetableResponse {
        seed: generated.seed,
        grid: generated.grid.slots().to_vec(),
        timetables: generated.timetables,
    }))
}

/// Generates schedules and returns the flat `Day, Time, Subject, Faculty` rows per section
///
/// # Endpoint
///
/// ```text
/// POST /api/timetables/export
/// ```
#[axum::debug_handler]
pub async fn export_timetable(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<GenerateTimetableRequest>,
) -> Result<Json<ExportTable>, AppError> {
    let generated = run(&state, payload).await?;
    Ok(Json(generated.timetables.export_rows()))
}
