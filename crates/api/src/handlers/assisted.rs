//! # Assisted Generation Handler
//!
//! Forwards the caller's constraints to the configured language model and
//! returns its schedule once it parses. Only the `courses`, `faculty`,
//! `classrooms` and `departments` keys of a body reach the model. A reply
//! that does not parse is an error; the deterministic engine is never used
//! as a substitute.

use std::sync::Arc;

use axum::{Json, extract::State};
use serde_json::Value;
use timetablegen_core::{
    errors::TimetableError,
    external::{
        OPTIMIZE_SYSTEM_PROMPT, SYSTEM_PROMPT, build_optimize_prompt, build_prompt,
        parse_model_timetable, project_constraints,
    },
    models::external::{ModelTimetable, OptimizeTimetableRequest},
};
use tracing::{info, warn};

use crate::{ApiState, middleware::error_handling::AppError, model::TimetableModel};

fn configured_model(state: &ApiState) -> Result<&dyn TimetableModel, TimetableError> {
    state
        .model
        .as_deref()
        .ok_or_else(|| TimetableError::Configuration("AI_SERVICE is not configured".to_string()))
}

async fn ask(model: &dyn TimetableModel, system: &str, prompt: &str) -> Result<ModelTimetable, AppError> {
    let raw = model.complete(system, prompt).await.map_err(|e| {
        warn!(error = %e, "model request failed");
        TimetableError::Generation(format!("model request failed: {:#}", e))
    })?;

    Ok(parse_model_timetable(&raw)?)
}

/// Asks the language model for a timetable
///
/// # Endpoint
///
/// ```text
/// POST /api/timetables/assisted
/// ```
///
/// # Errors
///
/// * `TimetableError::Configuration` - no model backend is configured (422)
/// * `TimetableError::Generation` - the call failed or the reply is malformed (502)
#[axum::debug_handler]
pub async fn generate_assisted(
    State(state): State<Arc<ApiState>>,
    Json(body): Json<Value>,
) -> Result<Json<ModelTimetable>, AppError> {
    let model = configured_model(&state)?;

    let prompt = build_prompt(&project_constraints(&body))?;
    let timetable = ask(model, SYSTEM_PROMPT, &prompt).await?;
    info!(rows = timetable.schedule.len(), "assisted timetable generated");

    Ok(Json(timetable))
}

/// Asks the language model to improve an existing timetable
///
/// # Endpoint
///
/// ```text
/// POST /api/timetables/assisted/optimize
/// ```
///
/// The reply must have the same structure as a generated timetable.
///
/// # Errors
///
/// * `TimetableError::Configuration` - no model backend is configured (422)
/// * `TimetableError::Generation` - the call failed or the reply is malformed (502)
#[axum::debug_handler]
pub async fn optimize_assisted(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<OptimizeTimetableRequest>,
) -> Result<Json<ModelTimetable>, AppError> {
    let model = configured_model(&state)?;

    let constraints = project_constraints(&payload.constraints);
    let prompt = build_optimize_prompt(&payload.timetable, &constraints)?;
    let timetable = ask(model, OPTIMIZE_SYSTEM_PROMPT, &prompt).await?;
    info!(rows = timetable.schedule.len(), "assisted timetable optimized");

    Ok(Json(timetable))
}
