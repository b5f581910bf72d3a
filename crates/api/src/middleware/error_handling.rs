//! # Error Handling Middleware
//!
//! Maps engine errors to HTTP status codes and JSON error bodies so every
//! endpoint reports failures the same way.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use timetablegen_core::errors::TimetableError;

/// Application error wrapper that provides HTTP status code mapping
///
/// # Example
///
/// ```
/// use axum::Json;
/// use rand::{SeedableRng, rngs::StdRng};
/// use timetablegen_api::middleware::error_handling::AppError;
/// use timetablegen_core::{generate, models::{request::GenerateTimetableRequest, timetable::WeeklySchedule}};
///
/// fn handler(request: GenerateTimetableRequest) -> Result<Json<WeeklySchedule>, AppError> {
///     let mut rng = StdRng::seed_from_u64(1);
///     let weekly = generate(&request, &mut rng)?;
///     Ok(Json(weekly))
/// }
/// # fn main() {}
/// ```
#[derive(Debug)]
pub struct AppError(pub TimetableError);

/// Converts application errors to HTTP responses
///
/// Validation failures carry the full list of violated rules under `details`.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            TimetableError::Validation(_) => StatusCode::BAD_REQUEST,
            TimetableError::Configuration(_) => StatusCode::UNPROCESSABLE_ENTITY,
            TimetableError::Generation(_) => StatusCode::BAD_GATEWAY,
        };

        let message = self.0.to_string();
        let body = match &self.0 {
            TimetableError::Validation(issues) => json!({ "error": message, "details": issues }),
            _ => json!({ "error": message }),
        };

        (status, Json(body)).into_response()
    }
}

/// Automatic conversion from TimetableError to AppError
impl From<TimetableError> for AppError {
    fn from(err: TimetableError) -> Self {
        AppError(err)
    }
}

/// Maps a TimetableError to an HTTP response
pub fn map_error(err: TimetableError) -> Response {
    AppError(err).into_response()
}
