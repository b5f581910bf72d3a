use axum::{Router, routing::post};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/timetables", post(handlers::timetable::generate_timetable))
        .route(
            "/api/timetables/export",
            post(handlers::timetable::export_timetable),
        )
        .route(
            "/api/timetables/assisted",
            post(handlers::assisted::generate_assisted),
        )
        .route(
            "/api/timetables/assisted/optimize",
            post(handlers::assisted::optimize_assisted),
        )
}
