//! # TimetableGen API
//!
//! The API crate exposes the timetable engine over HTTP.
//!
//! ## Architecture
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Turn requests into engine calls
//! - **Middleware**: Error-to-HTTP mapping
//! - **Config**: Environment and application configuration
//! - **Model**: Clients for the optional language-model backend
//!
//! The API uses Axum as the web framework. The engine itself lives in
//! `timetablegen-core` and is synchronous.

/// Configuration module for API settings
pub mod config;
/// Request handlers
pub mod handlers;
/// Middleware for error handling
pub mod middleware;
/// Language-model clients for assisted generation
pub mod model;
/// Route definitions and API endpoint structure
pub mod routes;

use std::{sync::Arc, time::Duration};

use axum::Router;
use eyre::Result;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::FmtSubscriber;

use crate::model::TimetableModel;

/// Shared application state that is accessible to all request handlers
pub struct ApiState {
    /// Server configuration, including the default seed
    pub config: config::ApiConfig,
    /// Language-model backend, present when `AI_SERVICE` is configured
    pub model: Option<Arc<dyn TimetableModel>>,
}

impl ApiState {
    /// Builds state from configuration, creating the model client if one is configured
    pub fn from_config(config: config::ApiConfig) -> Result<Self> {
        let model = config
            .model
            .as_ref()
            .map(|model| {
                model::client_from_config(model, Duration::from_secs(config.request_timeout))
            })
            .transpose()?;

        Ok(Self { config, model })
    }
}

/// Builds the application router with all routes and layers
pub fn app(state: Arc<ApiState>) -> Router {
    let cors_origins = state.config.cors_origins.clone();
    let request_timeout = state.config.request_timeout;

    let app = Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Timetable generation endpoints
        .merge(routes::timetable::routes())
        // Attach shared state to all routes
        .with_state(state);

    // Apply CORS configuration if origins are specified
    let app = if let Some(origins) = cors_origins {
        let cors = tower_http::cors::CorsLayer::new()
            .allow_methods([
                axum::http::Method::GET,
                axum::http::Method::POST,
                axum::http::Method::OPTIONS,
            ])
            .allow_headers([
                axum::http::header::CONTENT_TYPE,
                axum::http::header::ACCEPT,
            ])
            .allow_origin(
                origins
                    .iter()
                    .filter_map(|origin| origin.parse().ok())
                    .collect::<Vec<axum::http::HeaderValue>>(),
            );

        app.layer(cors)
    } else {
        app
    };

    // Add request tracing and timeout middleware
    app.layer(
        tower::ServiceBuilder::new()
            .layer(tower_http::trace::TraceLayer::new_for_http())
            .layer(tower_http::timeout::TimeoutLayer::new(Duration::from_secs(
                request_timeout,
            ))),
    )
}

/// Starts the API server with the provided configuration
///
/// Initializes logging, builds the shared state and router, and serves
/// until the process is stopped.
pub async fn start_server(config: config::ApiConfig) -> Result<()> {
    // Initialize tracing for logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let addr = config.server_addr();
    let state = Arc::new(ApiState::from_config(config)?);
    if state.model.is_some() {
        info!("Assisted generation enabled");
    }

    let app = app(state);

    // Start the HTTP server
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
