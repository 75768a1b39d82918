//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - REST API routes for filing calculations and lead capture
//! - Shared application state
//! - HTTP error mapping

pub mod routes;

use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use taxtrack_core::leads::LeadStore;
use taxtrack_shared::{AppError, TelemetryService};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Telemetry sink, when configured.
    pub telemetry: Option<Arc<TelemetryService>>,
    /// In-memory lead registry.
    pub leads: Arc<LeadStore>,
}

impl AppState {
    /// Creates state with the telemetry sink disabled.
    #[must_use]
    pub fn without_telemetry() -> Self {
        Self {
            telemetry: None,
            leads: Arc::new(LeadStore::new()),
        }
    }
}

/// Maps an [`AppError`] to its JSON error response.
#[must_use]
pub fn error_response(error: &AppError) -> Response {
    let status =
        StatusCode::from_u16(error.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    (
        status,
        Json(json!({
            "error": error.error_code(),
            "message": error.to_string()
        })),
    )
        .into_response()
}

async fn not_found() -> Response {
    error_response(&AppError::NotFound("Route not found".to_string()))
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes())
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
