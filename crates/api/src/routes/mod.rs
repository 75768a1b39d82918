//! API route definitions.

use axum::Router;

use crate::AppState;

pub mod filing;
pub mod health;
pub mod leads;

/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(filing::routes())
        .merge(leads::routes())
}
