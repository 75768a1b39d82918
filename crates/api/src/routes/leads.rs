//! Lead capture routes.

use axum::http::{StatusCode, header};
use axum::{
    Json, Router,
    extract::State,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Deserialize;
use tracing::info;
use validator::ValidateEmail;

use crate::{AppState, error_response};
use taxtrack_shared::AppError;

/// Creates the lead capture routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/leads", post(register_lead))
        .route("/leads/export", get(export_leads))
}

/// Request body for registering a lead.
#[derive(Debug, Deserialize)]
pub struct RegisterLeadRequest {
    /// Email address.
    pub email: String,
    /// Optional phone number.
    #[serde(default)]
    pub phone: Option<String>,
}

/// POST `/leads` - Register a lead. First registration per email wins.
async fn register_lead(
    State(state): State<AppState>,
    Json(payload): Json<RegisterLeadRequest>,
) -> Response {
    if !payload.email.validate_email() {
        return error_response(&AppError::Validation(format!(
            "Invalid email address: {}",
            payload.email
        )));
    }

    match state.leads.register(&payload.email, payload.phone) {
        Ok(lead) => {
            info!(lead_id = %lead.id, "Lead registered");
            (StatusCode::CREATED, Json(lead)).into_response()
        }
        Err(e) => error_response(&AppError::Conflict(e.to_string())),
    }
}

/// GET `/leads/export` - Export captured leads as CSV.
async fn export_leads(State(state): State<AppState>) -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/csv")], state.leads.export_csv())
}
