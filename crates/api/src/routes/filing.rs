//! Filing calculation routes.

use axum::{
    Json, Router,
    extract::State,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{AppState, error_response};
use taxtrack_core::filing::{FinancialYear, compute_first_filing};
use taxtrack_shared::{AppError, CalculationDetails, CalculationRecord};

/// Creates the filing routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/filing/calculate", post(calculate))
        .route("/filing/financial-years", get(list_financial_years))
}

/// Request body for a filing calculation.
#[derive(Debug, Deserialize)]
pub struct CalculateRequest {
    /// Company incorporation date (YYYY-MM-DD).
    #[serde(default)]
    pub incorporation_date: Option<NaiveDate>,
    /// Financial year convention, e.g. "January to December".
    pub financial_year: String,
    /// Email captured by the lead gate, forwarded to telemetry.
    #[serde(default)]
    pub email: Option<String>,
    /// Phone number captured by the lead gate, forwarded to telemetry.
    #[serde(default)]
    pub phone: Option<String>,
}

/// Response body for a filing calculation.
#[derive(Debug, Serialize)]
pub struct CalculateResponse {
    /// Display string, e.g. "June 2023 to December 2023".
    pub first_filing_period: String,
    /// Display string, e.g. "September 2024".
    pub filing_due_date: String,
    /// First day of the first filing period.
    pub period_start: NaiveDate,
    /// Last day of the first filing period.
    pub period_end: NaiveDate,
    /// Filing due date (1st of the due month).
    pub due_date: NaiveDate,
}

/// POST `/filing/calculate` - Compute the first filing period and due date.
async fn calculate(State(state): State<AppState>, Json(payload): Json<CalculateRequest>) -> Response {
    let Some(incorporation_date) = payload.incorporation_date else {
        return error_response(&AppError::Validation(
            "Incorporation date is required".to_string(),
        ));
    };

    let financial_year: FinancialYear = match payload.financial_year.parse() {
        Ok(fy) => fy,
        Err(e) => return error_response(&AppError::Validation(e.to_string())),
    };

    let result = match compute_first_filing(incorporation_date, financial_year) {
        Ok(result) => result,
        Err(e) => return error_response(&AppError::BusinessRule(e.to_string())),
    };

    info!(
        incorporation_date = %incorporation_date,
        financial_year = %financial_year,
        first_filing_period = %result.first_filing_period,
        "Filing calculation performed"
    );

    let response = CalculateResponse {
        first_filing_period: result.first_filing_period.to_string(),
        filing_due_date: result.due_date_display(),
        period_start: result.first_filing_period.start,
        period_end: result.first_filing_period.end,
        due_date: result.due_date,
    };

    // Compute, respond, then submit: the sink never blocks or fails the
    // request path.
    if let Some(telemetry) = state.telemetry.clone() {
        let record = CalculationRecord {
            timestamp: Utc::now(),
            email: payload.email,
            phone: payload.phone,
            incorporation_date,
            financial_year: financial_year.to_string(),
            first_filing_period: response.first_filing_period.clone(),
            filing_due_date: response.filing_due_date.clone(),
            calculation_details: CalculationDetails {
                period_start: response.period_start,
                period_end: response.period_end,
                due_date: response.due_date,
            },
        };

        tokio::spawn(async move {
            if let Err(e) = telemetry.submit(&record).await {
                warn!(error = %e, "Telemetry submission failed");
            }
        });
    }

    Json(response).into_response()
}

/// GET `/filing/financial-years` - List the 12 supported conventions.
async fn list_financial_years() -> Json<Vec<FinancialYear>> {
    Json(FinancialYear::ALL.to_vec())
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use crate::{AppState, create_router};

    async fn post_calculate(body: Value) -> (StatusCode, Value) {
        let app = create_router(AppState::without_telemetry());
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/filing/calculate")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .expect("request builds"),
            )
            .await
            .expect("request is handled");

        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body reads")
            .to_bytes();
        let value = serde_json::from_slice(&bytes).expect("body is json");
        (status, value)
    }

    #[tokio::test]
    async fn test_calculate_at_regime_start() {
        let (status, body) = post_calculate(json!({
            "incorporation_date": "2023-06-01",
            "financial_year": "January to December"
        }))
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["first_filing_period"], "June 2023 to December 2023");
        assert_eq!(body["filing_due_date"], "September 2024");
        assert_eq!(body["period_start"], "2023-06-01");
        assert_eq!(body["period_end"], "2023-12-31");
        assert_eq!(body["due_date"], "2024-09-01");
    }

    #[tokio::test]
    async fn test_calculate_without_incorporation_date() {
        let (status, body) = post_calculate(json!({
            "financial_year": "January to December"
        }))
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "validation_error");
    }

    #[tokio::test]
    async fn test_calculate_with_unknown_convention() {
        let (status, body) = post_calculate(json!({
            "incorporation_date": "2024-08-15",
            "financial_year": "Fiscal-ish"
        }))
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "validation_error");
        assert!(
            body["message"]
                .as_str()
                .expect("message is a string")
                .contains("Fiscal-ish")
        );
    }

    #[tokio::test]
    async fn test_list_financial_years() {
        let app = create_router(AppState::without_telemetry());
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/filing/financial-years")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("request is handled");

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body reads")
            .to_bytes();
        let options: Vec<String> = serde_json::from_slice(&bytes).expect("body is json");

        assert_eq!(options.len(), 12);
        assert_eq!(options.first().map(String::as_str), Some("January to December"));
        assert_eq!(options.last().map(String::as_str), Some("December to November"));
    }
}
