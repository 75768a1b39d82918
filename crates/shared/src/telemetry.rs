//! Best-effort telemetry client for calculation records.
//!
//! Each computed filing result is posted to a remote record-keeping
//! endpoint. Submissions are fire-and-forget: callers spawn [`TelemetryService::submit`]
//! on a background task, log failures, and never surface them to the end
//! user. There are no retries; the client timeout bounds every request.

use std::time::Duration;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::TelemetryConfig;

/// Telemetry errors.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// Failed to construct the HTTP client.
    #[error("Failed to build telemetry client: {0}")]
    Client(String),
    /// Transport-level failure (connect, timeout, TLS).
    #[error("Failed to reach telemetry endpoint: {0}")]
    Transport(String),
    /// Endpoint answered with a non-success status.
    #[error("Telemetry endpoint rejected record: HTTP {0}")]
    Rejected(u16),
}

/// Structured breakdown of a computed filing result.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationDetails {
    /// First day of the first filing period.
    pub period_start: NaiveDate,
    /// Last day of the first filing period.
    pub period_end: NaiveDate,
    /// Filing due date (first of the due month).
    pub due_date: NaiveDate,
}

/// One calculation record, as posted to the record-keeping endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationRecord {
    /// Submission timestamp.
    pub timestamp: DateTime<Utc>,
    /// Email captured by the lead gate, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Phone number captured by the lead gate, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Incorporation date as submitted.
    pub incorporation_date: NaiveDate,
    /// Financial year convention string (e.g., "April to March").
    pub financial_year: String,
    /// Display string for the first filing period.
    pub first_filing_period: String,
    /// Display string for the filing due date.
    pub filing_due_date: String,
    /// Structured calculation breakdown.
    pub calculation_details: CalculationDetails,
}

/// Client for the remote record-keeping endpoint.
#[derive(Debug, Clone)]
pub struct TelemetryService {
    endpoint: String,
    client: reqwest::Client,
}

impl TelemetryService {
    /// Creates a telemetry service from configuration.
    ///
    /// Returns `None` when no endpoint is configured (sink disabled).
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn from_config(config: &TelemetryConfig) -> Result<Option<Self>, TelemetryError> {
        let Some(endpoint) = config.endpoint.clone() else {
            return Ok(None);
        };

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| TelemetryError::Client(e.to_string()))?;

        Ok(Some(Self { endpoint, client }))
    }

    /// Returns the configured endpoint URL.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Submits one calculation record.
    ///
    /// Best-effort: no retries, bounded by the configured client timeout.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success response.
    pub async fn submit(&self, record: &CalculationRecord) -> Result<(), TelemetryError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(record)
            .send()
            .await
            .map_err(|e| TelemetryError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TelemetryError::Rejected(status.as_u16()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_record(email: Option<&str>) -> CalculationRecord {
        CalculationRecord {
            timestamp: Utc
                .with_ymd_and_hms(2024, 1, 15, 9, 30, 0)
                .single()
                .expect("valid timestamp"),
            email: email.map(str::to_string),
            phone: None,
            incorporation_date: NaiveDate::from_ymd_opt(2023, 6, 1).expect("valid date"),
            financial_year: "January to December".to_string(),
            first_filing_period: "June 2023 to December 2023".to_string(),
            filing_due_date: "September 2024".to_string(),
            calculation_details: CalculationDetails {
                period_start: NaiveDate::from_ymd_opt(2023, 6, 1).expect("valid date"),
                period_end: NaiveDate::from_ymd_opt(2023, 12, 31).expect("valid date"),
                due_date: NaiveDate::from_ymd_opt(2024, 9, 1).expect("valid date"),
            },
        }
    }

    #[test]
    fn test_record_wire_names_are_camel_case() {
        let value = serde_json::to_value(sample_record(Some("a@b.ae"))).expect("serializes");

        assert_eq!(value["email"], "a@b.ae");
        assert_eq!(value["incorporationDate"], "2023-06-01");
        assert_eq!(value["financialYear"], "January to December");
        assert_eq!(value["firstFilingPeriod"], "June 2023 to December 2023");
        assert_eq!(value["filingDueDate"], "September 2024");
        assert_eq!(value["calculationDetails"]["periodStart"], "2023-06-01");
        assert_eq!(value["calculationDetails"]["periodEnd"], "2023-12-31");
        assert_eq!(value["calculationDetails"]["dueDate"], "2024-09-01");
    }

    #[test]
    fn test_record_omits_absent_contact_fields() {
        let value = serde_json::to_value(sample_record(None)).expect("serializes");
        let object = value.as_object().expect("record is an object");

        assert!(!object.contains_key("email"));
        assert!(!object.contains_key("phone"));
    }

    #[test]
    fn test_from_config_disabled_without_endpoint() {
        let service =
            TelemetryService::from_config(&TelemetryConfig::default()).expect("client builds");
        assert!(service.is_none());
    }

    #[test]
    fn test_from_config_with_endpoint() {
        let config = TelemetryConfig {
            endpoint: Some("https://records.example.com/rows".to_string()),
            timeout_secs: 2,
        };

        let service = TelemetryService::from_config(&config)
            .expect("client builds")
            .expect("sink enabled");
        assert_eq!(service.endpoint(), "https://records.example.com/rows");
    }
}
