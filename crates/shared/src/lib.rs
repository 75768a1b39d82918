//! Shared types, errors, and configuration for Taxtrack.
//!
//! This crate provides common pieces used by the api and server crates:
//! - Application configuration management
//! - Application-wide error types
//! - The best-effort telemetry client for calculation records

pub mod config;
pub mod error;
pub mod telemetry;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use telemetry::{CalculationDetails, CalculationRecord, TelemetryError, TelemetryService};
