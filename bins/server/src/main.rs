//! Taxtrack API Server
//!
//! Main entry point for the Taxtrack backend service.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use taxtrack_api::{AppState, create_router};
use taxtrack_core::leads::LeadStore;
use taxtrack_shared::{AppConfig, TelemetryService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "taxtrack=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Create telemetry sink (disabled when no endpoint is configured)
    let telemetry = TelemetryService::from_config(&config.telemetry)?.map(Arc::new);
    match &telemetry {
        Some(service) => info!(
            endpoint = %service.endpoint(),
            timeout_secs = config.telemetry.timeout_secs,
            "Telemetry sink configured"
        ),
        None => info!("Telemetry sink disabled"),
    }

    // Create application state
    let state = AppState {
        telemetry,
        leads: Arc::new(LeadStore::new()),
    };

    // Create router
    let app = create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
