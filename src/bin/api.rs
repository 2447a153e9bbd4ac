//! Covid Dashboard API Server
//!
//! Run with: cargo run --bin covid-dashboard-api
//!
//! Loads configuration from the default locations (see `config.rs`), fetches
//! both datasets once, then serves the snapshot. `POST /api/v1/refresh`
//! fetches again.
//!
//! # Configuration
//!
//! Environment variables:
//! - `COVID_DASHBOARD_CONFIG`: Explicit config file path
//! - `COVID_DASHBOARD_SOURCE_URL`: Data API base URL
//! - `COVID_DASHBOARD_API_HOST` / `COVID_DASHBOARD_API_PORT`: Bind address
//! - `RUST_LOG`: Log filter (default: from config, info)

use covid_dashboard::api::{serve, AppState};
use covid_dashboard::config::Config;
use covid_dashboard::dashboard::DashboardController;
use covid_dashboard::logging::init_tracing;
use covid_dashboard::source::Covid19Client;
use std::path::PathBuf;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = match std::env::var("COVID_DASHBOARD_CONFIG") {
        Ok(path) => Config::load_with_env(&PathBuf::from(path))?,
        Err(_) => Config::load_default(),
    };
    init_tracing(&config.logging);

    tracing::info!("Starting Covid Dashboard API v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Data source: {}", config.source.base_url);

    let client = Arc::new(Covid19Client::new(config.source.clone())?);
    let controller = Arc::new(DashboardController::new(client, config.dashboard.clone()));

    // Initial fetch; failures leave the dashboard empty until a refresh succeeds
    let report = controller.load().await;
    if !report.all_updated() {
        tracing::warn!(?report, "Initial load incomplete");
    }

    let state = AppState::new(controller, config.api.clone());
    serve(state, &config.api).await?;

    tracing::info!("Covid Dashboard API stopped");
    Ok(())
}
