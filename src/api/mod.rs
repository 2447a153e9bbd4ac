//! Dashboard REST API
//!
//! Serves the current dashboard snapshot as JSON so any UI layer can render
//! it. Built with Axum.
//!
//! # Endpoints
//!
//! ## Dashboard
//! - `GET /api/v1/dashboard` - Full view snapshot
//! - `GET /api/v1/chart` - Line chart configuration
//! - `GET /api/v1/states` - State table, Total first
//! - `GET /api/v1/districts` - District rows (optional `?state=`)
//! - `POST /api/v1/tooltip` - Tooltip render description for a hover payload
//! - `POST /api/v1/refresh` - Fetch both datasets again
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health` - Status with data freshness
//!
//! # Example
//!
//! ```rust,ignore
//! use covid_dashboard::api::{serve, ApiConfig, AppState};
//! use covid_dashboard::config::DashboardConfig;
//! use covid_dashboard::dashboard::DashboardController;
//! use covid_dashboard::source::{Covid19Client, SourceConfig};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Arc::new(Covid19Client::new(SourceConfig::default())?);
//!     let controller = Arc::new(DashboardController::new(client, DashboardConfig::default()));
//!     controller.load().await;
//!
//!     let config = ApiConfig::default();
//!     serve(AppState::new(controller, config.clone()), &config).await?;
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::{ApiConfig, AppState};

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/dashboard", get(routes::dashboard::get_dashboard))
        .route("/chart", get(routes::dashboard::get_chart))
        .route("/states", get(routes::dashboard::get_states))
        .route("/districts", get(routes::dashboard::get_districts))
        .route("/refresh", post(routes::dashboard::refresh))
        .route("/tooltip", post(routes::tooltip::render));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/", get(routes::health::full_health));

    let shared_state = Arc::new(state);

    Router::new()
        .nest("/api/v1", api_routes)
        .nest("/health", health_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(shared_state)
}

/// Start the API server
pub async fn serve(state: AppState, config: &ApiConfig) -> Result<(), ApiError> {
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Dashboard API listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Dashboard API shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
