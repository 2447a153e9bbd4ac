//! Health Routes
//!
//! - GET /health/live - Liveness probe (process is alive)
//! - GET /health - Status with data freshness

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::api::dto::HealthResponse;
use crate::api::state::AppState;

/// GET /health/live
///
/// Returns 200 if the process is alive, no dependency checks.
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// GET /health
pub async fn full_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let view = state.controller.current();
    let cases_loaded = view.cases.is_some();
    let districts_loaded = view.districts.is_some();

    let status = if cases_loaded && districts_loaded {
        "healthy"
    } else if view.is_loading() {
        "loading"
    } else {
        "degraded"
    };

    Json(HealthResponse {
        status: status.to_string(),
        cases_loaded,
        districts_loaded,
        uptime_seconds: state.uptime_seconds(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
