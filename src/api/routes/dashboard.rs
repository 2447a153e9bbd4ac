//! Dashboard Routes
//!
//! - GET /api/v1/dashboard - Full view snapshot
//! - GET /api/v1/chart - Line chart configuration
//! - GET /api/v1/states - State table (Total first)
//! - GET /api/v1/districts - Flattened district rows
//! - POST /api/v1/refresh - Fetch both datasets again

use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use crate::api::dto::{DistrictQuery, RefreshResponse, StatesResponse};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::dashboard::{DashboardView, DistrictRow, LineChartConfig};

/// GET /api/v1/dashboard
pub async fn get_dashboard(State(state): State<Arc<AppState>>) -> Json<DashboardView> {
    Json(state.controller.current())
}

/// GET /api/v1/chart
///
/// Always answers; the chart is empty until nationwide data arrives.
pub async fn get_chart(State(state): State<Arc<AppState>>) -> Json<LineChartConfig> {
    Json(state.controller.current().chart())
}

/// GET /api/v1/states
pub async fn get_states(State(state): State<Arc<AppState>>) -> ApiResult<Json<StatesResponse>> {
    let view = state.controller.current();
    let cases = view
        .cases
        .as_ref()
        .ok_or_else(|| ApiError::NotFound("nationwide data not loaded".to_string()))?;

    Ok(Json(StatesResponse {
        last_updated: cases.last_updated.clone(),
        rows: view.table_rows().into_iter().cloned().collect(),
    }))
}

/// GET /api/v1/districts?state=Kerala
pub async fn get_districts(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DistrictQuery>,
) -> ApiResult<Json<Vec<DistrictRow>>> {
    let view = state.controller.current();
    let panel = view
        .districts
        .as_ref()
        .ok_or_else(|| ApiError::NotFound("district data not loaded".to_string()))?;

    let rows = match query.state.as_deref() {
        Some(name) => panel.for_state(name).into_iter().cloned().collect(),
        None => panel.rows.clone(),
    };

    Ok(Json(rows))
}

/// POST /api/v1/refresh
pub async fn refresh(State(state): State<Arc<AppState>>) -> ApiResult<Json<RefreshResponse>> {
    if !state.config.enable_refresh {
        return Err(ApiError::Forbidden("refresh is disabled".to_string()));
    }

    let report = state.controller.load().await;
    Ok(Json(RefreshResponse {
        report,
        view: state.controller.current(),
    }))
}
