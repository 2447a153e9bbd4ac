//! Data Transfer Objects
//!
//! Request and response types for the API endpoints that are not view
//! model types themselves.

use serde::{Deserialize, Serialize};

use crate::dashboard::tooltip::{CanvasOffset, TooltipModel};
use crate::dashboard::{DashboardView, LoadReport};
use crate::source::CaseRecord;

/// Query parameters for the district listing
#[derive(Debug, Default, Deserialize)]
pub struct DistrictQuery {
    /// Only districts of this state
    #[serde(default)]
    pub state: Option<String>,
}

/// State table response
#[derive(Debug, Serialize)]
pub struct StatesResponse {
    pub last_updated: Option<String>,
    /// Total first, then regions with cases
    pub rows: Vec<CaseRecord>,
}

/// Tooltip render request: engine payload plus canvas offset
#[derive(Debug, Deserialize)]
pub struct TooltipRequest {
    pub tooltip: TooltipModel,
    #[serde(default)]
    pub canvas: CanvasOffset,
}

/// Tooltip render response
#[derive(Debug, Serialize)]
pub struct TooltipResponse {
    pub render: crate::dashboard::TooltipRender,
    pub class_list: String,
    pub style: String,
    pub html: Option<String>,
}

/// Refresh response
#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub report: LoadReport,
    pub view: DashboardView,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall status: healthy, degraded, loading
    pub status: String,
    /// Nationwide data loaded
    pub cases_loaded: bool,
    /// District data loaded
    pub districts_loaded: bool,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Application version
    pub version: String,
}
