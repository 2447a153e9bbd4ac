//! # Covid Dashboard
//!
//! A COVID-19 India dashboard: fetches nationwide case data and the
//! district breakdown from a public API, reshapes them for display, and
//! publishes immutable view snapshots for a chart and two tables.
//!
//! ## Modules
//!
//! - [`source`]: Upstream payload types and the HTTP data client
//! - [`dashboard`]: Transforms, date formatting, chart/tooltip descriptions,
//!   view model and the controller that ties them together
//! - [`api`]: REST API serving the current snapshot, built with Axum
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use covid_dashboard::config::DashboardConfig;
//! use covid_dashboard::dashboard::DashboardController;
//! use covid_dashboard::source::{Covid19Client, SourceConfig};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Arc::new(Covid19Client::new(SourceConfig::default())?);
//!     let controller = DashboardController::new(client, DashboardConfig::default());
//!
//!     controller.load().await;
//!     let view = controller.current();
//!
//!     for row in view.table_rows() {
//!         println!("{}: {}", row.state, row.confirmed);
//!     }
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod dashboard;
pub mod logging;
pub mod source;

pub use api::{build_router, serve, ApiConfig, ApiError, AppState};

pub use config::{Config, ConfigError, DashboardConfig, LoggingConfig};

pub use dashboard::{
    CasesPanel, ChartSeries, DashboardController, DashboardView, DistrictPanel, DistrictRow,
    FetchOutcome, LineChartConfig, LoadReport, TooltipModel, TooltipRender,
};

pub use source::{
    CaseRecord, CaseSource, Covid19Client, Covid19Data, DistrictWise, FetchError, SourceConfig,
    TimeSeriesPoint,
};
