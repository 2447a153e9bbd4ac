//! Dashboard
//!
//! The single dashboard view, split by concern:
//!
//! - **transform**: Flatten districts, cut the chart window, filter regions
//! - **dates**: Parse and display the last-updated timestamp
//! - **chart**: Static line chart configuration
//! - **tooltip**: Hover payload → tooltip render description
//! - **view**: Immutable view snapshots
//! - **controller**: Fetches data and publishes snapshots
//!
//! # Data Flow
//!
//! ```text
//! CaseSource ─┬─ covid19 data ──→ CasesPanel ────┐
//!             └─ district data ─→ DistrictPanel ─┴─→ DashboardView (watch)
//! ```

pub mod chart;
pub mod controller;
pub mod dates;
pub mod tooltip;
pub mod transform;
pub mod view;

pub use chart::LineChartConfig;
pub use controller::{DashboardController, FetchOutcome, LoadReport};
pub use dates::{format_display, last_updated_display, parse_display, parse_last_updated, DateError};
pub use tooltip::{render_tooltip, CanvasOffset, TooltipModel, TooltipRender};
pub use transform::{
    chart_series, displayable_regions, flatten_district_wise, parse_count, split_total,
    ChartSeries, DistrictRow, DEFAULT_CHART_WINDOW,
};
pub use view::{CasesPanel, DashboardView, DistrictPanel};
