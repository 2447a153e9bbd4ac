//! Dashboard view model
//!
//! Immutable snapshots handed to the rendering layer. A fetch completion
//! builds a new panel and publishes a new snapshot; nothing is edited in
//! place.

use serde::Serialize;

use super::chart::LineChartConfig;
use super::dates::last_updated_display;
use super::transform::{
    chart_series, displayable_regions, flatten_district_wise, split_total, ChartSeries,
    DistrictRow,
};
use crate::config::DashboardConfig;
use crate::source::{CaseRecord, Covid19Data, DistrictWise};

/// Nationwide figures: state table, last-updated line and chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CasesPanel {
    /// Aggregate row, found by name
    pub total: Option<CaseRecord>,
    /// Regions with a non-zero confirmed count, upstream order, Total excluded
    pub regions: Vec<CaseRecord>,
    /// Every statewise record as received
    pub statewise: Vec<CaseRecord>,
    /// e.g. "26th April 2020, 10:00:00 pm"
    pub last_updated: Option<String>,
    pub series: ChartSeries,
    pub chart: LineChartConfig,
}

impl CasesPanel {
    pub fn build(data: Covid19Data, config: &DashboardConfig) -> Self {
        let (total, others) = split_total(&data.statewise, &config.total_region);
        if total.is_none() {
            tracing::warn!(
                total_region = %config.total_region,
                "No aggregate row in statewise data"
            );
        }

        let last_updated = total
            .as_ref()
            .and_then(|t| last_updated_display(&t.lastupdatedtime));
        let series = chart_series(&data.cases_time_series, config.chart_window);
        let chart = LineChartConfig::cumulative_confirmed().with_series(&series);

        Self {
            total,
            regions: displayable_regions(&others),
            statewise: data.statewise,
            last_updated,
            series,
            chart,
        }
    }
}

/// District table
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DistrictPanel {
    pub rows: Vec<DistrictRow>,
}

impl DistrictPanel {
    pub fn build(data: &DistrictWise) -> Self {
        Self {
            rows: flatten_district_wise(data),
        }
    }

    /// Rows belonging to one state, case-insensitive
    pub fn for_state(&self, state: &str) -> Vec<&DistrictRow> {
        self.rows
            .iter()
            .filter(|r| r.state.eq_ignore_ascii_case(state))
            .collect()
    }
}

/// One published state of the dashboard
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardView {
    /// Incremented on every published change
    pub generation: u64,
    /// Requests currently in flight
    pub pending_requests: u32,
    pub cases: Option<CasesPanel>,
    pub districts: Option<DistrictPanel>,
}

impl DashboardView {
    pub fn is_loading(&self) -> bool {
        self.pending_requests > 0
    }

    /// State table rows: Total first, then displayable regions
    pub fn table_rows(&self) -> Vec<&CaseRecord> {
        match &self.cases {
            Some(cases) => cases.total.iter().chain(cases.regions.iter()).collect(),
            None => Vec::new(),
        }
    }

    /// Chart config, empty until the nationwide fetch succeeds
    pub fn chart(&self) -> LineChartConfig {
        self.cases
            .as_ref()
            .map(|c| c.chart.clone())
            .unwrap_or_default()
    }

    pub fn district_rows(&self) -> &[DistrictRow] {
        self.districts
            .as_ref()
            .map(|d| d.rows.as_slice())
            .unwrap_or(&[])
    }
}
