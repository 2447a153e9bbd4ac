//! Data Transformer
//!
//! Pure reshaping of upstream payloads into display data:
//!
//! - district breakdown → flat `{state, district, confirmed}` rows
//! - national time series → trailing-window chart series
//! - statewise list → Total row (looked up by name) plus displayable regions

use serde::Serialize;

use crate::source::{CaseRecord, DistrictGroup, DistrictWise, TimeSeriesPoint};

/// Default number of trailing days plotted on the chart
pub const DEFAULT_CHART_WINDOW: usize = 31;

/// One leaf of the district breakdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DistrictRow {
    pub state: String,
    pub district: String,
    pub confirmed: u64,
}

/// Chart-ready labels and values, same length, chronological order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    /// `None` where the upstream count did not parse
    pub values: Vec<Option<u64>>,
}

impl ChartSeries {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Most recent plotted value
    pub fn latest(&self) -> Option<u64> {
        self.values.iter().rev().flatten().next().copied()
    }
}

/// Flatten region → group → district into one row per district.
///
/// Returns a fresh vector on every call. Non-map groups are skipped, and so
/// is any single district whose confirmed count is missing or malformed.
pub fn flatten_district_wise(data: &DistrictWise) -> Vec<DistrictRow> {
    let mut rows = Vec::new();

    for (state, groups) in data {
        for (key, group) in groups {
            let districts = match group {
                DistrictGroup::Districts(districts) => districts,
                DistrictGroup::Other(_) => {
                    tracing::trace!(state = %state, key = %key, "Skipping non-district entry");
                    continue;
                }
            };

            for (district, record) in districts {
                let Some(confirmed) = record.confirmed else {
                    tracing::debug!(
                        state = %state,
                        district = %district,
                        "Skipping district without a confirmed count"
                    );
                    continue;
                };
                rows.push(DistrictRow {
                    state: state.clone(),
                    district: district.clone(),
                    confirmed,
                });
            }
        }
    }

    rows
}

/// Project the trailing `window` points of a time series onto chart arrays.
///
/// A series shorter than the window is taken whole.
pub fn chart_series(points: &[TimeSeriesPoint], window: usize) -> ChartSeries {
    let start = points.len().saturating_sub(window);
    let tail = &points[start..];

    ChartSeries {
        labels: tail.iter().map(|p| p.date.trim().to_string()).collect(),
        values: tail.iter().map(|p| parse_count(&p.totalconfirmed)).collect(),
    }
}

/// Parse an upstream count.
///
/// Strict decimal after trimming whitespace: `"00"` is 0, `"0x"` is `None`.
pub fn parse_count(text: &str) -> Option<u64> {
    let text = text.trim();
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

/// Keep regions with a non-zero confirmed count.
///
/// Malformed counts are excluded.
pub fn displayable_regions(records: &[CaseRecord]) -> Vec<CaseRecord> {
    records
        .iter()
        .filter(|record| match parse_count(&record.confirmed) {
            Some(0) => false,
            Some(_) => true,
            None => {
                tracing::debug!(
                    state = %record.state,
                    confirmed = %record.confirmed,
                    "Excluding region with malformed confirmed count"
                );
                false
            }
        })
        .cloned()
        .collect()
}

/// Separate the aggregate row, found by name, from the per-region rows.
///
/// The match ignores ASCII case and surrounding whitespace. Region order is
/// preserved.
pub fn split_total(
    records: &[CaseRecord],
    total_name: &str,
) -> (Option<CaseRecord>, Vec<CaseRecord>) {
    let is_total = |r: &CaseRecord| r.state.trim().eq_ignore_ascii_case(total_name.trim());

    let total = records.iter().find(|r| is_total(r)).cloned();
    let regions = records.iter().filter(|r| !is_total(r)).cloned().collect();

    (total, regions)
}
