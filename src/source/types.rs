//! Upstream payload types
//!
//! Shapes of the two JSON documents served by the data API. Counts in the
//! nationwide payload arrive as text and are parsed on use.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ============================================
// NATIONWIDE PAYLOAD
// ============================================

/// Nationwide payload: per-state aggregates plus the national time series
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct Covid19Data {
    /// One record per state, plus the aggregate "Total" row
    #[serde(default)]
    pub statewise: Vec<CaseRecord>,
    /// Daily national counts in chronological order
    #[serde(default)]
    pub cases_time_series: Vec<TimeSeriesPoint>,
}

/// Aggregate counts for a region at a point in time
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct CaseRecord {
    /// State name, or "Total" for the national aggregate
    pub state: String,
    #[serde(default)]
    pub statecode: String,
    pub confirmed: String,
    #[serde(default)]
    pub active: String,
    #[serde(default)]
    pub recovered: String,
    #[serde(default, alias = "deceased")]
    pub deaths: String,
    #[serde(default)]
    pub deltaconfirmed: String,
    #[serde(default)]
    pub deltadeaths: String,
    #[serde(default)]
    pub deltarecovered: String,
    /// `DD/MM/YYYY, h:mm:ss a`
    #[serde(default)]
    pub lastupdatedtime: String,
}

impl CaseRecord {
    /// Create a record with the given name and confirmed count
    pub fn new(state: impl Into<String>, confirmed: impl Into<String>) -> Self {
        Self {
            state: state.into(),
            confirmed: confirmed.into(),
            ..Default::default()
        }
    }

    /// Set the last-updated timestamp
    pub fn last_updated(mut self, time: impl Into<String>) -> Self {
        self.lastupdatedtime = time.into();
        self
    }
}

/// One day's national counts
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct TimeSeriesPoint {
    /// Display date as sent upstream, e.g. "26 April "
    pub date: String,
    /// Cumulative confirmed cases
    pub totalconfirmed: String,
    #[serde(default)]
    pub totaldeceased: String,
    #[serde(default)]
    pub totalrecovered: String,
    #[serde(default)]
    pub dailyconfirmed: String,
    #[serde(default)]
    pub dailydeceased: String,
    #[serde(default)]
    pub dailyrecovered: String,
}

impl TimeSeriesPoint {
    pub fn new(date: impl Into<String>, totalconfirmed: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            totalconfirmed: totalconfirmed.into(),
            ..Default::default()
        }
    }
}

// ============================================
// DISTRICT PAYLOAD
// ============================================

/// District breakdown: region → group key → sub-region → record.
///
/// Upstream nests districts under a `districtData` key next to scalar
/// fields such as `statecode`; every map-valued group is treated as a set
/// of districts and the rest are ignored.
pub type DistrictWise = BTreeMap<String, BTreeMap<String, DistrictGroup>>;

/// One entry under a region
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(untagged)]
pub enum DistrictGroup {
    /// Sub-region name → record
    Districts(BTreeMap<String, DistrictRecord>),
    /// Anything else upstream puts next to the district map
    Other(serde_json::Value),
}

/// Leaf record of the district breakdown.
///
/// Decoded per leaf: a leaf whose `confirmed` is missing or is not a
/// non-negative integer keeps `confirmed: None` instead of failing the whole
/// district map it sits in.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(from = "serde_json::Value")]
pub struct DistrictRecord {
    pub confirmed: Option<u64>,
    pub lastupdatedtime: String,
}

impl DistrictRecord {
    pub fn new(confirmed: u64) -> Self {
        Self {
            confirmed: Some(confirmed),
            lastupdatedtime: String::new(),
        }
    }
}

impl From<serde_json::Value> for DistrictRecord {
    fn from(value: serde_json::Value) -> Self {
        let lastupdatedtime = value
            .get("lastupdatedtime")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string();

        Self {
            confirmed: value.get("confirmed").and_then(count_from_value),
            lastupdatedtime,
        }
    }
}

/// Accept a count sent either as a JSON number or as a numeric string
fn count_from_value(value: &serde_json::Value) -> Option<u64> {
    match value {
        serde_json::Value::Number(n) => n.as_u64(),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
