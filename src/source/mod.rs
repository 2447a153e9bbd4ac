//! Data Source
//!
//! The data-access collaborator the dashboard reads from:
//!
//! - **types**: Upstream payload shapes (case records, time series, districts)
//! - **client**: HTTP implementation backed by `reqwest`
//!
//! Both reads may yield `Ok(None)` when the upstream body is JSON `null`.

mod client;
pub mod types;

pub use client::{Covid19Client, SourceConfig};
pub use types::{
    CaseRecord, Covid19Data, DistrictGroup, DistrictRecord, DistrictWise, TimeSeriesPoint,
};

use async_trait::async_trait;
use thiserror::Error;

/// Read access to the nationwide and district datasets
#[async_trait]
pub trait CaseSource: Send + Sync {
    /// Fetch per-state aggregates and the national time series
    async fn fetch_covid19_data(&self) -> Result<Option<Covid19Data>, FetchError>;

    /// Fetch the region → district breakdown
    async fn fetch_district_wise(&self) -> Result<Option<DistrictWise>, FetchError>;
}

/// Errors that can occur while reading from the data source
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Upstream unavailable")]
    Unavailable,

    #[error("Request timeout")]
    Timeout,

    #[error("Upstream error {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Failed to decode payload: {0}")]
    Decode(String),
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FetchError::Status {
            status: 503,
            message: "maintenance".to_string(),
        };
        assert_eq!(err.to_string(), "Upstream error 503: maintenance");
        assert_eq!(FetchError::Timeout.to_string(), "Request timeout");
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<Covid19Data>("not json").unwrap_err();
        let err: FetchError = json_err.into();
        assert!(matches!(err, FetchError::Decode(_)));
    }
}
