//! Data API Client
//!
//! HTTP client for the public COVID-19 data API.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

use super::{CaseSource, Covid19Data, DistrictWise, FetchError};

/// Configuration for the data API client
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Base URL of the data API (e.g., "https://api.covid19india.org")
    pub base_url: String,
    /// Path of the nationwide document, relative to the base URL
    pub data_path: String,
    /// Path of the district document, relative to the base URL
    pub district_path: String,
    /// Request timeout in seconds
    pub request_timeout_secs: u64,
    /// User-Agent header sent with every request
    pub user_agent: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.covid19india.org".to_string(),
            data_path: "data.json".to_string(),
            district_path: "state_district_wise.json".to_string(),
            request_timeout_secs: 30,
            user_agent: concat!("covid-dashboard/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Data API client
pub struct Covid19Client {
    client: Client,
    config: SourceConfig,
}

impl Covid19Client {
    /// Create a new client with the given configuration
    pub fn new(config: SourceConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self { client, config })
    }

    /// Get the current configuration
    pub fn config(&self) -> &SourceConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// GET a JSON document; a `null` body maps to `None`
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>, FetchError> {
        let url = self.url(path);
        tracing::debug!(url = %url, "Fetching document");

        let response = self.client.get(&url).send().await.map_err(classify)?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(FetchError::Status {
                status: status.as_u16(),
                message: text,
            });
        }

        let bytes = response.bytes().await.map_err(classify)?;
        let payload = serde_json::from_slice::<Option<T>>(&bytes)?;
        Ok(payload)
    }
}

fn classify(e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout
    } else if e.is_connect() {
        FetchError::Unavailable
    } else {
        FetchError::Request(e)
    }
}

#[async_trait]
impl CaseSource for Covid19Client {
    async fn fetch_covid19_data(&self) -> Result<Option<Covid19Data>, FetchError> {
        self.get_json(&self.config.data_path).await
    }

    async fn fetch_district_wise(&self) -> Result<Option<DistrictWise>, FetchError> {
        self.get_json(&self.config.district_path).await
    }
}
