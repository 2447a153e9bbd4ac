//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::api::ApiConfig;
use crate::dashboard::DEFAULT_CHART_WINDOW;
use crate::source::SourceConfig;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,

    #[serde(default)]
    pub dashboard: DashboardConfig,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Dashboard presentation settings
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    /// Number of trailing days on the chart
    #[serde(default = "default_chart_window")]
    pub chart_window: usize,

    /// Name of the aggregate row in the statewise list
    #[serde(default = "default_total_region")]
    pub total_region: String,
}

fn default_chart_window() -> usize {
    DEFAULT_CHART_WINDOW
}

fn default_total_region() -> String {
    "Total".to_string()
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            chart_window: default_chart_window(),
            total_region: default_total_region(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|error| ConfigError::Parse {
            path: path.to_path_buf(),
            error,
        })
    }

    fn parse(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("covid-dashboard").join("config.toml")),
            Some(PathBuf::from("/etc/covid-dashboard/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        // Source overrides
        if let Some(url) = var("COVID_DASHBOARD_SOURCE_URL") {
            self.source.base_url = url;
        }
        if let Some(secs) = var("COVID_DASHBOARD_TIMEOUT").and_then(|s| s.parse().ok()) {
            self.source.request_timeout_secs = secs;
        }

        // Dashboard overrides
        if let Some(window) = var("COVID_DASHBOARD_CHART_WINDOW").and_then(|s| s.parse().ok()) {
            self.dashboard.chart_window = window;
        }

        // API overrides
        if let Some(host) = var("COVID_DASHBOARD_API_HOST") {
            self.api.host = host;
        }
        if let Some(port) = var("COVID_DASHBOARD_API_PORT").and_then(|s| s.parse().ok()) {
            self.api.port = port;
        }

        // Logging overrides
        if let Some(level) = var("COVID_DASHBOARD_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("COVID_DASHBOARD_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Covid Dashboard Configuration
#
# Environment variables override these settings:
# - COVID_DASHBOARD_SOURCE_URL
# - COVID_DASHBOARD_TIMEOUT
# - COVID_DASHBOARD_CHART_WINDOW
# - COVID_DASHBOARD_API_HOST
# - COVID_DASHBOARD_API_PORT
# - COVID_DASHBOARD_LOG_LEVEL
# - COVID_DASHBOARD_LOG_FORMAT

[source]
# Base URL of the data API
base_url = "https://api.covid19india.org"

# Nationwide document (statewise + cases_time_series)
data_path = "data.json"

# District breakdown document
district_path = "state_district_wise.json"

# Request timeout in seconds
request_timeout_secs = 30

[dashboard]
# Trailing days plotted on the chart
chart_window = 31

# Name of the aggregate row in the statewise list
total_region = "Total"

[api]
# API server host
host = "0.0.0.0"

# API server port
port = 8085

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
