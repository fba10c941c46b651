//! Configuration structures
//!
//! Every section has serde defaults so partial files (or an empty one) load.
//! The bearer token is deliberately absent: credentials come from the
//! environment, never from a config file.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_API_BACKOFF_MS, DEFAULT_API_BASE_URL, DEFAULT_API_MAX_ATTEMPTS,
    DEFAULT_API_TIMEOUT_SECS, DEFAULT_LOG_LEVEL, DEFAULT_SCRAP_CATALOG_LIMIT,
};
use crate::impl_domain_enum_conversions;

/// Top-level application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub rescale: RescaleConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Remote REST backend settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL, e.g. `https://erp.example.com/api`
    pub base_url: String,
    pub timeout_secs: u64,
    /// Total attempts per request (initial try + retries).
    pub max_attempts: usize,
    pub base_backoff_ms: u64,
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn base_backoff(&self) -> Duration {
        Duration::from_millis(self.base_backoff_ms)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout_secs: DEFAULT_API_TIMEOUT_SECS,
            max_attempts: DEFAULT_API_MAX_ATTEMPTS,
            base_backoff_ms: DEFAULT_API_BACKOFF_MS,
        }
    }
}

/// What to do with a scrap line whose stock read failed and which has no
/// entry in the catalog snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingStockPolicy {
    /// Report the line as failed and issue no write.
    #[default]
    Skip,
    /// Treat the current stock as zero and write the delta.
    AssumeZero,
}

impl_domain_enum_conversions!(MissingStockPolicy {
    Skip => "skip",
    AssumeZero => "assume_zero",
});

/// Rescale workflow settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RescaleConfig {
    pub missing_stock_policy: MissingStockPolicy,
    /// Load a scrap catalog snapshot to fall back on when a stock read fails.
    pub scrap_catalog_enabled: bool,
    pub scrap_catalog_limit: u32,
}

impl Default for RescaleConfig {
    fn default() -> Self {
        Self {
            missing_stock_policy: MissingStockPolicy::Skip,
            scrap_catalog_enabled: true,
            scrap_catalog_limit: DEFAULT_SCRAP_CATALOG_LIMIT,
        }
    }
}

/// Output format of the log subscriber
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl_domain_enum_conversions!(LogFormat {
    Pretty => "pretty",
    Json => "json",
});

/// Logging settings (`RUST_LOG` still wins when set)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: DEFAULT_LOG_LEVEL.to_string(), format: LogFormat::Pretty }
    }
}
