//! Scanner configuration.
//!
//! Credentials and endpoints are injected here and consumed only by the
//! market data client; the analysis engine never sees them.

use crate::sources::SampleInterval;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;

pub const ENV_API_KEY: &str = "BIRDEYE_API_KEY";
pub const ENV_BASE_URL: &str = "BIRDEYE_BASE_URL";
pub const ENV_INTERVAL: &str = "ATHSCAN_INTERVAL";
pub const ENV_RETRY_ATTEMPTS: &str = "ATHSCAN_RETRY_ATTEMPTS";

/// Configuration for the market data client and the batch runner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Birdeye public API base URL
    pub api_base_url: String,
    /// Birdeye API key, sent as `X-API-KEY`
    pub api_key: Option<String>,
    /// Chain sent as `x-chain`
    pub chain: String,
    /// Price history sampling interval
    pub interval: SampleInterval,
    /// Per-request timeout in seconds
    pub request_timeout_seconds: u64,
    /// Attempts per upstream call in the batch runner
    pub retry_attempts: usize,
    /// Client-side request rate limit
    pub rate_limit_requests_per_second: u32,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://public-api.birdeye.so".to_string(),
            api_key: None,
            chain: "solana".to_string(),
            interval: SampleInterval::OneMinute,
            request_timeout_seconds: 10,
            retry_attempts: 3,
            rate_limit_requests_per_second: 15,
        }
    }
}

impl ScanConfig {
    /// Default configuration overlaid with values from the environment.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(key) = env::var(ENV_API_KEY) {
            if !key.trim().is_empty() {
                config.api_key = Some(key.trim().to_string());
            }
        }
        if let Ok(url) = env::var(ENV_BASE_URL) {
            config.api_base_url = url.trim_end_matches('/').to_string();
        }
        if let Ok(interval) = env::var(ENV_INTERVAL) {
            config.interval = interval
                .trim()
                .parse()
                .with_context(|| format!("Invalid {}", ENV_INTERVAL))?;
        }
        if let Ok(attempts) = env::var(ENV_RETRY_ATTEMPTS) {
            config.retry_attempts = attempts
                .trim()
                .parse()
                .with_context(|| format!("Invalid {}", ENV_RETRY_ATTEMPTS))?;
        }

        Ok(config)
    }

    /// Check the settings the live client depends on.
    pub fn validate(&self) -> Result<()> {
        if self.api_key.is_none() {
            return Err(anyhow!("Missing API key (set {})", ENV_API_KEY));
        }
        if self.rate_limit_requests_per_second == 0 {
            return Err(anyhow!("Rate limit must be at least 1 request per second"));
        }
        if self.request_timeout_seconds == 0 {
            return Err(anyhow!("Request timeout must be non-zero"));
        }
        Ok(())
    }
}

/// Builder for [`ScanConfig`] with sensible defaults.
pub struct ScanConfigBuilder {
    config: ScanConfig,
}

impl ScanConfigBuilder {
    /// Create a new builder with default configuration.
    pub fn new() -> Self {
        Self {
            config: ScanConfig::default(),
        }
    }

    /// Set the API base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.config.api_base_url = url.into();
        self
    }

    /// Set the API key.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = Some(key.into());
        self
    }

    /// Set the chain header.
    pub fn with_chain(mut self, chain: impl Into<String>) -> Self {
        self.config.chain = chain.into();
        self
    }

    /// Set the price history sampling interval.
    pub fn with_interval(mut self, interval: SampleInterval) -> Self {
        self.config.interval = interval;
        self
    }

    /// Set the per-request timeout.
    pub fn with_request_timeout(mut self, seconds: u64) -> Self {
        self.config.request_timeout_seconds = seconds;
        self
    }

    /// Set retry attempts per upstream call.
    pub fn with_retry_attempts(mut self, attempts: usize) -> Self {
        self.config.retry_attempts = attempts;
        self
    }

    /// Set rate limiting.
    pub fn with_rate_limit(mut self, requests_per_second: u32) -> Self {
        self.config.rate_limit_requests_per_second = requests_per_second;
        self
    }

    pub fn build(self) -> ScanConfig {
        self.config
    }
}

impl Default for ScanConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
