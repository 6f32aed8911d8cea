//! Birdeye public API client.
//!
//! Every request carries the configured `X-API-KEY` and `x-chain` headers and
//! waits on the shared rate limiter first. Retries are not done here; the
//! batch runner owns that policy.

use crate::config::ScanConfig;
use crate::sources::rate_limit::RequestLimiter;
use crate::sources::types::{
    ApiResponse, HistoryPriceData, MarketData, SampleInterval, TokenCreationInfo, TokenMetaData,
};
use crate::sources::MarketDataProvider;
use crate::types::TimeSeries;
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, instrument, warn};

const API_KEY_HEADER: &str = "X-API-KEY";
const CHAIN_HEADER: &str = "x-chain";

/// HTTP client for the Birdeye endpoints the scanner uses.
pub struct BirdeyeClient {
    http_client: Client,
    limiter: RequestLimiter,
    base_url: String,
    api_key: String,
    chain: String,
}

impl BirdeyeClient {
    /// Create a client from validated configuration.
    pub fn new(config: &ScanConfig) -> Result<Self> {
        config.validate()?;
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| anyhow!("Missing Birdeye API key"))?;

        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http_client,
            limiter: RequestLimiter::new(config.rate_limit_requests_per_second),
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            api_key,
            chain: config.chain.clone(),
        })
    }

    /// GET `path` with `query`, unwrap the `data` envelope.
    async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<Option<T>> {
        self.limiter.acquire().await;

        let url = format!("{}{}", self.base_url, path);
        let response = self
            .http_client
            .get(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .header(CHAIN_HEADER, &self.chain)
            .query(query)
            .send()
            .await
            .with_context(|| format!("Request to {} failed", path))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Birdeye {} returned {}", path, status);
            return Err(anyhow!("API Error ({}): {}", status, body));
        }

        let envelope: ApiResponse<T> = response
            .json()
            .await
            .with_context(|| format!("Failed to parse response from {}", path))?;

        if !envelope.success {
            debug!("Birdeye {} reported success=false", path);
        }
        Ok(envelope.data)
    }
}

#[async_trait]
impl MarketDataProvider for BirdeyeClient {
    #[instrument(skip(self))]
    async fn price_history(
        &self,
        token: &str,
        from: i64,
        to: i64,
        interval: SampleInterval,
    ) -> Result<TimeSeries> {
        let query = [
            ("address", token.to_string()),
            ("address_type", "token".to_string()),
            ("type", interval.as_str().to_string()),
            ("time_from", from.to_string()),
            ("time_to", to.to_string()),
        ];

        let series = self
            .get::<HistoryPriceData>("/defi/history_price", &query)
            .await?
            .map(TimeSeries::from)
            .unwrap_or_default();

        debug!("Fetched {} price samples", series.len());
        Ok(series)
    }

    #[instrument(skip(self))]
    async fn token_supply(&self, token: &str) -> Result<f64> {
        let data = self
            .get::<MarketData>("/defi/v3/token/market-data", &[("address", token.to_string())])
            .await?
            .ok_or_else(|| anyhow!("No market data for {}", token))?;

        let supply = data
            .total_supply
            .ok_or_else(|| anyhow!("Market data for {} has no total supply", token))?;

        debug!("Token supply: {}", supply);
        Ok(supply)
    }

    #[instrument(skip(self))]
    async fn token_symbol(&self, token: &str) -> Result<String> {
        self.get::<TokenMetaData>("/defi/v3/token/meta-data/single", &[("address", token.to_string())])
            .await?
            .and_then(|meta| meta.symbol)
            .filter(|symbol| !symbol.is_empty())
            .ok_or_else(|| anyhow!("Failed to retrieve ticker symbol for {}", token))
    }

    #[instrument(skip(self))]
    async fn launch_timestamp(&self, token: &str) -> Result<Option<i64>> {
        let launch = self
            .get::<TokenCreationInfo>("/defi/token_creation_info", &[("address", token.to_string())])
            .await?
            .and_then(|info| info.block_unix_time);

        debug!("Launch timestamp: {:?}", launch);
        Ok(launch)
    }
}
