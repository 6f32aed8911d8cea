//! Market data sources.
//!
//! The analysis engine consumes fully materialized series; this module is
//! where they come from. [`MarketDataProvider`] is the seam: the batch runner
//! only talks to the trait, and [`BirdeyeClient`] is the live implementation.

pub mod types;
pub mod rate_limit;
pub mod birdeye;

use crate::types::TimeSeries;
use anyhow::Result;
use async_trait::async_trait;

pub use birdeye::BirdeyeClient;
pub use rate_limit::RequestLimiter;
pub use types::{SampleInterval, UnknownInterval};

/// Upstream market data needed to analyze one token.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Price history over `[from, to]` (Unix seconds) at the given interval.
    /// An empty series is returned as-is; the engine decides what it means.
    async fn price_history(
        &self,
        token: &str,
        from: i64,
        to: i64,
        interval: SampleInterval,
    ) -> Result<TimeSeries>;

    /// Current total supply. Used for every market cap, historical or not.
    async fn token_supply(&self, token: &str) -> Result<f64>;

    /// Ticker symbol.
    async fn token_symbol(&self, token: &str) -> Result<String>;

    /// Creation time of the token, when the provider knows it.
    async fn launch_timestamp(&self, token: &str) -> Result<Option<i64>>;
}
