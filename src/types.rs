//! Core types and data structures for the athscan price-action analyzer.

use serde::{Deserialize, Serialize};

/// A token mint address (kept as a string, no on-chain types needed here)
pub type TokenAddress = String;

/// A single price observation for a token.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceSample {
    /// Unix timestamp in seconds
    pub timestamp: i64,
    /// Price in quote currency (non-negative)
    pub price: f64,
}

impl PriceSample {
    pub fn new(timestamp: i64, price: f64) -> Self {
        Self { timestamp, price }
    }
}

/// Price history for one token over a fetched window.
///
/// Samples are expected in ascending timestamp order, but nothing in the
/// analysis engine depends on that. Duplicate timestamps are allowed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeSeries {
    samples: Vec<PriceSample>,
}

impl TimeSeries {
    pub fn new(samples: Vec<PriceSample>) -> Self {
        Self { samples }
    }

    pub fn samples(&self) -> &[PriceSample] {
        &self.samples
    }

    pub fn iter(&self) -> impl Iterator<Item = &PriceSample> {
        self.samples.iter()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

impl From<Vec<PriceSample>> for TimeSeries {
    fn from(samples: Vec<PriceSample>) -> Self {
        Self::new(samples)
    }
}

impl FromIterator<PriceSample> for TimeSeries {
    fn from_iter<I: IntoIterator<Item = PriceSample>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Parameters of a single analysis call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    /// The moment the analysis is anchored to (Unix seconds, UTC)
    pub trigger_timestamp: i64,
    /// Token launch / reference time. Expected to be <= trigger, not enforced.
    pub launch_timestamp: i64,
    /// Current token supply, applied to every sample's market cap
    pub token_supply: f64,
}

impl AnalysisRequest {
    pub fn new(trigger_timestamp: i64, launch_timestamp: i64, token_supply: f64) -> Self {
        Self {
            trigger_timestamp,
            launch_timestamp,
            token_supply,
        }
    }

    /// Window of price history the caller has to fetch: `[launch, now]`.
    ///
    /// A launch later than the trigger is pulled back to the trigger so the
    /// post-trigger window is always covered.
    pub fn fetch_window(&self, now: i64) -> (i64, i64) {
        let from = self.launch_timestamp.min(self.trigger_timestamp);
        (from, now.max(from))
    }
}

/// One input row of a batch: a token and a human-entered trigger time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenRow {
    /// The token mint address
    #[serde(default)]
    pub token: TokenAddress,
    /// Trigger time as typed by a user, e.g. "20240115 13:45"
    #[serde(default)]
    pub trigger: String,
}
