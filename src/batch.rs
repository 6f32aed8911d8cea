//! Batch runner - scores many (token, trigger) rows against a market data
//! provider.
//!
//! Rows are independent: a failure in one row is recorded on that row and the
//! batch moves on. Upstream calls are retried with exponential backoff; the
//! analysis itself is never retried since it is deterministic.

use crate::analysis::{AnalysisResult, PriceActionAnalyzer};
use crate::config::ScanConfig;
use crate::sources::MarketDataProvider;
use crate::trigger_time::parse_trigger_time;
use crate::types::{AnalysisRequest, TokenRow};
use anyhow::{Context, Result};
use nonempty::NonEmpty;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::future::Future;
use std::time::Duration;
use tokio_retry::{strategy::ExponentialBackoff, Retry};
use tracing::{error, info, instrument, warn};

/// Outcome of one row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RowStatus {
    Done,
    /// Row was missing its token or trigger time
    Skipped(String),
    Error(String),
}

impl fmt::Display for RowStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowStatus::Done => write!(f, "Done"),
            RowStatus::Skipped(reason) => write!(f, "Skipped: {}", reason),
            RowStatus::Error(message) => write!(f, "Error: {}", message),
        }
    }
}

/// Everything known about one row after the batch ran.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RowReport {
    pub row: TokenRow,
    pub symbol: Option<String>,
    pub trigger_timestamp: Option<i64>,
    pub result: Option<AnalysisResult>,
    pub status: RowStatus,
}

impl RowReport {
    fn skipped(row: &TokenRow, reason: &str) -> Self {
        Self {
            row: row.clone(),
            symbol: None,
            trigger_timestamp: None,
            result: None,
            status: RowStatus::Skipped(reason.to_string()),
        }
    }
}

/// Successful per-row output.
struct ScoredRow {
    symbol: String,
    trigger_timestamp: i64,
    result: AnalysisResult,
}

/// Runs the analysis for a list of rows, one row at a time.
pub struct BatchRunner<P: MarketDataProvider> {
    provider: P,
    config: ScanConfig,
    analyzer: PriceActionAnalyzer,
}

impl<P: MarketDataProvider> BatchRunner<P> {
    pub fn new(provider: P, config: ScanConfig) -> Self {
        Self {
            provider,
            config,
            analyzer: PriceActionAnalyzer::new(),
        }
    }

    /// Score every row. `now` is the end of each fetched price window.
    pub async fn run(&self, rows: &NonEmpty<TokenRow>, now: i64) -> Vec<RowReport> {
        info!("Running price-action analysis for {} rows", rows.len());

        let mut reports = Vec::with_capacity(rows.len());
        for (index, row) in rows.iter().enumerate() {
            let report = self.run_row(row, now).await;
            match &report.status {
                RowStatus::Done => info!("Row {}: {} done", index + 1, row.token),
                RowStatus::Skipped(reason) => warn!("Row {}: skipped ({})", index + 1, reason),
                RowStatus::Error(message) => error!("Row {}: {} failed: {}", index + 1, row.token, message),
            }
            reports.push(report);
        }

        let done = reports.iter().filter(|r| r.status == RowStatus::Done).count();
        info!("Batch complete: {}/{} rows analyzed", done, reports.len());
        reports
    }

    /// Score one row, folding any failure into the report.
    pub async fn run_row(&self, row: &TokenRow, now: i64) -> RowReport {
        let token = row.token.trim();
        let trigger = row.trigger.trim();
        if token.is_empty() {
            return RowReport::skipped(row, "missing token address");
        }
        if trigger.is_empty() {
            return RowReport::skipped(row, "missing trigger time");
        }

        match self.score(token, trigger, now).await {
            Ok(scored) => RowReport {
                row: row.clone(),
                symbol: Some(scored.symbol),
                trigger_timestamp: Some(scored.trigger_timestamp),
                result: Some(scored.result),
                status: RowStatus::Done,
            },
            Err(e) => RowReport {
                row: row.clone(),
                symbol: None,
                trigger_timestamp: parse_trigger_time(trigger).ok(),
                result: None,
                status: RowStatus::Error(format!("{:#}", e)),
            },
        }
    }

    #[instrument(skip(self, now))]
    async fn score(&self, token: &str, trigger: &str, now: i64) -> Result<ScoredRow> {
        let trigger_timestamp = parse_trigger_time(trigger)?;

        let supply = self
            .with_retry("token supply", || self.provider.token_supply(token))
            .await?;

        // Unknown launch time only narrows the fetched window to start at the trigger.
        let launch_timestamp = match self
            .with_retry("launch time", || self.provider.launch_timestamp(token))
            .await
        {
            Ok(Some(launch)) => launch,
            Ok(None) => trigger_timestamp,
            Err(e) => {
                warn!("Launch time unavailable for {}: {:#}", token, e);
                trigger_timestamp
            }
        };

        let request = AnalysisRequest::new(trigger_timestamp, launch_timestamp, supply);
        let (from, to) = request.fetch_window(now);
        let interval = self.config.interval;

        let series = self
            .with_retry("price history", || {
                self.provider.price_history(token, from, to, interval)
            })
            .await?;

        let symbol = self
            .with_retry("ticker symbol", || self.provider.token_symbol(token))
            .await?;

        let result = self.analyzer.analyze(&series, &request)?;

        Ok(ScoredRow {
            symbol,
            trigger_timestamp,
            result,
        })
    }

    /// Run `action`, retrying failures up to the configured attempt count.
    async fn with_retry<T, A, Fut>(&self, what: &str, action: A) -> Result<T>
    where
        A: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let retry_strategy = ExponentialBackoff::from_millis(100)
            .max_delay(Duration::from_secs(5))
            .take(self.config.retry_attempts.saturating_sub(1));

        Retry::spawn(retry_strategy, action)
            .await
            .with_context(|| format!("Failed to fetch {}", what))
    }
}
