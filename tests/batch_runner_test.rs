//! Tests for the batch runner against an in-memory market data provider

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use athscan::batch::{BatchRunner, RowStatus};
use athscan::report;
use athscan::sources::{MarketDataProvider, SampleInterval};
use athscan::{PriceSample, ScanConfigBuilder, TimeSeries, TokenRow};
use nonempty::NonEmpty;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// 2024-01-15 13:45 UTC
const TRIGGER: i64 = 1_705_326_300;
const NOW: i64 = TRIGGER + 86_400;

#[derive(Default)]
struct InMemoryProvider {
    series: HashMap<String, TimeSeries>,
    supply: HashMap<String, f64>,
    launches: HashMap<String, i64>,
    /// Number of initial supply calls that fail, per token
    supply_failures: HashMap<String, usize>,
    supply_calls: AtomicUsize,
    history_requests: Mutex<Vec<(String, i64, i64, SampleInterval)>>,
}

impl InMemoryProvider {
    fn with_token(mut self, token: &str, supply: f64, samples: Vec<PriceSample>) -> Self {
        self.series.insert(token.to_string(), TimeSeries::new(samples));
        self.supply.insert(token.to_string(), supply);
        self
    }
}

#[async_trait]
impl MarketDataProvider for InMemoryProvider {
    async fn price_history(
        &self,
        token: &str,
        from: i64,
        to: i64,
        interval: SampleInterval,
    ) -> Result<TimeSeries> {
        self.history_requests
            .lock()
            .unwrap()
            .push((token.to_string(), from, to, interval));

        Ok(self
            .series
            .get(token)
            .map(|series| series.iter().copied().filter(|s| s.timestamp >= from && s.timestamp <= to).collect())
            .unwrap_or_default())
    }

    async fn token_supply(&self, token: &str) -> Result<f64> {
        let call = self.supply_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(failures) = self.supply_failures.get(token) {
            if call < *failures {
                return Err(anyhow!("upstream timeout"));
            }
        }
        self.supply
            .get(token)
            .copied()
            .ok_or_else(|| anyhow!("unknown token {}", token))
    }

    async fn token_symbol(&self, token: &str) -> Result<String> {
        Ok(format!("SYM{}", token.len()))
    }

    async fn launch_timestamp(&self, token: &str) -> Result<Option<i64>> {
        Ok(self.launches.get(token).copied())
    }
}

fn rising_samples() -> Vec<PriceSample> {
    vec![
        PriceSample::new(TRIGGER - 600, 2.0),
        PriceSample::new(TRIGGER, 1.0),
        PriceSample::new(TRIGGER + 600, 0.8),
        PriceSample::new(TRIGGER + 3_600, 4.0),
        PriceSample::new(TRIGGER + 7_200, 0.1),
    ]
}

fn row(token: &str, trigger: &str) -> TokenRow {
    TokenRow {
        token: token.to_string(),
        trigger: trigger.to_string(),
    }
}

#[tokio::test]
async fn test_batch_isolates_row_failures() {
    let provider = InMemoryProvider::default()
        .with_token("GoodMint", 1_000_000.0, rising_samples())
        .with_token("EmptyMint", 5.0, vec![]);
    let config = ScanConfigBuilder::new().with_retry_attempts(1).build();
    let runner = BatchRunner::new(provider, config);

    let rows = NonEmpty::from_vec(vec![
        row("GoodMint", "20240115 13:45"),
        row("EmptyMint", "20240115 13:45"),
        row("UnknownMint", "20240115 13:45"),
        row("GoodMint", "not a date"),
        row("", "20240115 13:45"),
        row("GoodMint", "2024-01-15 13:45"),
    ])
    .unwrap();

    let reports = runner.run(&rows, NOW).await;
    assert_eq!(reports.len(), 6);

    assert_eq!(reports[0].status, RowStatus::Done);
    let result = reports[0].result.as_ref().unwrap();
    assert_eq!(result.trigger_sample, PriceSample::new(TRIGGER, 1.0));
    assert_eq!(result.ath_after_trigger.timestamp, TRIGGER + 3_600);
    assert_eq!(result.trough_between_trigger_and_ath.timestamp, TRIGGER + 600);
    assert_eq!(reports[0].symbol.as_deref(), Some("SYM8"));

    match &reports[1].status {
        RowStatus::Error(message) => assert!(message.contains("No price data found")),
        other => panic!("expected error, got {:?}", other),
    }
    assert!(matches!(reports[2].status, RowStatus::Error(_)));
    assert!(matches!(reports[3].status, RowStatus::Error(_)));
    assert!(matches!(reports[4].status, RowStatus::Skipped(_)));
    assert_eq!(reports[5].status, RowStatus::Done);
}

#[tokio::test]
async fn test_fetch_window_starts_at_launch() {
    let mut provider = InMemoryProvider::default().with_token("GoodMint", 1_000.0, rising_samples());
    provider.launches.insert("GoodMint".to_string(), TRIGGER - 3_600);
    let config = ScanConfigBuilder::new()
        .with_interval(SampleInterval::FiveMinutes)
        .build();
    let runner = BatchRunner::new(provider, config);

    let report = runner.run_row(&row("GoodMint", "20240115 13:45"), NOW).await;
    assert_eq!(report.status, RowStatus::Done);

    // pre-trigger high at TRIGGER - 600 is inside the launch-relative window
    let result = report.result.unwrap();
    let ath_before = result.ath_before_trigger.unwrap();
    assert_eq!(ath_before.timestamp, TRIGGER - 600);
    assert_eq!(ath_before.market_cap, 2_000.0);
    assert_eq!(result.duration_ath_before_to_trigger.unwrap().to_string(), "0d 0h 10m");
}

#[tokio::test]
async fn test_unknown_launch_fetches_from_trigger() {
    let provider = InMemoryProvider::default().with_token("GoodMint", 1_000.0, rising_samples());
    let runner = BatchRunner::new(provider, ScanConfigBuilder::new().build());

    let report = runner.run_row(&row("GoodMint", "20240115 13:45"), NOW).await;
    let result = report.result.unwrap();
    assert!(result.ath_before_trigger.is_none());
}

#[tokio::test]
async fn test_transient_failures_are_retried() {
    let mut provider = InMemoryProvider::default().with_token("FlakyMint", 10.0, rising_samples());
    provider.supply_failures.insert("FlakyMint".to_string(), 1);
    let config = ScanConfigBuilder::new().with_retry_attempts(2).build();
    let runner = BatchRunner::new(provider, config);

    let report = runner.run_row(&row("FlakyMint", "20240115 13:45"), NOW).await;
    assert_eq!(report.status, RowStatus::Done);
}

#[tokio::test]
async fn test_failures_without_retry_budget() {
    let mut provider = InMemoryProvider::default().with_token("FlakyMint", 10.0, rising_samples());
    provider.supply_failures.insert("FlakyMint".to_string(), 1);
    let config = ScanConfigBuilder::new().with_retry_attempts(1).build();
    let runner = BatchRunner::new(provider, config);

    let report = runner.run_row(&row("FlakyMint", "20240115 13:45"), NOW).await;
    match report.status {
        RowStatus::Error(message) => assert!(message.contains("Failed to fetch token supply")),
        other => panic!("expected error, got {:?}", other),
    }
    assert_eq!(report.trigger_timestamp, Some(TRIGGER));
}

#[tokio::test]
async fn test_rendered_report_rows() {
    let provider = InMemoryProvider::default().with_token("GoodMint", 1_000.0, rising_samples());
    let runner = BatchRunner::new(provider, ScanConfigBuilder::new().build());
    let rows = NonEmpty::from_vec(vec![row("GoodMint", "20240115 13:45")]).unwrap();

    let rendered = report::render(&runner.run(&rows, NOW).await);
    assert_eq!(rendered[0].market_cap_at_trigger, "1000.00");
    assert_eq!(rendered[0].ath_market_cap, "4000.00");
    assert_eq!(rendered[0].percent_increase_to_ath, "300.00%");
    assert_eq!(rendered[0].percent_drop_to_trough, "-20.00%");
    assert_eq!(rendered[0].time_to_ath, "0d 1h 0m");
    assert_eq!(rendered[0].time_to_trough, "0d 0h 10m");
    assert_eq!(rendered[0].ath_before_trigger_market_cap, "N/A");
    assert_eq!(rendered[0].status, "Done");
}
