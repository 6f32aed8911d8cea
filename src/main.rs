//! Main entry point for the athscan batch analyzer
//!
//! Reads `[{ "token": "...", "trigger": "YYYYMMDD HH:mm" }, ...]` from the file
//! given as the first argument and prints one report row per input row.

use anyhow::{anyhow, Context, Result};
use athscan::batch::BatchRunner;
use athscan::report;
use athscan::sources::BirdeyeClient;
use athscan::{ScanConfig, TokenRow};
use nonempty::NonEmpty;
use std::env;
use std::fs;
use tracing::{info, Level};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_writer(std::io::stderr)
        .init();

    let path = env::args()
        .nth(1)
        .ok_or_else(|| anyhow!("Usage: athscan <rows.json>"))?;

    let config = ScanConfig::from_env()?;
    info!(
        "Starting athscan (interval {}, {} attempts per request)",
        config.interval, config.retry_attempts
    );

    let rows = load_rows(&path)?;
    let client = BirdeyeClient::new(&config)?;
    let runner = BatchRunner::new(client, config);

    let now = chrono::Utc::now().timestamp();
    let reports = runner.run(&rows, now).await;

    let output = serde_json::to_string_pretty(&report::render(&reports))
        .context("Failed to serialize report")?;
    println!("{}", output);

    Ok(())
}

/// Load and validate the input rows.
fn load_rows(path: &str) -> Result<NonEmpty<TokenRow>> {
    let content = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path))?;
    let rows: Vec<TokenRow> =
        serde_json::from_str(&content).with_context(|| format!("Failed to parse rows in {}", path))?;

    NonEmpty::from_vec(rows).ok_or_else(|| anyhow!("No rows found in {}", path))
}
