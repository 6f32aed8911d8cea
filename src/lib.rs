//! athscan - retrospective price-action analyzer for token trigger events
//!
//! Given a token and a trigger time, this crate fetches the token's price
//! history and derives market cap at the trigger, the all-time highs before
//! and after it, the drawdown on the way to the later high, and the time
//! taken to reach each of them.

pub mod types;
pub mod analysis;
pub mod trigger_time;
pub mod config;
pub mod sources;
pub mod batch;
pub mod report;

// Re-export main types for convenience
pub use types::{AnalysisRequest, PriceSample, TimeSeries, TokenRow};
pub use analysis::{AnalysisError, AnalysisResult, PriceActionAnalyzer};
pub use config::{ScanConfig, ScanConfigBuilder};
