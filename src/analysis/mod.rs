//! Analysis module - the pure price-series engine.
//!
//! Given a fully materialized price history and an [`AnalysisRequest`], the
//! engine locates the trigger price, the all-time highs before and after the
//! trigger and the trough on the way to the post-trigger high. Nothing here
//! performs I/O, logging or retries; those belong to the callers.
//!
//! [`AnalysisRequest`]: crate::types::AnalysisRequest

pub mod types;
pub mod error;
pub mod locator;
pub mod extremum;
pub mod format;
pub mod analyzer;

// Re-export main types
pub use types::{AnalysisResult, DurationBreakdown, PricePoint, Trough};
pub use error::AnalysisError;

// Re-export key components
pub use analyzer::PriceActionAnalyzer;
pub use extremum::{find_extremum, Extremum};
pub use format::{format_duration, format_market_cap, format_percent};
pub use locator::locate;
