//! Result types produced by the analysis engine.

use crate::types::PriceSample;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const SECONDS_PER_MINUTE: i64 = 60;
pub const SECONDS_PER_HOUR: i64 = 3_600;
pub const SECONDS_PER_DAY: i64 = 86_400;

/// An extremum of the series together with its market cap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub price: f64,
    pub market_cap: f64,
    pub timestamp: i64,
}

impl PricePoint {
    pub fn from_sample(sample: PriceSample, supply: f64) -> Self {
        Self {
            price: sample.price,
            market_cap: sample.price * supply,
            timestamp: sample.timestamp,
        }
    }
}

/// Lowest price between the trigger and the post-trigger high.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Trough {
    pub price: f64,
    pub timestamp: i64,
}

impl From<PriceSample> for Trough {
    fn from(sample: PriceSample) -> Self {
        Self {
            price: sample.price,
            timestamp: sample.timestamp,
        }
    }
}

/// Elapsed time split into days, hours and minutes.
///
/// The leftover seconds are kept so the total can be rebuilt exactly; the
/// display form drops them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationBreakdown {
    pub days: i64,
    /// 0-23
    pub hours: i64,
    /// 0-59
    pub minutes: i64,
    /// 0-59
    pub seconds: i64,
}

impl DurationBreakdown {
    pub fn total_seconds(&self) -> i64 {
        self.days * SECONDS_PER_DAY
            + self.hours * SECONDS_PER_HOUR
            + self.minutes * SECONDS_PER_MINUTE
            + self.seconds
    }
}

impl fmt::Display for DurationBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d {}h {}m", self.days, self.hours, self.minutes)
    }
}

/// Complete output of one analysis call.
///
/// `None` fields mean "not applicable for this series", never "failed":
/// failures are reported through [`AnalysisError`](super::AnalysisError).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Sample nearest to the trigger timestamp
    pub trigger_sample: PriceSample,
    pub market_cap_at_trigger: f64,
    /// Highest sample strictly before the trigger
    pub ath_before_trigger: Option<PricePoint>,
    /// Highest sample at or after the trigger
    pub ath_after_trigger: PricePoint,
    pub trough_between_trigger_and_ath: Trough,
    /// Unrounded; see [`format_percent`](super::format_percent)
    pub percent_increase_to_ath: Option<f64>,
    /// Unrounded, negative when the price fell
    pub percent_drop_to_trough: Option<f64>,
    pub duration_trigger_to_ath: Option<DurationBreakdown>,
    pub duration_trigger_to_trough: Option<DurationBreakdown>,
    pub duration_ath_before_to_trigger: Option<DurationBreakdown>,
}
