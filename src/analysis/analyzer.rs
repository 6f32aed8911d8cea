//! Price-action analysis for a single (token, trigger) event.
//!
//! The analyzer anchors on the sample nearest to the trigger, then looks at
//! two windows: everything strictly before the trigger (for the earlier high)
//! and everything from the trigger on (for the later high and the trough on
//! the way to it).

use crate::analysis::error::AnalysisError;
use crate::analysis::extremum::{find_extremum, Extremum};
use crate::analysis::format::format_duration;
use crate::analysis::locator::locate;
use crate::analysis::types::{AnalysisResult, PricePoint, Trough};
use crate::types::{AnalysisRequest, TimeSeries};

/// Stateless engine computing an [`AnalysisResult`] from a price series.
#[derive(Debug, Default, Clone, Copy)]
pub struct PriceActionAnalyzer;

impl PriceActionAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Run the full analysis.
    ///
    /// Fails on an empty series or when no sample exists at or after the
    /// trigger. A missing pre-trigger high or a zero trigger price only
    /// blanks the dependent fields.
    pub fn analyze(
        &self,
        series: &TimeSeries,
        request: &AnalysisRequest,
    ) -> Result<AnalysisResult, AnalysisError> {
        let trigger = request.trigger_timestamp;
        let supply = request.token_supply;

        let trigger_sample = locate(series, trigger)?;

        let ath_before = find_extremum(series, |t| t < trigger, Extremum::Max);

        let ath_after = find_extremum(series, |t| t >= trigger, Extremum::Max)
            .ok_or(AnalysisError::InsufficientPostTriggerData { trigger })?;

        // Bounded by the high itself: drawdown on the way up, not the global low.
        let trough = find_extremum(
            series,
            |t| t >= trigger && t <= ath_after.timestamp,
            Extremum::Min,
        )
        .ok_or(AnalysisError::InsufficientPostTriggerData { trigger })?;

        let percent_increase_to_ath = percent_change(trigger_sample.price, ath_after.price);
        let percent_drop_to_trough = percent_change(trigger_sample.price, trough.price);

        let duration_trigger_to_ath = Some(format_duration(trigger, ath_after.timestamp)?);
        let duration_trigger_to_trough = Some(format_duration(trigger, trough.timestamp)?);
        let duration_ath_before_to_trigger = ath_before
            .map(|ath| format_duration(ath.timestamp, trigger))
            .transpose()?;

        Ok(AnalysisResult {
            trigger_sample,
            market_cap_at_trigger: trigger_sample.price * supply,
            ath_before_trigger: ath_before.map(|sample| PricePoint::from_sample(sample, supply)),
            ath_after_trigger: PricePoint::from_sample(ath_after, supply),
            trough_between_trigger_and_ath: Trough::from(trough),
            percent_increase_to_ath,
            percent_drop_to_trough,
            duration_trigger_to_ath,
            duration_trigger_to_trough,
            duration_ath_before_to_trigger,
        })
    }
}

/// `(to - from) / from * 100`, or `None` when that is not a finite number.
fn percent_change(from: f64, to: f64) -> Option<f64> {
    if from == 0.0 {
        return None;
    }
    let percent = (to - from) / from * 100.0;
    percent.is_finite().then_some(percent)
}
