//! Rendering of batch results into flat output rows.
//!
//! This is the only place where absent values turn into `"N/A"`; everything
//! upstream keeps them as `Option`.

use crate::analysis::{format_market_cap, format_percent, DurationBreakdown};
use crate::batch::RowReport;
use chrono::DateTime;
use serde::Serialize;

pub const NOT_AVAILABLE: &str = "N/A";

/// One output row, one column per metric.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub token: String,
    pub symbol: String,
    /// Trigger time as RFC 3339 (UTC)
    pub trigger: String,
    pub market_cap_at_trigger: String,
    pub ath_market_cap: String,
    pub percent_increase_to_ath: String,
    pub time_to_ath: String,
    pub percent_drop_to_trough: String,
    pub time_to_trough: String,
    pub ath_before_trigger_market_cap: String,
    pub time_since_ath_before_trigger: String,
    pub status: String,
}

impl From<&RowReport> for ReportRow {
    fn from(report: &RowReport) -> Self {
        let result = report.result.as_ref();

        Self {
            token: report.row.token.clone(),
            symbol: report.symbol.clone().unwrap_or_else(na),
            trigger: report
                .trigger_timestamp
                .and_then(|ts| DateTime::from_timestamp(ts, 0))
                .map(|dt| dt.to_rfc3339())
                .unwrap_or_else(|| report.row.trigger.clone()),
            market_cap_at_trigger: or_na(result.map(|r| format_market_cap(r.market_cap_at_trigger))),
            ath_market_cap: or_na(result.map(|r| format_market_cap(r.ath_after_trigger.market_cap))),
            percent_increase_to_ath: or_na(
                result.and_then(|r| r.percent_increase_to_ath).map(format_percent),
            ),
            time_to_ath: duration_cell(result.and_then(|r| r.duration_trigger_to_ath)),
            percent_drop_to_trough: or_na(
                result.and_then(|r| r.percent_drop_to_trough).map(format_percent),
            ),
            time_to_trough: duration_cell(result.and_then(|r| r.duration_trigger_to_trough)),
            ath_before_trigger_market_cap: or_na(
                result
                    .and_then(|r| r.ath_before_trigger)
                    .map(|ath| format_market_cap(ath.market_cap)),
            ),
            time_since_ath_before_trigger: duration_cell(
                result.and_then(|r| r.duration_ath_before_to_trigger),
            ),
            status: report.status.to_string(),
        }
    }
}

fn na() -> String {
    NOT_AVAILABLE.to_string()
}

fn or_na(value: Option<String>) -> String {
    value.unwrap_or_else(na)
}

fn duration_cell(duration: Option<DurationBreakdown>) -> String {
    or_na(duration.map(|d| d.to_string()))
}

/// Render every report in order.
pub fn render(reports: &[RowReport]) -> Vec<ReportRow> {
    reports.iter().map(ReportRow::from).collect()
}
