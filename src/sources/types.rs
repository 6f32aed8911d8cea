//! Types shared by market data providers, including the Birdeye payloads.

use crate::types::{PriceSample, TimeSeries};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Sampling interval of a price history request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SampleInterval {
    OneMinute,
    ThreeMinutes,
    FiveMinutes,
    FifteenMinutes,
    ThirtyMinutes,
    OneHour,
    TwoHours,
    FourHours,
    SixHours,
    EightHours,
    TwelveHours,
    OneDay,
    ThreeDays,
    OneWeek,
    OneMonth,
}

impl SampleInterval {
    /// Returns the wire representation used by the `type` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            SampleInterval::OneMinute => "1m",
            SampleInterval::ThreeMinutes => "3m",
            SampleInterval::FiveMinutes => "5m",
            SampleInterval::FifteenMinutes => "15m",
            SampleInterval::ThirtyMinutes => "30m",
            SampleInterval::OneHour => "1H",
            SampleInterval::TwoHours => "2H",
            SampleInterval::FourHours => "4H",
            SampleInterval::SixHours => "6H",
            SampleInterval::EightHours => "8H",
            SampleInterval::TwelveHours => "12H",
            SampleInterval::OneDay => "1D",
            SampleInterval::ThreeDays => "3D",
            SampleInterval::OneWeek => "1W",
            SampleInterval::OneMonth => "1M",
        }
    }

    /// Returns all supported intervals.
    pub fn all() -> Vec<SampleInterval> {
        vec![
            SampleInterval::OneMinute,
            SampleInterval::ThreeMinutes,
            SampleInterval::FiveMinutes,
            SampleInterval::FifteenMinutes,
            SampleInterval::ThirtyMinutes,
            SampleInterval::OneHour,
            SampleInterval::TwoHours,
            SampleInterval::FourHours,
            SampleInterval::SixHours,
            SampleInterval::EightHours,
            SampleInterval::TwelveHours,
            SampleInterval::OneDay,
            SampleInterval::ThreeDays,
            SampleInterval::OneWeek,
            SampleInterval::OneMonth,
        ]
    }
}

impl fmt::Display for SampleInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown sample interval '{0}'")]
pub struct UnknownInterval(pub String);

impl FromStr for SampleInterval {
    type Err = UnknownInterval;

    // Case matters: "1m" is a minute, "1M" a month.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SampleInterval::all()
            .into_iter()
            .find(|interval| interval.as_str() == s)
            .ok_or_else(|| UnknownInterval(s.to_string()))
    }
}

impl TryFrom<String> for SampleInterval {
    type Error = UnknownInterval;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SampleInterval> for String {
    fn from(interval: SampleInterval) -> Self {
        interval.as_str().to_string()
    }
}

// --- Birdeye public API payloads ---

/// Common `{ "success": .., "data": .. }` envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(default)]
    pub success: bool,
    pub data: Option<T>,
}

/// `GET /defi/history_price`
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryPriceData {
    #[serde(default)]
    pub items: Vec<HistoryPriceItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HistoryPriceItem {
    #[serde(rename = "unixTime")]
    pub unix_time: i64,
    pub value: f64,
}

impl From<HistoryPriceData> for TimeSeries {
    fn from(data: HistoryPriceData) -> Self {
        data.items
            .into_iter()
            .map(|item| PriceSample::new(item.unix_time, item.value))
            .collect()
    }
}

/// `GET /defi/v3/token/market-data`
#[derive(Debug, Clone, Deserialize)]
pub struct MarketData {
    pub total_supply: Option<f64>,
    pub circulating_supply: Option<f64>,
    pub price: Option<f64>,
}

/// `GET /defi/v3/token/meta-data/single`
#[derive(Debug, Clone, Deserialize)]
pub struct TokenMetaData {
    pub symbol: Option<String>,
    pub name: Option<String>,
    pub decimals: Option<u8>,
}

/// `GET /defi/token_creation_info`
#[derive(Debug, Clone, Deserialize)]
pub struct TokenCreationInfo {
    #[serde(rename = "blockUnixTime")]
    pub block_unix_time: Option<i64>,
    #[serde(rename = "txHash")]
    pub tx_hash: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_round_trip_names() {
        for interval in SampleInterval::all() {
            assert_eq!(interval.as_str().parse::<SampleInterval>().unwrap(), interval);
        }
        assert_eq!("1M".parse::<SampleInterval>().unwrap(), SampleInterval::OneMonth);
        assert_eq!("1m".parse::<SampleInterval>().unwrap(), SampleInterval::OneMinute);
        assert!("2m".parse::<SampleInterval>().is_err());
    }

    #[test]
    fn test_interval_serde() {
        let json = serde_json::to_string(&SampleInterval::FifteenMinutes).unwrap();
        assert_eq!(json, r#""15m""#);
        let parsed: SampleInterval = serde_json::from_str(r#""4H""#).unwrap();
        assert_eq!(parsed, SampleInterval::FourHours);
    }

    #[test]
    fn test_history_price_payload() {
        let body = r#"{
            "success": true,
            "data": {
                "items": [
                    {"address": "Mint111", "unixTime": 1700000000, "value": 0.0012},
                    {"address": "Mint111", "unixTime": 1700000060, "value": 0.0015}
                ]
            }
        }"#;
        let response: ApiResponse<HistoryPriceData> = serde_json::from_str(body).unwrap();
        assert!(response.success);
        let series = TimeSeries::from(response.data.unwrap());
        assert_eq!(series.len(), 2);
        assert_eq!(series.samples()[1], PriceSample::new(1_700_000_060, 0.0015));
    }

    #[test]
    fn test_market_and_meta_payloads() {
        let market: ApiResponse<MarketData> = serde_json::from_str(
            r#"{"success": true, "data": {"address": "Mint111", "price": 0.5, "total_supply": 1000000000.0, "circulating_supply": 999000000}}"#,
        )
        .unwrap();
        assert_eq!(market.data.unwrap().total_supply, Some(1_000_000_000.0));

        let meta: ApiResponse<TokenMetaData> = serde_json::from_str(
            r#"{"success": true, "data": {"address": "Mint111", "symbol": "WIF", "name": "dogwifhat", "decimals": 6}}"#,
        )
        .unwrap();
        assert_eq!(meta.data.unwrap().symbol.as_deref(), Some("WIF"));

        let creation: ApiResponse<TokenCreationInfo> =
            serde_json::from_str(r#"{"success": true, "data": null}"#).unwrap();
        assert!(creation.data.is_none());
    }
}
