//! Domain types shared across the workspace.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A point-in-time market quote for a single token.
///
/// This is the normalized shape both providers are mapped into; field names
/// follow the stored `market_data` row rather than either wire format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    /// Upper-case ticker symbol, e.g. `BTC`.
    pub symbol: String,
    /// Last traded price in USD.
    pub price: f64,
    /// 24h price change in percent, if the provider reported one.
    pub price_change_24h: Option<f64>,
    /// 24h traded volume in USD.
    pub volume: Option<f64>,
    /// Market capitalization in USD.
    pub market_cap: Option<f64>,
    /// When the quote was taken.
    pub last_updated: DateTime<Utc>,
}

impl MarketSnapshot {
    /// Whether the snapshot carries a usable price.
    ///
    /// Zero and negative prices come from upstream glitches and must never
    /// reach display or analysis.
    pub fn has_valid_price(&self) -> bool {
        self.price.is_finite() && self.price > 0.0
    }
}

/// A single historical price observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub price: f64,
    pub timestamp: DateTime<Utc>,
}

/// One OHLC candle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OhlcCandle {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl OhlcCandle {
    /// Candle sanity check: all prices positive, high/low bracket open/close.
    pub fn is_valid(&self) -> bool {
        let prices = [self.open, self.high, self.low, self.close];
        prices.iter().all(|p| p.is_finite() && *p > 0.0)
            && self.high >= self.open.max(self.close)
            && self.low <= self.open.min(self.close)
    }
}

/// Analysis timeframe.
///
/// Each timeframe implies a history lookback window: intraday analysis reads
/// a day of history, daily analysis a week, weekly analysis a month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timeframe {
    /// "1h" - intraday.
    Hour,
    /// "24h" - daily.
    Day,
    /// "7d" - weekly.
    Week,
}

impl Timeframe {
    /// History window, in hours, used when analyzing this timeframe.
    pub const fn lookback_hours(self) -> i64 {
        match self {
            Self::Hour => 24,
            Self::Day => 7 * 24,
            Self::Week => 30 * 24,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hour => "1h",
            Self::Day => "24h",
            Self::Week => "7d",
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown timeframe string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown timeframe '{0}' (expected 1h, 24h, or 7d)")]
pub struct TimeframeParseError(pub String);

impl FromStr for Timeframe {
    type Err = TimeframeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "1h" | "hour" => Ok(Self::Hour),
            "24h" | "1d" | "day" => Ok(Self::Day),
            "7d" | "week" => Ok(Self::Week),
            other => Err(TimeframeParseError(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn snapshot(price: f64) -> MarketSnapshot {
        MarketSnapshot {
            symbol: "AAVE".to_string(),
            price,
            price_change_24h: Some(2.34),
            volume: Some(45_000_000.0),
            market_cap: None,
            last_updated: Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn zero_price_is_invalid() {
        assert!(snapshot(150.75).has_valid_price());
        assert!(!snapshot(0.0).has_valid_price());
        assert!(!snapshot(-1.0).has_valid_price());
        assert!(!snapshot(f64::NAN).has_valid_price());
    }

    #[test]
    fn candle_validation_brackets_open_close() {
        let ts = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
        let good = OhlcCandle {
            timestamp: ts,
            open: 100.0,
            high: 105.0,
            low: 98.0,
            close: 103.0,
        };
        assert!(good.is_valid());

        // High below close
        let bad = OhlcCandle { high: 102.0, ..good };
        assert!(!bad.is_valid());

        // Non-positive price
        let bad = OhlcCandle { low: 0.0, ..good };
        assert!(!bad.is_valid());
    }

    #[test]
    fn timeframe_round_trips() {
        for tf in [Timeframe::Hour, Timeframe::Day, Timeframe::Week] {
            assert_eq!(tf.as_str().parse::<Timeframe>().unwrap(), tf);
        }
        assert!("3m".parse::<Timeframe>().is_err());
    }

    #[test]
    fn timeframe_lookback_windows() {
        assert_eq!(Timeframe::Hour.lookback_hours(), 24);
        assert_eq!(Timeframe::Day.lookback_hours(), 168);
        assert_eq!(Timeframe::Week.lookback_hours(), 720);
    }
}
