//! OHLC candle validation.
//!
//! Raw candle arrays arrive as `[timestamp_ms, open, high, low, close]`.
//! Individual bad candles are dropped; the series as a whole is rejected
//! when fewer than 80% of its candles survive, since a mostly-broken series
//! says more about the upstream response than about the market.

use super::AnalysisError;
use crate::types::OhlcCandle;
use chrono::{DateTime, Utc};

/// Day windows the OHLC endpoint accepts.
pub const ALLOWED_OHLC_DAYS: [u32; 7] = [1, 7, 14, 30, 90, 180, 365];

/// Fraction of candles that must validate for the series to be accepted.
const MIN_VALID_FRACTION: f64 = 0.8;

/// Clamp a requested day window to a supported value (unsupported -> 1).
pub fn clamp_ohlc_days(days: u32) -> u32 {
    if ALLOWED_OHLC_DAYS.contains(&days) { days } else { 1 }
}

/// Validate a raw candle series.
///
/// Each raw entry must have five elements; entries failing the candle sanity
/// check ([`OhlcCandle::is_valid`]) are dropped. Errors when the surviving
/// fraction falls below 80%.
pub fn validate_candles(raw: &[Vec<f64>]) -> Result<Vec<OhlcCandle>, AnalysisError> {
    let mut candles = Vec::with_capacity(raw.len());
    for entry in raw {
        if entry.len() != 5 {
            continue;
        }
        #[allow(clippy::cast_possible_truncation)]
        let millis = entry[0] as i64;
        let Some(timestamp) = DateTime::<Utc>::from_timestamp_millis(millis) else {
            continue;
        };
        let candle = OhlcCandle {
            timestamp,
            open: entry[1],
            high: entry[2],
            low: entry[3],
            close: entry[4],
        };
        if candle.is_valid() {
            candles.push(candle);
        }
    }

    #[allow(clippy::cast_precision_loss)]
    if !raw.is_empty() && (candles.len() as f64) < (raw.len() as f64) * MIN_VALID_FRACTION {
        return Err(AnalysisError::BadOhlcSeries {
            valid: candles.len(),
            total: raw.len(),
        });
    }
    Ok(candles)
}
