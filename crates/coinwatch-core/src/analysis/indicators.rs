//! Technical indicators: SMA, EMA, RSI, and a combined trend analysis.

use super::{AnalysisError, TechnicalAnalysis, Trend};
use super::volatility::{pct_changes, sample_stdev};
use serde::Serialize;

/// Minimum history for a full indicator analysis (bounded by the SMA window).
pub const MIN_ANALYSIS_POINTS: usize = 20;

const SMA_WINDOW: usize = 20;
const EMA_WINDOW: usize = 12;
const RSI_WINDOW: usize = 14;

/// Simple moving average over the trailing `window` prices.
pub fn sma(prices: &[f64], window: usize) -> Option<f64> {
    if window == 0 || prices.len() < window {
        return None;
    }
    let tail = &prices[prices.len() - window..];
    #[allow(clippy::cast_precision_loss)]
    Some(tail.iter().sum::<f64>() / window as f64)
}

/// Exponential moving average, seeded with the SMA of the first window.
pub fn ema(prices: &[f64], window: usize) -> Option<f64> {
    if window == 0 || prices.len() < window {
        return None;
    }
    #[allow(clippy::cast_precision_loss)]
    let alpha = 2.0 / (window as f64 + 1.0);
    #[allow(clippy::cast_precision_loss)]
    let mut value = prices[..window].iter().sum::<f64>() / window as f64;
    for price in &prices[window..] {
        value = alpha * price + (1.0 - alpha) * value;
    }
    Some(value)
}

/// Relative strength index over the trailing `window` changes.
///
/// 100 when there are no losses in the window, 0 when there are no gains.
pub fn rsi(prices: &[f64], window: usize) -> Option<f64> {
    if window == 0 || prices.len() < window + 1 {
        return None;
    }
    let tail = &prices[prices.len() - window - 1..];
    let mut gains = 0.0;
    let mut losses = 0.0;
    for pair in tail.windows(2) {
        let delta = pair[1] - pair[0];
        if delta >= 0.0 {
            gains += delta;
        } else {
            losses -= delta;
        }
    }
    if losses == 0.0 {
        return Some(100.0);
    }
    let rs = gains / losses;
    Some(100.0 - 100.0 / (1.0 + rs))
}

/// Indicator values feeding the combined analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Indicators {
    pub sma_20: f64,
    pub ema_12: f64,
    pub rsi_14: f64,
}

/// Run the combined technical analysis over an ascending price series.
///
/// Requires at least [`MIN_ANALYSIS_POINTS`] prices. Trend direction comes
/// from the last price vs the SMA, confirmed by RSI; strength is the
/// percent distance from the SMA scaled into 0-100.
pub fn analyze(prices: &[f64]) -> Result<TechnicalAnalysis, AnalysisError> {
    if prices.len() < MIN_ANALYSIS_POINTS {
        return Err(AnalysisError::InsufficientData {
            needed: MIN_ANALYSIS_POINTS,
            got: prices.len(),
        });
    }

    // Windows are satisfied once the MIN_ANALYSIS_POINTS gate passes.
    let sma_20 = sma(prices, SMA_WINDOW).ok_or(AnalysisError::InsufficientData {
        needed: SMA_WINDOW,
        got: prices.len(),
    })?;
    let ema_12 = ema(prices, EMA_WINDOW).ok_or(AnalysisError::InsufficientData {
        needed: EMA_WINDOW,
        got: prices.len(),
    })?;
    let rsi_14 = rsi(prices, RSI_WINDOW).ok_or(AnalysisError::InsufficientData {
        needed: RSI_WINDOW + 1,
        got: prices.len(),
    })?;

    let last = prices[prices.len() - 1];
    let distance_pct = if sma_20 > 0.0 {
        (last / sma_20 - 1.0) * 100.0
    } else {
        0.0
    };

    let overall_trend = if distance_pct > 0.25 && rsi_14 > 50.0 {
        Trend::Bullish
    } else if distance_pct < -0.25 && rsi_14 < 50.0 {
        Trend::Bearish
    } else {
        Trend::Neutral
    };

    // 1% above/below the SMA maps to strength 20; saturates at 100.
    let trend_strength = (distance_pct.abs() * 20.0).min(100.0);

    let volatility = sample_stdev(&pct_changes(prices)).unwrap_or(0.0);

    Ok(TechnicalAnalysis {
        overall_trend,
        trend_strength,
        volatility,
        indicators: Indicators { sma_20, ema_12, rsi_14 },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rising(n: usize) -> Vec<f64> {
        (0..n).map(|i| 100.0 + i as f64).collect()
    }

    fn falling(n: usize) -> Vec<f64> {
        (0..n).map(|i| 200.0 - i as f64).collect()
    }

    #[test]
    fn sma_of_trailing_window() {
        let prices = rising(25);
        // Last 20 of 100..125 are 105..124, mean 114.5
        assert!((sma(&prices, 20).unwrap() - 114.5).abs() < 1e-9);
        assert!(sma(&prices, 26).is_none());
        assert!(sma(&prices, 0).is_none());
    }

    #[test]
    fn ema_tracks_recent_prices_harder_than_sma() {
        let mut prices = vec![100.0; 30];
        prices.extend([110.0, 111.0, 112.0]);
        let e = ema(&prices, EMA_WINDOW).unwrap();
        let s = sma(&prices, SMA_WINDOW).unwrap();
        assert!(e > s);
    }

    #[test]
    fn rsi_saturates_on_one_sided_series() {
        assert!((rsi(&rising(20), RSI_WINDOW).unwrap() - 100.0).abs() < 1e-9);
        assert!(rsi(&falling(20), RSI_WINDOW).unwrap() < 1e-9);
        assert!(rsi(&rising(10), RSI_WINDOW).is_none());
    }

    #[test]
    fn analyze_rejects_short_series() {
        let err = analyze(&rising(10)).unwrap_err();
        assert_eq!(
            err,
            AnalysisError::InsufficientData { needed: 20, got: 10 }
        );
    }

    #[test]
    fn analyze_flags_uptrend() {
        let analysis = analyze(&rising(40)).unwrap();
        assert_eq!(analysis.overall_trend, Trend::Bullish);
        assert!(analysis.trend_strength > 0.0);
        assert!(analysis.trend_strength <= 100.0);
        assert!(analysis.indicators.rsi_14 > 50.0);
    }

    #[test]
    fn analyze_flags_downtrend() {
        let analysis = analyze(&falling(40)).unwrap();
        assert_eq!(analysis.overall_trend, Trend::Bearish);
        assert!(analysis.indicators.rsi_14 < 50.0);
    }

    #[test]
    fn analyze_flat_series_is_neutral_with_zero_volatility() {
        let analysis = analyze(&vec![42.0; 30]).unwrap();
        assert_eq!(analysis.overall_trend, Trend::Neutral);
        assert!(analysis.trend_strength.abs() < f64::EPSILON);
        assert!(analysis.volatility.abs() < f64::EPSILON);
    }
}
