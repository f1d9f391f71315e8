//! Market analysis: volatility, technical indicators, OHLC validation.

pub mod indicators;
pub mod ohlc;
pub mod volatility;

use serde::Serialize;
use thiserror::Error;

/// Errors from analysis routines.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    /// Not enough history to run the requested analysis.
    #[error("insufficient price data: need at least {needed} points, got {got}")]
    InsufficientData { needed: usize, got: usize },

    /// Too many raw candles failed validation to trust the series.
    #[error("OHLC series rejected: only {valid} of {total} candles validated")]
    BadOhlcSeries { valid: usize, total: usize },
}

/// Direction of a trend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Bullish,
    Bearish,
    Neutral,
}

/// A token's volatility relative to the broader tracked market.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RelativeVolatility {
    /// Stdev of the token's percent changes.
    pub token_volatility: f64,
    /// Mean stdev across qualifying reference tokens.
    pub market_volatility: f64,
    /// `token_volatility / market_volatility`.
    pub ratio: f64,
    /// How many reference tokens had enough history to qualify.
    pub references_used: usize,
}

impl RelativeVolatility {
    /// Classify the ratio against the market.
    pub fn comparison(&self) -> MarketComparison {
        match self.ratio {
            r if r < 0.5 => MarketComparison::MuchLessVolatile,
            r if r < 0.8 => MarketComparison::LessVolatile,
            r if r <= 1.2 => MarketComparison::SimilarToMarket,
            r if r <= 2.0 => MarketComparison::MoreVolatile,
            _ => MarketComparison::MuchMoreVolatile,
        }
    }
}

/// Bucketed comparison of a token's volatility against the market average.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MarketComparison {
    MuchLessVolatile,
    LessVolatile,
    SimilarToMarket,
    MoreVolatile,
    MuchMoreVolatile,
}

impl MarketComparison {
    pub const fn describe(self) -> &'static str {
        match self {
            Self::MuchLessVolatile => "much less volatile than the market",
            Self::LessVolatile => "less volatile than the market",
            Self::SimilarToMarket => "similar to the market",
            Self::MoreVolatile => "more volatile than the market",
            Self::MuchMoreVolatile => "much more volatile than the market",
        }
    }
}

/// Output of the technical-indicator analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TechnicalAnalysis {
    pub overall_trend: Trend,
    /// Confidence in the trend, 0-100.
    pub trend_strength: f64,
    /// Stdev of percent changes over the analyzed window.
    pub volatility: f64,
    pub indicators: indicators::Indicators,
}
