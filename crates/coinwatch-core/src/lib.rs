//! Core domain types and market analysis for coinwatch.
//!
//! This crate is pure domain logic: no network, no database, no CLI.
//! Adapters (`coinwatch-api`, `coinwatch-db`, `coinwatch-cli`) depend on it,
//! never the other way around.

pub mod analysis;
pub mod extract;
pub mod mapping;
pub mod sparkline;
pub mod types;

// Re-export commonly used types for convenience
pub use analysis::{
    AnalysisError, MarketComparison, RelativeVolatility, TechnicalAnalysis, Trend,
    indicators::{Indicators, analyze, ema, rsi, sma},
    ohlc::{ALLOWED_OHLC_DAYS, clamp_ohlc_days, validate_candles},
    volatility::{pct_changes, relative_volatility, sample_stdev, volatility},
};
pub use extract::{extract_prices, extract_sparkline_prices};
pub use mapping::{CoverageReport, MatchKind, Resolved, TokenMap};
pub use sparkline::{Sparkline, SparklineTrend};
pub use types::{MarketSnapshot, OhlcCandle, PricePoint, Timeframe, TimeframeParseError};
