//! The provider seam: one trait all market-data sources implement.

use crate::error::ApiResult;
use async_trait::async_trait;
use coinwatch_core::{MarketSnapshot, OhlcCandle, PricePoint};
use serde::Serialize;
use std::fmt;

/// Operations the router can dispatch. Providers advertise the subset they
/// are good at; the router prefers a specialist and falls back to the rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// Quotes for many symbols in one call.
    BulkQuotes,
    /// Top-of-market listing.
    MarketOverview,
    /// Historical price series for one coin.
    HistoricalSeries,
    /// OHLC candles for one coin.
    Ohlc,
    /// 7-day sparkline for one coin.
    Sparkline,
}

impl Operation {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BulkQuotes => "bulk_quotes",
            Self::MarketOverview => "market_overview",
            Self::HistoricalSeries => "historical_series",
            Self::Ohlc => "ohlc",
            Self::Sparkline => "sparkline",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A market-data source.
///
/// Methods take ticker symbols; each implementation resolves them to its own
/// identifier scheme through the shared token map.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Short provider name used in status output and logs.
    fn name(&self) -> &'static str;

    /// Operations this provider is the preferred source for.
    fn specializations(&self) -> &'static [Operation];

    /// Current quotes for the given symbols.
    async fn market_snapshots(&self, symbols: &[String]) -> ApiResult<Vec<MarketSnapshot>>;

    /// Historical price series covering the trailing `hours`.
    async fn price_series(&self, symbol: &str, hours: i64) -> ApiResult<Vec<PricePoint>>;

    /// Validated OHLC candles over a day window.
    async fn ohlc(&self, symbol: &str, days: u32) -> ApiResult<Vec<OhlcCandle>>;

    /// 7-day sparkline prices.
    async fn sparkline(&self, symbol: &str) -> ApiResult<Vec<f64>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operation_names_are_stable() {
        assert_eq!(Operation::BulkQuotes.to_string(), "bulk_quotes");
        assert_eq!(Operation::Ohlc.to_string(), "ohlc");
        assert_eq!(Operation::HistoricalSeries.as_str(), "historical_series");
    }
}
