//! Wire types for the provider APIs.
//!
//! Only the fields we consume are modeled; both providers attach dozens more.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::HashMap;

// ============================================================================
// CoinGecko
// ============================================================================

/// One row of `/coins/markets`.
#[derive(Debug, Clone, Deserialize)]
pub struct GeckoMarketRow {
    pub id: String,
    pub symbol: String,
    pub current_price: Option<f64>,
    pub market_cap: Option<f64>,
    pub total_volume: Option<f64>,
    pub price_change_percentage_24h: Option<f64>,
    pub last_updated: Option<DateTime<Utc>>,
    pub sparkline_in_7d: Option<GeckoSparkline>,
}

/// Nested sparkline payload on a markets row.
#[derive(Debug, Clone, Deserialize)]
pub struct GeckoSparkline {
    pub price: Vec<f64>,
}

/// `/coins/{id}/market_chart` response. Pairs are `[epoch_ms, value]`.
#[derive(Debug, Clone, Deserialize)]
pub struct GeckoMarketChart {
    pub prices: Vec<[f64; 2]>,
}

// ============================================================================
// CoinMarketCap
// ============================================================================

/// `/v1/cryptocurrency/quotes/latest` response.
#[derive(Debug, Clone, Deserialize)]
pub struct CmcQuotesResponse {
    pub status: CmcStatus,
    #[serde(default)]
    pub data: HashMap<String, CmcCoin>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CmcStatus {
    pub error_code: i64,
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CmcCoin {
    pub symbol: String,
    pub quote: HashMap<String, CmcQuote>,
}

/// The per-currency quote block (`quote.USD` in practice).
#[derive(Debug, Clone, Deserialize)]
pub struct CmcQuote {
    pub price: Option<f64>,
    pub volume_24h: Option<f64>,
    pub market_cap: Option<f64>,
    pub percent_change_24h: Option<f64>,
    pub last_updated: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn gecko_market_row_parses_with_sparkline() {
        let row: GeckoMarketRow = serde_json::from_value(json!({
            "id": "uniswap",
            "symbol": "uni",
            "current_price": 6.12,
            "market_cap": 4_600_000_000.0_f64,
            "total_volume": 120_000_000.0_f64,
            "price_change_percentage_24h": -1.8,
            "last_updated": "2025-06-01T12:00:00Z",
            "sparkline_in_7d": {"price": [6.0, 6.05, 6.12]}
        }))
        .unwrap();
        assert_eq!(row.id, "uniswap");
        assert_eq!(row.sparkline_in_7d.unwrap().price.len(), 3);
    }

    #[test]
    fn gecko_market_row_tolerates_missing_fields() {
        let row: GeckoMarketRow =
            serde_json::from_value(json!({"id": "bitcoin", "symbol": "btc"})).unwrap();
        assert!(row.current_price.is_none());
        assert!(row.sparkline_in_7d.is_none());
    }

    #[test]
    fn cmc_quotes_response_parses_nested_quote() {
        let resp: CmcQuotesResponse = serde_json::from_value(json!({
            "status": {"error_code": 0, "error_message": null},
            "data": {
                "BTC": {
                    "symbol": "BTC",
                    "quote": {"USD": {
                        "price": 97_000.5,
                        "volume_24h": 30_000_000_000.0_f64,
                        "market_cap": 1_900_000_000_000.0_f64,
                        "percent_change_24h": 1.2,
                        "last_updated": "2025-06-01T12:00:00Z"
                    }}
                }
            }
        }))
        .unwrap();
        assert_eq!(resp.status.error_code, 0);
        let quote = &resp.data["BTC"].quote["USD"];
        assert!((quote.price.unwrap() - 97_000.5).abs() < f64::EPSILON);
    }

    #[test]
    fn market_chart_pairs_parse() {
        let chart: GeckoMarketChart = serde_json::from_value(json!({
            "prices": [[1_700_000_000_000.0_f64, 100.0], [1_700_000_060_000.0_f64, 101.5]]
        }))
        .unwrap();
        assert_eq!(chart.prices.len(), 2);
        assert!((chart.prices[1][1] - 101.5).abs() < f64::EPSILON);
    }
}
