//! CoinGecko client.
//!
//! CoinGecko is the detail provider: per-coin history, OHLC candles, and
//! sparklines, addressed by slug-like coin IDs (`bitcoin`, `official-trump`).

use crate::cache::ResponseCache;
use crate::config::ProviderConfig;
use crate::error::{ApiError, ApiResult};
use crate::http::HttpBackend;
use crate::models::{GeckoMarketChart, GeckoMarketRow};
use crate::provider::{MarketDataProvider, Operation};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use coinwatch_core::{
    MarketSnapshot, OhlcCandle, PricePoint, TokenMap, clamp_ohlc_days, extract_sparkline_prices,
    validate_candles,
};
use serde_json::Value;
use url::Url;

const SPECIALIZATIONS: &[Operation] = &[
    Operation::HistoricalSeries,
    Operation::Ohlc,
    Operation::Sparkline,
    Operation::MarketOverview,
];

/// CoinGecko API client, generic over the HTTP backend.
pub struct CoinGeckoClient<B: HttpBackend> {
    backend: B,
    base_url: String,
    cache: ResponseCache,
    map: TokenMap,
}

impl<B: HttpBackend> CoinGeckoClient<B> {
    pub fn new(backend: B, config: &ProviderConfig, map: TokenMap) -> Self {
        Self {
            backend,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            cache: ResponseCache::new(config.cache_ttl),
            map,
        }
    }

    fn endpoint(&self, path: &str, params: &[(&str, &str)]) -> ApiResult<Url> {
        let mut url = Url::parse(&format!("{}/{path}", self.base_url))?;
        url.query_pairs_mut().extend_pairs(params);
        Ok(url)
    }

    /// Fetch through the response cache.
    async fn get_with_cache(&self, url: &Url) -> ApiResult<Value> {
        if let Some(cached) = self.cache.get(url.as_str()) {
            tracing::debug!(url = %url, "cache hit");
            return Ok(cached);
        }
        let value: Value = self.backend.get_json(url).await?;
        self.cache.put(url.as_str(), value.clone());
        Ok(value)
    }

    fn resolve(&self, token: &str) -> ApiResult<String> {
        self.map
            .to_coingecko_id(token)
            .ok_or_else(|| ApiError::UnknownToken {
                token: token.to_string(),
            })
    }

    /// Raw `/coins/markets` rows for a set of coin IDs.
    async fn markets(&self, ids: &[String], sparkline: bool) -> ApiResult<Value> {
        let joined = ids.join(",");
        let url = self.endpoint(
            "coins/markets",
            &[
                ("vs_currency", "usd"),
                ("ids", &joined),
                ("sparkline", if sparkline { "true" } else { "false" }),
                ("price_change_percentage", "24h"),
            ],
        )?;
        self.get_with_cache(&url).await
    }

    fn row_to_snapshot(&self, row: &GeckoMarketRow) -> Option<MarketSnapshot> {
        let price = row.current_price?;
        if !(price.is_finite() && price > 0.0) {
            tracing::warn!(coin = %row.id, price, "dropping row with unusable price");
            return None;
        }
        let symbol = self
            .map
            .from_coingecko_id(&row.id)
            .unwrap_or_else(|| row.symbol.to_uppercase());
        Some(MarketSnapshot {
            symbol,
            price,
            price_change_24h: row.price_change_percentage_24h,
            volume: row.total_volume,
            market_cap: row.market_cap,
            last_updated: row.last_updated.unwrap_or_else(Utc::now),
        })
    }
}

#[async_trait]
impl<B: HttpBackend> MarketDataProvider for CoinGeckoClient<B> {
    fn name(&self) -> &'static str {
        "coingecko"
    }

    fn specializations(&self) -> &'static [Operation] {
        SPECIALIZATIONS
    }

    async fn market_snapshots(&self, symbols: &[String]) -> ApiResult<Vec<MarketSnapshot>> {
        let mut ids = Vec::with_capacity(symbols.len());
        for symbol in symbols {
            match self.map.to_coingecko_id(symbol) {
                Some(id) => ids.push(id),
                None => tracing::warn!(token = %symbol, "no CoinGecko mapping, skipping"),
            }
        }
        if ids.is_empty() {
            return Err(ApiError::UnknownToken {
                token: symbols.join(","),
            });
        }

        let payload = self.markets(&ids, false).await?;
        let rows: Vec<GeckoMarketRow> = serde_json::from_value(payload)?;
        Ok(rows
            .iter()
            .filter_map(|row| self.row_to_snapshot(row))
            .collect())
    }

    async fn price_series(&self, symbol: &str, hours: i64) -> ApiResult<Vec<PricePoint>> {
        let id = self.resolve(symbol)?;
        // Round hours up to whole days, never below one
        let days = ((hours + 23) / 24).max(1).to_string();
        let url = self.endpoint(
            &format!("coins/{id}/market_chart"),
            &[("vs_currency", "usd"), ("days", &days)],
        )?;
        let payload = self.get_with_cache(&url).await?;
        let chart: GeckoMarketChart = serde_json::from_value(payload)?;

        let mut points = Vec::with_capacity(chart.prices.len());
        for [millis, price] in chart.prices {
            if !(price.is_finite() && price > 0.0) {
                continue;
            }
            #[allow(clippy::cast_possible_truncation)]
            let Some(timestamp) = DateTime::<Utc>::from_timestamp_millis(millis as i64) else {
                continue;
            };
            points.push(PricePoint { price, timestamp });
        }
        Ok(points)
    }

    async fn ohlc(&self, symbol: &str, days: u32) -> ApiResult<Vec<OhlcCandle>> {
        let id = self.resolve(symbol)?;
        let days = clamp_ohlc_days(days).to_string();
        let url = self.endpoint(
            &format!("coins/{id}/ohlc"),
            &[("vs_currency", "usd"), ("days", &days)],
        )?;
        let payload = self.get_with_cache(&url).await?;
        let raw: Vec<Vec<f64>> = serde_json::from_value(payload)?;
        Ok(validate_candles(&raw)?)
    }

    async fn sparkline(&self, symbol: &str) -> ApiResult<Vec<f64>> {
        let id = self.resolve(symbol)?;
        let payload = self.markets(&[id.clone()], true).await?;
        let row = payload
            .as_array()
            .and_then(|rows| rows.first())
            .ok_or(ApiError::CoinNotFound {
                provider: "coingecko",
                coin_id: id,
            })?;
        Ok(extract_sparkline_prices(row))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::testing::FakeBackend;
    use serde_json::json;

    fn client(backend: FakeBackend) -> CoinGeckoClient<FakeBackend> {
        let config = ProviderConfig::coingecko().with_base_url("https://fake.test/api/v3");
        CoinGeckoClient::new(backend, &config, TokenMap::new())
    }

    fn markets_row() -> Value {
        json!({
            "id": "bitcoin",
            "symbol": "btc",
            "current_price": 97_000.5,
            "market_cap": 1_900_000_000_000.0_f64,
            "total_volume": 30_000_000_000.0_f64,
            "price_change_percentage_24h": 1.2,
            "last_updated": "2025-06-01T12:00:00Z"
        })
    }

    #[tokio::test]
    async fn snapshots_map_rows_to_canonical_symbols() {
        let backend = FakeBackend::new().with_response("coins/markets", json!([markets_row()]));
        let client = client(backend);

        let snaps = client
            .market_snapshots(&["BTC".to_string()])
            .await
            .unwrap();
        assert_eq!(snaps.len(), 1);
        assert_eq!(snaps[0].symbol, "BTC");
        assert!((snaps[0].price - 97_000.5).abs() < f64::EPSILON);
        assert!(snaps[0].has_valid_price());
    }

    #[tokio::test]
    async fn snapshots_drop_zero_price_rows() {
        let mut bad = markets_row();
        bad["current_price"] = json!(0.0);
        let backend =
            FakeBackend::new().with_response("coins/markets", json!([markets_row(), bad]));
        let client = client(backend);

        let snaps = client
            .market_snapshots(&["BTC".to_string()])
            .await
            .unwrap();
        assert_eq!(snaps.len(), 1);
    }

    #[tokio::test]
    async fn snapshots_fail_when_nothing_resolves() {
        let client = client(FakeBackend::new());
        let err = client
            .market_snapshots(&["NOPE".to_string()])
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::UnknownToken { .. }));
    }

    #[tokio::test]
    async fn price_series_parses_chart_pairs() {
        let backend = FakeBackend::new().with_response(
            "coins/ethereum/market_chart",
            json!({"prices": [
                [1_700_000_000_000.0_f64, 2000.0],
                [1_700_000_060_000.0_f64, 0.0],
                [1_700_000_120_000.0_f64, 2010.0]
            ]}),
        );
        let client = client(backend);

        let points = client.price_series("ETH", 24).await.unwrap();
        assert_eq!(points.len(), 2);
        assert!((points[1].price - 2010.0).abs() < f64::EPSILON);
        assert!(client.backend.requested_urls()[0].contains("days=1"));
    }

    #[tokio::test]
    async fn price_series_rounds_hours_up_to_days() {
        let backend = FakeBackend::new()
            .with_response("coins/ethereum/market_chart", json!({"prices": []}));
        let client = client(backend);

        client.price_series("ETH", 25).await.unwrap();
        client.price_series("ETH", 168).await.unwrap();
        client.price_series("ETH", 0).await.unwrap();

        let urls = client.backend.requested_urls();
        assert!(urls[0].contains("days=2"));
        assert!(urls[1].contains("days=7"));
        assert!(urls[2].contains("days=1"));
    }

    #[tokio::test]
    async fn ohlc_validates_and_clamps_days() {
        let backend = FakeBackend::new().with_response(
            "coins/bitcoin/ohlc",
            json!([[1_700_000_000_000.0_f64, 100.0, 105.0, 98.0, 103.0]]),
        );
        let client = client(backend);

        // 3 is not an allowed window; the request goes out clamped to 1
        let candles = client.ohlc("BTC", 3).await.unwrap();
        assert_eq!(candles.len(), 1);
        let urls = client.backend.requested_urls();
        assert!(urls[0].contains("days=1"));
    }

    #[tokio::test]
    async fn sparkline_extracts_nested_prices() {
        let mut row = markets_row();
        row["id"] = json!("uniswap");
        row["sparkline_in_7d"] = json!({"price": [6.0, 6.05, 6.12]});
        let backend = FakeBackend::new().with_response("coins/markets", json!([row]));
        let client = client(backend);

        let prices = client.sparkline("UNI").await.unwrap();
        assert_eq!(prices, vec![6.0, 6.05, 6.12]);
        assert!(client.backend.requested_urls()[0].contains("sparkline=true"));
    }

    #[tokio::test]
    async fn second_identical_request_hits_the_cache() {
        let backend = FakeBackend::new().with_response("coins/markets", json!([markets_row()]));
        let client = client(backend);

        client.market_snapshots(&["BTC".to_string()]).await.unwrap();
        client.market_snapshots(&["BTC".to_string()]).await.unwrap();
        assert_eq!(client.backend.requested_urls().len(), 1);
    }
}
