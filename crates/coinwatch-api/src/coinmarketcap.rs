//! CoinMarketCap client.
//!
//! CoinMarketCap is the bulk provider: one `quotes/latest` call covers every
//! tracked symbol. Historical series and OHLC live behind paid tiers, so the
//! client reports them unsupported and the router falls through to CoinGecko.

use crate::cache::ResponseCache;
use crate::config::ProviderConfig;
use crate::error::{ApiError, ApiResult};
use crate::http::HttpBackend;
use crate::models::CmcQuotesResponse;
use crate::provider::{MarketDataProvider, Operation};
use async_trait::async_trait;
use chrono::Utc;
use coinwatch_core::{MarketSnapshot, OhlcCandle, PricePoint};
use serde_json::Value;
use url::Url;

const SPECIALIZATIONS: &[Operation] = &[Operation::BulkQuotes, Operation::MarketOverview];

const QUOTE_CURRENCY: &str = "USD";

/// CoinMarketCap API client, generic over the HTTP backend.
pub struct CoinMarketCapClient<B: HttpBackend> {
    backend: B,
    base_url: String,
    cache: ResponseCache,
}

impl<B: HttpBackend> CoinMarketCapClient<B> {
    pub fn new(backend: B, config: &ProviderConfig) -> Self {
        Self {
            backend,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            cache: ResponseCache::new(config.cache_ttl),
        }
    }

    async fn get_with_cache(&self, url: &Url) -> ApiResult<Value> {
        if let Some(cached) = self.cache.get(url.as_str()) {
            tracing::debug!(url = %url, "cache hit");
            return Ok(cached);
        }
        let value: Value = self.backend.get_json(url).await?;
        self.cache.put(url.as_str(), value.clone());
        Ok(value)
    }
}

#[async_trait]
impl<B: HttpBackend> MarketDataProvider for CoinMarketCapClient<B> {
    fn name(&self) -> &'static str {
        "coinmarketcap"
    }

    fn specializations(&self) -> &'static [Operation] {
        SPECIALIZATIONS
    }

    async fn market_snapshots(&self, symbols: &[String]) -> ApiResult<Vec<MarketSnapshot>> {
        let joined = symbols
            .iter()
            .map(|s| s.to_uppercase())
            .collect::<Vec<_>>()
            .join(",");
        let mut url = Url::parse(&format!(
            "{}/v1/cryptocurrency/quotes/latest",
            self.base_url
        ))?;
        url.query_pairs_mut()
            .append_pair("symbol", &joined)
            .append_pair("convert", QUOTE_CURRENCY);

        let payload = self.get_with_cache(&url).await?;
        let response: CmcQuotesResponse = serde_json::from_value(payload)?;

        if response.status.error_code != 0 {
            return Err(ApiError::InvalidResponse {
                message: response
                    .status
                    .error_message
                    .unwrap_or_else(|| format!("error code {}", response.status.error_code)),
            });
        }

        let mut snapshots = Vec::with_capacity(response.data.len());
        for coin in response.data.values() {
            let Some(quote) = coin.quote.get(QUOTE_CURRENCY) else {
                tracing::warn!(symbol = %coin.symbol, "quote currency missing, skipping");
                continue;
            };
            let Some(price) = quote.price.filter(|p| p.is_finite() && *p > 0.0) else {
                tracing::warn!(symbol = %coin.symbol, "dropping quote with unusable price");
                continue;
            };
            snapshots.push(MarketSnapshot {
                symbol: coin.symbol.to_uppercase(),
                price,
                price_change_24h: quote.percent_change_24h,
                volume: quote.volume_24h,
                market_cap: quote.market_cap,
                last_updated: quote.last_updated.unwrap_or_else(Utc::now),
            });
        }
        Ok(snapshots)
    }

    async fn price_series(&self, _symbol: &str, _hours: i64) -> ApiResult<Vec<PricePoint>> {
        Err(ApiError::Unsupported {
            provider: self.name(),
            operation: "historical_series",
        })
    }

    async fn ohlc(&self, _symbol: &str, _days: u32) -> ApiResult<Vec<OhlcCandle>> {
        Err(ApiError::Unsupported {
            provider: self.name(),
            operation: "ohlc",
        })
    }

    async fn sparkline(&self, _symbol: &str) -> ApiResult<Vec<f64>> {
        Err(ApiError::Unsupported {
            provider: self.name(),
            operation: "sparkline",
        })
    }
}
