//! Per-provider configuration.

use std::time::Duration;

/// Default response-cache lifetime, matching the upstream handlers.
const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(60);

/// Configuration for a single provider client.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// API base URL, without a trailing slash.
    pub base_url: String,
    /// Optional API key sent with every request.
    pub api_key: Option<String>,
    /// Header name the provider expects the key under.
    pub api_key_header: &'static str,
    /// Maximum retry attempts for transient errors.
    pub max_retries: u8,
    /// Base delay for exponential backoff.
    pub retry_base_delay_ms: u64,
    /// How long cached responses stay fresh.
    pub cache_ttl: Duration,
}

impl ProviderConfig {
    /// CoinGecko defaults; key (optional, free tier works without) from
    /// `COINGECKO_API_KEY`.
    pub fn coingecko() -> Self {
        Self {
            base_url: "https://api.coingecko.com/api/v3".to_string(),
            api_key: std::env::var("COINGECKO_API_KEY").ok().filter(|k| !k.is_empty()),
            api_key_header: "x-cg-demo-api-key",
            max_retries: 3,
            retry_base_delay_ms: 500,
            cache_ttl: DEFAULT_CACHE_TTL,
        }
    }

    /// CoinMarketCap defaults; key (required) from `COINMARKETCAP_API_KEY`.
    pub fn coinmarketcap() -> Self {
        Self {
            base_url: "https://pro-api.coinmarketcap.com".to_string(),
            api_key: std::env::var("COINMARKETCAP_API_KEY")
                .ok()
                .filter(|k| !k.is_empty()),
            api_key_header: "X-CMC_PRO_API_KEY",
            max_retries: 3,
            retry_base_delay_ms: 500,
            cache_ttl: DEFAULT_CACHE_TTL,
        }
    }

    /// Override the base URL (tests point this at a fake).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}
