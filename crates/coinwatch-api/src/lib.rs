//! Market-data provider clients and request routing.
//!
//! Two providers are supported: CoinGecko (per-coin detail, OHLC, sparklines,
//! historical series) and CoinMarketCap (bulk quotes). [`ProviderRouter`]
//! picks a provider per operation based on advertised specializations and
//! falls back when a provider fails, tracking per-provider health.

// Anchor dev-dependencies that tests pull in only indirectly
#[cfg(test)]
use tokio_test as _;

pub mod cache;
pub mod coingecko;
pub mod coinmarketcap;
pub mod config;
pub mod error;
pub mod http;
pub mod models;
pub mod provider;
pub mod router;

pub use cache::ResponseCache;
pub use coingecko::CoinGeckoClient;
pub use coinmarketcap::CoinMarketCapClient;
pub use config::ProviderConfig;
pub use error::{ApiError, ApiResult};
pub use http::{HttpBackend, ReqwestBackend};
pub use provider::{MarketDataProvider, Operation};
pub use router::{ProviderRouter, ProviderStatus};
