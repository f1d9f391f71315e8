//! CLI bootstrap - the composition root.
//!
//! This module is the ONLY place where infrastructure is wired together
//! for the CLI adapter. All concrete implementations are instantiated here:
//! - Database pool and repositories (via coinwatch-db)
//! - Provider clients and the router (via coinwatch-api)
//! - The token map, extended with database aliases
//!
//! Command handlers receive the fully-composed `CliContext` and never touch
//! the pool or raw HTTP clients directly.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use coinwatch_api::{
    CoinGeckoClient, CoinMarketCapClient, ProviderConfig, ProviderRouter, ReqwestBackend,
};
use coinwatch_core::TokenMap;
use coinwatch_db::{
    MarketDataRepository, PriceHistoryRepository, SparklineRepository, TokenAliasRepository,
    setup_database,
};

/// Bootstrap configuration for the CLI.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Path to the `SQLite` database file.
    pub db_path: PathBuf,
}

impl CliConfig {
    /// Create config with the default database location.
    pub fn with_defaults() -> Self {
        Self {
            db_path: PathBuf::from("data/coinwatch.db"),
        }
    }

    /// Override the database path (from `--db-path` or the environment).
    #[must_use]
    pub fn with_db_path(mut self, db_path: impl Into<PathBuf>) -> Self {
        self.db_path = db_path.into();
        self
    }
}

/// Fully composed application context for CLI commands.
pub struct CliContext {
    pub market_data: MarketDataRepository,
    pub price_history: PriceHistoryRepository,
    pub sparklines: SparklineRepository,
    pub aliases: TokenAliasRepository,
    /// Builtin mapping plus aliases loaded from the database.
    pub map: TokenMap,
    pub router: ProviderRouter,
    /// Symbols of the database aliases, for the default tracked set.
    alias_symbols: Vec<String>,
}

impl CliContext {
    /// Symbols the fetch command tracks by default: the built-in set plus
    /// every database alias.
    pub fn tracked_symbols(&self) -> Vec<String> {
        let mut symbols: Vec<String> = TokenMap::builtin_symbols().map(String::from).collect();
        for symbol in &self.alias_symbols {
            if !symbols.iter().any(|s| s == symbol) {
                symbols.push(symbol.clone());
            }
        }
        symbols
    }
}

/// Bootstrap the CLI application.
///
/// This is the composition root. It:
/// 1. Creates the database pool with full schema setup
/// 2. Loads token aliases and extends the built-in map
/// 3. Builds the provider clients and registers them with the router
///
/// CoinMarketCap registers as unavailable when `COINMARKETCAP_API_KEY` is
/// not set; the router then serves everything from CoinGecko.
pub async fn bootstrap(config: CliConfig) -> Result<CliContext> {
    // 1. Database pool and repositories
    let pool = setup_database(&config.db_path).await?;
    let market_data = MarketDataRepository::new(pool.clone());
    let price_history = PriceHistoryRepository::new(pool.clone());
    let sparklines = SparklineRepository::new(pool.clone());
    let aliases = TokenAliasRepository::new(pool);

    // 2. Token map with database aliases layered over the builtin table
    let mut map = TokenMap::new();
    let stored = aliases.load_all().await?;
    for (symbol, coingecko_id) in &stored {
        map.extend_alias(symbol, coingecko_id);
    }
    let alias_symbols: Vec<String> = stored.into_keys().collect();
    tracing::debug!(aliases = map.extended_len(), "token map loaded");

    // 3. Provider clients and router
    let mut router = ProviderRouter::new();

    let gecko_config = ProviderConfig::coingecko();
    let gecko_backend = ReqwestBackend::new(&gecko_config)?;
    router.register(
        Arc::new(CoinGeckoClient::new(gecko_backend, &gecko_config, map.clone())),
        None,
    );

    let cmc_config = ProviderConfig::coinmarketcap();
    let cmc_init_error = if cmc_config.api_key.is_none() {
        Some("COINMARKETCAP_API_KEY not set".to_string())
    } else {
        None
    };
    let cmc_backend = ReqwestBackend::new(&cmc_config)?;
    router.register(
        Arc::new(CoinMarketCapClient::new(cmc_backend, &cmc_config)),
        cmc_init_error,
    );

    Ok(CliContext {
        market_data,
        price_history,
        sparklines,
        aliases,
        map,
        router,
        alias_symbols,
    })
}
