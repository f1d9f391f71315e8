//! Main commands enum and primary subcommands.
//!
//! This module defines the available commands for the CLI tool.

use clap::Subcommand;

/// Available commands for the market tracking tool.
#[derive(Subcommand)]
pub enum Commands {
    /// Fetch current quotes for tracked tokens and store them
    Fetch {
        /// Tokens to fetch (defaults to the full tracked set)
        tokens: Vec<String>,
        /// Force a specific provider ("coingecko" or "coinmarketcap")
        #[arg(short, long)]
        provider: Option<String>,
        /// Also refresh the cached 7-day sparkline per token
        #[arg(long)]
        sparklines: bool,
    },

    /// Show the latest stored prices
    Prices {
        /// Tokens to show (defaults to everything in the database)
        tokens: Vec<String>,
    },

    /// Show stored price history for a token
    History {
        /// Token symbol or CoinGecko ID
        token: String,
        /// Lookback window: 1h, 24h, or 7d
        #[arg(short, long, default_value = "24h")]
        timeframe: String,
        /// Maximum number of points to show
        #[arg(short, long)]
        limit: Option<u32>,
    },

    /// Show a token's 7-day sparkline
    Sparkline {
        /// Token symbol or CoinGecko ID
        token: String,
        /// Fetch a fresh series instead of using the cached one
        #[arg(long)]
        refresh: bool,
    },

    /// Compare a token's volatility against the tracked market
    Volatility {
        /// Token symbol or CoinGecko ID
        token: String,
        /// Lookback window: 1h, 24h, or 7d
        #[arg(short, long, default_value = "24h")]
        timeframe: String,
    },

    /// Run technical analysis (SMA/EMA/RSI, trend) over stored history
    Analyze {
        /// Token symbol or CoinGecko ID
        token: String,
        /// Lookback window: 1h, 24h, or 7d
        #[arg(short, long, default_value = "7d")]
        timeframe: String,
    },

    /// Fetch and validate OHLC candles for a token
    Ohlc {
        /// Token symbol or CoinGecko ID
        token: String,
        /// Day window (clamped to the provider's allowed set)
        #[arg(short, long, default_value = "1")]
        days: u32,
    },

    /// Show provider availability and usage counters
    Status,

    /// Report how well the token mapping covers the tracked set
    Coverage,

    /// Add or replace a symbol -> CoinGecko ID alias
    Alias {
        /// Token symbol (stored upper-case)
        symbol: String,
        /// CoinGecko coin ID (e.g. "cardano")
        coingecko_id: String,
    },
}
