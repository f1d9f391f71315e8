//! Repository implementations using `SQLite`.
//!
//! These implementations encapsulate all SQL queries and database access.
//! The `SqlitePool` stays behind repository constructors and never appears
//! in the rest of the workspace.

mod market_data;
mod price_history;
mod row_mappers;
mod sparklines;
mod token_aliases;

pub use market_data::MarketDataRepository;
pub use price_history::{DEFAULT_SERIES_CAP, PriceHistoryRepository};
pub use sparklines::{SparklineRepository, StoredSparkline};
pub use token_aliases::TokenAliasRepository;
