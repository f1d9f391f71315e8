//! `SQLite` persistence for coinwatch.
//!
//! Market snapshots, price history, cached sparklines, and token alias
//! overrides all live in one `SQLite` file. Repositories own their SQL;
//! the `SqlitePool` never leaks past this crate's public constructors.

// Anchor dev-dependencies that tests pull in only indirectly
#[cfg(test)]
use tokio_test as _;

pub mod error;
pub mod repositories;
pub mod setup;

pub use error::DbError;

pub use repositories::{
    DEFAULT_SERIES_CAP, MarketDataRepository, PriceHistoryRepository, SparklineRepository,
    StoredSparkline, TokenAliasRepository,
};

pub use setup::setup_database;
#[cfg(any(test, feature = "test-utils"))]
pub use setup::setup_test_database;
