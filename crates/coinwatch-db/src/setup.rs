//! Database setup and initialization.
//!
//! This module provides the `setup_database()` function for initializing
//! the `SQLite` database with full schema. Entry points call this with the
//! resolved database path.

use anyhow::Result;
use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};
use std::path::Path;

/// Sets up the `SQLite` database connection and ensures the schema exists.
///
/// Creates the database file (and parent directory) if missing, then
/// creates all tables and indexes. Safe to call repeatedly.
///
/// # Errors
///
/// Returns an error if the database file cannot be opened or created, or
/// if schema creation fails.
///
/// # Example
///
/// ```rust,no_run
/// use coinwatch_db::setup_database;
/// use std::path::Path;
///
/// # async fn example() -> anyhow::Result<()> {
/// let db_path = Path::new("data/coinwatch.db");
/// let pool = setup_database(db_path).await?;
/// # Ok(())
/// # }
/// ```
pub async fn setup_database(db_path: &Path) -> Result<SqlitePool> {
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let pool = SqlitePool::connect_with(
        SqliteConnectOptions::new()
            .filename(db_path)
            .create_if_missing(true),
    )
    .await?;

    create_schema(&pool).await?;
    tracing::debug!(path = %db_path.display(), "database ready");

    Ok(pool)
}

/// Sets up an in-memory `SQLite` database for testing.
///
/// Creates a fresh in-memory database with the full production schema.
#[cfg(any(test, feature = "test-utils"))]
pub async fn setup_test_database() -> Result<SqlitePool> {
    let pool = SqlitePool::connect("sqlite::memory:").await?;
    create_schema(&pool).await?;
    Ok(pool)
}

/// Creates the complete database schema.
///
/// All statements use IF NOT EXISTS, so re-running against an existing
/// database is a no-op.
async fn create_schema(pool: &SqlitePool) -> Result<()> {
    // Latest-quote snapshots, one row per fetch per token
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS market_data (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            token TEXT NOT NULL,
            price REAL NOT NULL,
            volume REAL,
            market_cap REAL,
            price_change_24h REAL,
            timestamp TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_market_data_token_ts ON market_data(token, timestamp)",
    )
    .execute(pool)
    .await?;

    // Fine-grained price points backing volatility and trend analysis
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS price_history (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            token TEXT NOT NULL,
            price REAL NOT NULL,
            timestamp TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_price_history_token_ts ON price_history(token, timestamp)",
    )
    .execute(pool)
    .await?;

    // One cached 7-day sparkline per token, points stored as a JSON array
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS sparklines (
            token TEXT PRIMARY KEY NOT NULL,
            points TEXT NOT NULL,
            window_hours INTEGER NOT NULL,
            fetched_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    // User-supplied symbol -> CoinGecko ID overrides
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS token_aliases (
            symbol TEXT PRIMARY KEY NOT NULL,
            coingecko_id TEXT NOT NULL,
            source TEXT NOT NULL DEFAULT 'manual'
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn schema_creation_is_idempotent() {
        let pool = setup_test_database().await.unwrap();
        create_schema(&pool).await.unwrap();
        create_schema(&pool).await.unwrap();
    }

    #[tokio::test]
    async fn setup_creates_the_file_and_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("coinwatch.db");
        let pool = setup_database(&path).await.unwrap();
        drop(pool);
        assert!(path.exists());
    }
}
