//! `SQLite` storage for market snapshots.

use crate::error::DbError;
use crate::repositories::row_mappers::{
    SNAPSHOT_SELECT_COLUMNS, format_timestamp, row_to_snapshot,
};
use chrono::{Duration, Utc};
use coinwatch_core::MarketSnapshot;
use sqlx::{Row, SqlitePool};

/// Append-only snapshot log with latest-per-token queries on top.
pub struct MarketDataRepository {
    pool: SqlitePool,
}

impl MarketDataRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Record one snapshot. Symbols are stored uppercased so reads do not
    /// depend on how the provider spelled them.
    pub async fn insert_snapshot(&self, snapshot: &MarketSnapshot) -> Result<(), DbError> {
        sqlx::query(
            r#"
            INSERT INTO market_data (token, price, volume, market_cap, price_change_24h, timestamp)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(snapshot.symbol.to_uppercase())
        .bind(snapshot.price)
        .bind(snapshot.volume)
        .bind(snapshot.market_cap)
        .bind(snapshot.price_change_24h)
        .bind(format_timestamp(snapshot.last_updated))
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Most recent snapshot for one token, if any.
    pub async fn latest(&self, token: &str) -> Result<Option<MarketSnapshot>, DbError> {
        let row = sqlx::query(&format!(
            "SELECT {SNAPSHOT_SELECT_COLUMNS} FROM market_data \
             WHERE token = ? ORDER BY timestamp DESC LIMIT 1"
        ))
        .bind(token.to_uppercase())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(row_to_snapshot).transpose()
    }

    /// Most recent snapshot per token, largest market cap first.
    pub async fn latest_all(&self) -> Result<Vec<MarketSnapshot>, DbError> {
        let rows = sqlx::query(&format!(
            "SELECT {SNAPSHOT_SELECT_COLUMNS} FROM market_data m \
             JOIN (SELECT token AS t, MAX(timestamp) AS ts FROM market_data GROUP BY token) latest \
               ON m.token = latest.t AND m.timestamp = latest.ts \
             ORDER BY m.market_cap DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_snapshot).collect()
    }

    /// Every token that has at least one stored snapshot.
    pub async fn distinct_tokens(&self) -> Result<Vec<String>, DbError> {
        let rows = sqlx::query("SELECT DISTINCT token FROM market_data ORDER BY token")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.iter().map(|r| r.get("token")).collect())
    }

    /// Tokens with the largest market caps among snapshots taken within the
    /// trailing `hours`.
    pub async fn top_by_market_cap(
        &self,
        hours: i64,
        limit: u32,
    ) -> Result<Vec<MarketSnapshot>, DbError> {
        let cutoff = format_timestamp(Utc::now() - Duration::hours(hours));
        let rows = sqlx::query(&format!(
            "SELECT {SNAPSHOT_SELECT_COLUMNS} FROM market_data m \
             JOIN (SELECT token AS t, MAX(timestamp) AS ts FROM market_data GROUP BY token) latest \
               ON m.token = latest.t AND m.timestamp = latest.ts \
             WHERE m.timestamp >= ? AND m.market_cap IS NOT NULL \
             ORDER BY m.market_cap DESC LIMIT ?"
        ))
        .bind(cutoff)
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_snapshot).collect()
    }
}
