//! `SQLite` storage for fine-grained price points.
//!
//! The analysis pipeline reads from here: volatility, indicators, and
//! relative-volatility comparisons all run over stored series rather than
//! refetching from a provider.

use crate::error::DbError;
use crate::repositories::row_mappers::{format_timestamp, row_to_price_point};
use chrono::{Duration, Utc};
use coinwatch_core::PricePoint;
use sqlx::SqlitePool;

/// Cap applied by [`PriceHistoryRepository::series`] unless the caller asks
/// for everything. Keeps indicator inputs bounded on long-running databases.
pub const DEFAULT_SERIES_CAP: u32 = 50;

pub struct PriceHistoryRepository {
    pool: SqlitePool,
}

impl PriceHistoryRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn insert_point(&self, token: &str, point: &PricePoint) -> Result<(), DbError> {
        sqlx::query("INSERT INTO price_history (token, price, timestamp) VALUES (?, ?, ?)")
            .bind(token.to_uppercase())
            .bind(point.price)
            .bind(format_timestamp(point.timestamp))
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Stored prices for a token within the trailing `hours`, oldest first.
    ///
    /// Non-positive prices are filtered out and the match on `token` is
    /// case-insensitive. With `cap = Some(n)` only the newest `n` points
    /// are returned (still in ascending order).
    pub async fn series(
        &self,
        token: &str,
        hours: i64,
        cap: Option<u32>,
    ) -> Result<Vec<PricePoint>, DbError> {
        let cutoff = format_timestamp(Utc::now() - Duration::hours(hours));
        // LIMIT -1 means unbounded in SQLite
        let limit = cap.map_or(-1_i64, i64::from);

        let rows = sqlx::query(
            r#"
            SELECT price, timestamp FROM (
                SELECT price, timestamp FROM price_history
                WHERE UPPER(token) = UPPER(?) AND price > 0 AND timestamp >= ?
                ORDER BY timestamp DESC LIMIT ?
            ) ORDER BY timestamp ASC
            "#,
        )
        .bind(token)
        .bind(cutoff)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_price_point).collect()
    }

    /// Newest stored price for a token, regardless of age.
    pub async fn latest_price(&self, token: &str) -> Result<Option<PricePoint>, DbError> {
        let row = sqlx::query(
            "SELECT price, timestamp FROM price_history \
             WHERE UPPER(token) = UPPER(?) AND price > 0 \
             ORDER BY timestamp DESC LIMIT 1",
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(row_to_price_point).transpose()
    }
}
