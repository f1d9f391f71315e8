//! `SQLite` cache for 7-day sparkline series.

use crate::error::DbError;
use crate::repositories::row_mappers::{format_timestamp, parse_timestamp};
use chrono::{DateTime, Utc};
use coinwatch_core::extract_prices;
use sqlx::{Row, SqlitePool};

/// A cached sparkline as read back from storage.
#[derive(Debug, Clone)]
pub struct StoredSparkline {
    pub token: String,
    pub points: Vec<f64>,
    pub window_hours: i64,
    pub fetched_at: DateTime<Utc>,
}

impl StoredSparkline {
    /// Whether the cached series is older than `max_age`.
    pub fn is_stale(&self, max_age: chrono::Duration) -> bool {
        Utc::now() - self.fetched_at > max_age
    }
}

/// One row per token; refreshing a sparkline replaces the previous one.
pub struct SparklineRepository {
    pool: SqlitePool,
}

impl SparklineRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn upsert(
        &self,
        token: &str,
        points: &[f64],
        window_hours: i64,
    ) -> Result<(), DbError> {
        let json = serde_json::to_string(points)?;
        sqlx::query(
            r#"
            INSERT OR REPLACE INTO sparklines (token, points, window_hours, fetched_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(token.to_uppercase())
        .bind(json)
        .bind(window_hours)
        .bind(format_timestamp(Utc::now()))
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Read back a cached sparkline. The stored JSON is run through the
    /// tolerant price extractor, so rows written by older versions (objects
    /// or `[ts, price]` pairs) still decode.
    pub async fn fetch(&self, token: &str) -> Result<Option<StoredSparkline>, DbError> {
        let row = sqlx::query(
            "SELECT token, points, window_hours, fetched_at FROM sparklines \
             WHERE token = ?",
        )
        .bind(token.to_uppercase())
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let raw: String = row.try_get("points")?;
        let value: serde_json::Value = serde_json::from_str(&raw)?;
        let fetched_at_raw: String = row.try_get("fetched_at")?;

        Ok(Some(StoredSparkline {
            token: row.try_get("token")?,
            points: extract_prices(&value),
            window_hours: row.try_get("window_hours")?,
            fetched_at: parse_timestamp(&fetched_at_raw)?,
        }))
    }
}
