//! Row mapping helpers for `SQLite` queries.

use crate::error::DbError;
use chrono::{DateTime, SecondsFormat, Utc};
use coinwatch_core::{MarketSnapshot, PricePoint};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

/// Timestamps are stored as fixed-width RFC 3339 text so that string
/// comparison in SQL matches chronological order.
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, DbError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| DbError::BadTimestamp(raw.to_string()))
}

/// Shared SELECT column list for market snapshot queries.
pub const SNAPSHOT_SELECT_COLUMNS: &str =
    "token, price, volume, market_cap, price_change_24h, timestamp";

pub fn row_to_snapshot(row: &SqliteRow) -> Result<MarketSnapshot, DbError> {
    let raw_ts: String = row.try_get("timestamp")?;
    Ok(MarketSnapshot {
        symbol: row.try_get("token")?,
        price: row.try_get("price")?,
        price_change_24h: row.try_get("price_change_24h")?,
        volume: row.try_get("volume")?,
        market_cap: row.try_get("market_cap")?,
        last_updated: parse_timestamp(&raw_ts)?,
    })
}

pub fn row_to_price_point(row: &SqliteRow) -> Result<PricePoint, DbError> {
    let raw_ts: String = row.try_get("timestamp")?;
    Ok(PricePoint {
        price: row.try_get("price")?,
        timestamp: parse_timestamp(&raw_ts)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn timestamp_round_trips() {
        let ts = Utc.with_ymd_and_hms(2025, 6, 1, 12, 30, 45).unwrap();
        let text = format_timestamp(ts);
        assert_eq!(parse_timestamp(&text).unwrap(), ts);
    }

    #[test]
    fn formatted_timestamps_sort_chronologically() {
        let early = Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap();
        let late = Utc.with_ymd_and_hms(2025, 6, 1, 10, 0, 0).unwrap();
        assert!(format_timestamp(early) < format_timestamp(late));
    }

    #[test]
    fn malformed_timestamp_is_an_error() {
        assert!(matches!(
            parse_timestamp("not a date"),
            Err(DbError::BadTimestamp(_))
        ));
    }
}
