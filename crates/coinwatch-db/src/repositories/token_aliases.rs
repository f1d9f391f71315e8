//! `SQLite` storage for symbol -> CoinGecko ID overrides.
//!
//! Aliases loaded from here extend the builtin token map at startup, so
//! users can track coins the binary does not know about.

use crate::error::DbError;
use sqlx::{Row, SqlitePool};
use std::collections::BTreeMap;

pub struct TokenAliasRepository {
    pool: SqlitePool,
}

impl TokenAliasRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn upsert(
        &self,
        symbol: &str,
        coingecko_id: &str,
        source: &str,
    ) -> Result<(), DbError> {
        sqlx::query(
            "INSERT OR REPLACE INTO token_aliases (symbol, coingecko_id, source) VALUES (?, ?, ?)",
        )
        .bind(symbol.to_uppercase())
        .bind(coingecko_id)
        .bind(source)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn lookup(&self, symbol: &str) -> Result<Option<String>, DbError> {
        let row = sqlx::query("SELECT coingecko_id FROM token_aliases WHERE symbol = ?")
            .bind(symbol.to_uppercase())
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|r| r.get("coingecko_id")))
    }

    /// All aliases, keyed by uppercase symbol. Feeds `TokenMap::extend_alias`.
    pub async fn load_all(&self) -> Result<BTreeMap<String, String>, DbError> {
        let rows = sqlx::query("SELECT symbol, coingecko_id FROM token_aliases ORDER BY symbol")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows
            .into_iter()
            .map(|r| (r.get("symbol"), r.get("coingecko_id")))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::setup::setup_test_database;

    async fn repo() -> TokenAliasRepository {
        TokenAliasRepository::new(setup_test_database().await.unwrap())
    }

    #[tokio::test]
    async fn upsert_normalizes_the_symbol() {
        let repo = repo().await;
        repo.upsert("pepe", "pepe", "manual").await.unwrap();

        assert_eq!(repo.lookup("PEPE").await.unwrap().as_deref(), Some("pepe"));
        assert_eq!(repo.lookup("pepe").await.unwrap().as_deref(), Some("pepe"));
    }

    #[tokio::test]
    async fn upsert_overwrites_an_existing_alias() {
        let repo = repo().await;
        repo.upsert("WBTC", "bitcoin", "manual").await.unwrap();
        repo.upsert("WBTC", "wrapped-bitcoin", "manual").await.unwrap();

        assert_eq!(
            repo.lookup("WBTC").await.unwrap().as_deref(),
            Some("wrapped-bitcoin")
        );
    }

    #[tokio::test]
    async fn load_all_returns_every_alias() {
        let repo = repo().await;
        repo.upsert("PEPE", "pepe", "manual").await.unwrap();
        repo.upsert("WIF", "dogwifcoin", "manual").await.unwrap();

        let all = repo.load_all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all["WIF"], "dogwifcoin");
    }
}
