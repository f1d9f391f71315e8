//! Alias command handler.
//!
//! Stores a symbol -> CoinGecko ID override. The alias takes effect on the
//! next invocation, when bootstrap reloads the token map.

use crate::bootstrap::CliContext;
use crate::error::CliError;

pub async fn execute(ctx: &CliContext, symbol: &str, coingecko_id: &str) -> Result<(), CliError> {
    let coingecko_id = coingecko_id.trim().to_lowercase();
    if coingecko_id.is_empty() {
        return Err(CliError::Arguments("CoinGecko ID must not be empty".into()));
    }

    ctx.aliases.upsert(symbol, &coingecko_id, "manual").await?;
    println!("Stored alias {} -> {coingecko_id}.", symbol.to_uppercase());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bootstrap::tests::test_context;

    #[tokio::test]
    async fn alias_is_persisted_normalized() {
        let ctx = test_context().await;
        execute(&ctx, "pepe", " Pepe ").await.unwrap();

        let stored = ctx.aliases.lookup("PEPE").await.unwrap();
        assert_eq!(stored.as_deref(), Some("pepe"));
    }

    #[tokio::test]
    async fn empty_id_is_rejected() {
        let ctx = test_context().await;
        let err = execute(&ctx, "PEPE", "  ").await.unwrap_err();
        assert!(matches!(err, CliError::Arguments(_)));
    }
}
