//! Coverage command handler.
//!
//! Reports how much of the token universe the mapping can resolve. The
//! universe is the tracked set plus every token that actually appears in
//! stored market data; stored-but-unmapped symbols are the gaps worth
//! surfacing (quotes can be stored under symbols no mapping stage knows).

use crate::bootstrap::CliContext;
use crate::error::CliError;
use coinwatch_core::CoverageReport;

pub async fn execute(ctx: &CliContext) -> Result<(), CliError> {
    let report = build_report(ctx).await?;

    println!("Token mapping coverage:");
    println!("  tokens      {}", report.total);
    println!("  builtin     {}", report.builtin);
    println!("  aliases     {}", report.extended);
    println!("  coverage    {:.1}%", report.coverage_pct());

    if report.unresolved.is_empty() {
        println!("All tokens resolve to a CoinGecko ID.");
    } else {
        println!("Unresolved tokens:");
        for symbol in &report.unresolved {
            println!("  {symbol}  (add with 'coinwatch alias {symbol} <coingecko-id>')");
        }
    }

    Ok(())
}

/// Coverage over the tracked set merged with tokens present in storage.
async fn build_report(ctx: &CliContext) -> Result<CoverageReport, CliError> {
    let mut tokens = ctx.tracked_symbols();
    for stored in ctx.market_data.distinct_tokens().await? {
        if !tokens.iter().any(|t| t.eq_ignore_ascii_case(&stored)) {
            tokens.push(stored);
        }
    }
    Ok(ctx.map.coverage(tokens.iter().map(String::as_str)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bootstrap::tests::test_context;
    use chrono::Utc;
    use coinwatch_core::MarketSnapshot;

    fn snapshot(symbol: &str) -> MarketSnapshot {
        MarketSnapshot {
            symbol: symbol.to_string(),
            price: 1.0,
            price_change_24h: None,
            volume: None,
            market_cap: Some(1.0e9),
            last_updated: Utc::now(),
        }
    }

    #[tokio::test]
    async fn stored_unmapped_tokens_show_as_gaps() {
        let ctx = test_context().await;
        ctx.market_data.insert_snapshot(&snapshot("BTC")).await.unwrap();
        ctx.market_data
            .insert_snapshot(&snapshot("MYSTERY"))
            .await
            .unwrap();

        let report = build_report(&ctx).await.unwrap();
        assert_eq!(report.unresolved, vec!["MYSTERY".to_string()]);
        assert!(report.coverage_pct() < 100.0);
    }

    #[tokio::test]
    async fn fully_mapped_storage_reports_no_gaps() {
        let ctx = test_context().await;
        ctx.market_data.insert_snapshot(&snapshot("BTC")).await.unwrap();

        let report = build_report(&ctx).await.unwrap();
        assert!(report.unresolved.is_empty());
        // Tracked set is builtin plus the ADA alias; BTC must not double-count
        assert_eq!(report.total, ctx.tracked_symbols().len());
    }
}
