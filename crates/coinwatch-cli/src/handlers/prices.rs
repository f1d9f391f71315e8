//! Prices command handler.
//!
//! Displays the latest stored snapshot per token in a formatted table.

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::handlers::resolve_token;
use crate::presentation::{format_change, format_price, format_quantity, print_separator};
use coinwatch_core::MarketSnapshot;

pub async fn execute(ctx: &CliContext, tokens: &[String]) -> Result<(), CliError> {
    let snapshots: Vec<MarketSnapshot> = if tokens.is_empty() {
        ctx.market_data.latest_all().await?
    } else {
        let mut found = Vec::with_capacity(tokens.len());
        for token in tokens {
            let resolved = resolve_token(ctx, token)?;
            match ctx.market_data.latest(&resolved.symbol).await? {
                Some(snapshot) => found.push(snapshot),
                None => println!("{}: no stored data (run 'coinwatch fetch')", resolved.symbol),
            }
        }
        found
    };

    if snapshots.is_empty() {
        println!("No market data stored yet. Run 'coinwatch fetch' first.");
        return Ok(());
    }

    println!(
        "{:<7} {:>14} {:>8} {:>10} {:>10}  Updated",
        "Token", "Price", "24h", "Volume", "Mkt Cap"
    );
    print_separator(72);
    for snapshot in &snapshots {
        println!(
            "{:<7} {:>14} {:>8} {:>10} {:>10}  {}",
            snapshot.symbol,
            format_price(snapshot.price),
            format_change(snapshot.price_change_24h),
            format_quantity(snapshot.volume),
            format_quantity(snapshot.market_cap),
            snapshot.last_updated.format("%Y-%m-%d %H:%M:%S"),
        );
    }

    Ok(())
}
