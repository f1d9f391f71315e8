//! Volatility command handler.
//!
//! Compares one token's volatility against the mean volatility of the rest
//! of the tracked set, computed over stored price history.

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::handlers::resolve_token;
use coinwatch_core::analysis::volatility::MIN_PRICES;
use coinwatch_core::{Timeframe, relative_volatility};
use coinwatch_db::DEFAULT_SERIES_CAP;

pub async fn execute(ctx: &CliContext, token: &str, timeframe: &str) -> Result<(), CliError> {
    let timeframe: Timeframe = timeframe.parse()?;
    let resolved = resolve_token(ctx, token)?;
    let hours = timeframe.lookback_hours();

    let token_prices = stored_prices(ctx, &resolved.symbol, hours).await?;
    if token_prices.len() < MIN_PRICES {
        println!(
            "Not enough history for {}: {} point(s) stored, {MIN_PRICES} needed. \
             Run 'coinwatch fetch' a few more times.",
            resolved.symbol,
            token_prices.len()
        );
        return Ok(());
    }

    let mut references = Vec::new();
    for other in ctx.tracked_symbols() {
        if other == resolved.symbol {
            continue;
        }
        references.push(stored_prices(ctx, &other, hours).await?);
    }

    let Some(relative) = relative_volatility(&token_prices, &references) else {
        println!(
            "No reference token has enough history to compare against yet. \
             Run 'coinwatch fetch' a few more times."
        );
        return Ok(());
    };

    println!("{} volatility over {timeframe}:", resolved.symbol);
    println!("  token     {:.4}%", relative.token_volatility);
    println!(
        "  market    {:.4}% (mean of {} reference token(s))",
        relative.market_volatility, relative.references_used
    );
    println!("  ratio     {:.2}x", relative.ratio);
    println!("  verdict   {}", relative.comparison().describe());

    Ok(())
}

async fn stored_prices(ctx: &CliContext, symbol: &str, hours: i64) -> Result<Vec<f64>, CliError> {
    let series = ctx
        .price_history
        .series(symbol, hours, Some(DEFAULT_SERIES_CAP))
        .await?;
    Ok(series.iter().map(|p| p.price).collect())
}
