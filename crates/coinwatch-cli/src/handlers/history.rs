//! History command handler.
//!
//! Displays stored price history for one token over a timeframe window.

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::handlers::resolve_token;
use crate::presentation::{format_price, print_separator};
use coinwatch_core::Timeframe;

pub async fn execute(
    ctx: &CliContext,
    token: &str,
    timeframe: &str,
    limit: Option<u32>,
) -> Result<(), CliError> {
    let timeframe: Timeframe = timeframe.parse()?;
    let resolved = resolve_token(ctx, token)?;

    let series = ctx
        .price_history
        .series(&resolved.symbol, timeframe.lookback_hours(), limit)
        .await?;

    if series.is_empty() {
        println!(
            "No stored history for {} in the last {}h.",
            resolved.symbol,
            timeframe.lookback_hours()
        );
        return Ok(());
    }

    println!(
        "{} history, last {}h ({} point(s)):",
        resolved.symbol,
        timeframe.lookback_hours(),
        series.len()
    );
    print_separator(40);
    for point in &series {
        println!(
            "{}  {}",
            point.timestamp.format("%Y-%m-%d %H:%M:%S"),
            format_price(point.price)
        );
    }

    let first = series[0].price;
    let last = series[series.len() - 1].price;
    if first > 0.0 {
        let change = (last / first - 1.0) * 100.0;
        println!("Change over window: {change:+.2}%");
    }

    Ok(())
}
