//! OHLC command handler.
//!
//! Fetches candles through the router (which validates them) and prints
//! the series with a per-candle direction marker.

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::handlers::resolve_token;
use crate::presentation::print_separator;
use coinwatch_core::clamp_ohlc_days;

pub async fn execute(ctx: &CliContext, token: &str, days: u32) -> Result<(), CliError> {
    let resolved = resolve_token(ctx, token)?;

    let clamped = clamp_ohlc_days(days);
    if clamped != days {
        println!("Note: {days} is not a supported window, using {clamped} day(s).");
    }

    let candles = ctx.router.ohlc(&resolved.symbol, clamped).await?;
    if candles.is_empty() {
        println!("No OHLC data returned for {}.", resolved.symbol);
        return Ok(());
    }

    println!(
        "{} OHLC, {clamped} day(s), {} candle(s):",
        resolved.symbol,
        candles.len()
    );
    println!(
        "{:<20} {:>12} {:>12} {:>12} {:>12}",
        "Time", "Open", "High", "Low", "Close"
    );
    print_separator(74);
    for candle in &candles {
        let marker = if candle.close >= candle.open { "+" } else { "-" };
        println!(
            "{:<20} {:>12.4} {:>12.4} {:>12.4} {:>12.4} {marker}",
            candle.timestamp.format("%Y-%m-%d %H:%M"),
            candle.open,
            candle.high,
            candle.low,
            candle.close,
        );
    }

    Ok(())
}
