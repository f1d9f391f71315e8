//! Sparkline command handler.
//!
//! Renders a token's 7-day price series as a unicode sparkline, serving
//! from the database cache unless a refresh is requested.

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::handlers::resolve_token;
use crate::presentation::format_price;
use coinwatch_core::Sparkline;

const SPARKLINE_WINDOW_HOURS: i64 = 7 * 24;

/// How long a cached sparkline is served before refetching.
const CACHE_MAX_AGE_MINUTES: i64 = 60;

pub async fn execute(ctx: &CliContext, token: &str, refresh: bool) -> Result<(), CliError> {
    let resolved = resolve_token(ctx, token)?;

    let points = if refresh {
        None
    } else {
        ctx.sparklines
            .fetch(&resolved.symbol)
            .await?
            .filter(|stored| {
                !stored.is_stale(chrono::Duration::minutes(CACHE_MAX_AGE_MINUTES))
            })
            .map(|stored| stored.points)
    };

    let points = match points {
        Some(points) => points,
        None => {
            let fetched = ctx.router.sparkline(&resolved.symbol).await?;
            if !fetched.is_empty() {
                ctx.sparklines
                    .upsert(&resolved.symbol, &fetched, SPARKLINE_WINDOW_HOURS)
                    .await?;
            }
            fetched
        }
    };

    let Some(sparkline) = Sparkline::from_prices(points) else {
        println!("No sparkline data available for {}.", resolved.symbol);
        return Ok(());
    };

    println!("{} 7d  {}", resolved.symbol, sparkline.render());
    println!(
        "  low {}  high {}  change {:+.2}%  ({:?})",
        format_price(sparkline.min()),
        format_price(sparkline.max()),
        sparkline.change_pct(),
        sparkline.trend(),
    );

    Ok(())
}
