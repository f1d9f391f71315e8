//! Fetch command handler.
//!
//! Pulls current quotes through the router, stores one snapshot and one
//! price-history point per token, and optionally refreshes sparklines.

use indicatif::{ProgressBar, ProgressStyle};

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::{format_change, format_price};
use coinwatch_core::PricePoint;

/// 7-day window recorded next to a refreshed sparkline.
const SPARKLINE_WINDOW_HOURS: i64 = 7 * 24;

pub async fn execute(
    ctx: &CliContext,
    tokens: &[String],
    provider: Option<&str>,
    sparklines: bool,
) -> Result<(), CliError> {
    let symbols = if tokens.is_empty() {
        ctx.tracked_symbols()
    } else {
        tokens.iter().map(|t| t.to_uppercase()).collect()
    };

    println!("Fetching quotes for {} token(s)...", symbols.len());
    let snapshots = match provider {
        Some(name) => ctx.router.market_snapshots_via(name, &symbols).await?,
        None => ctx.router.market_snapshots(&symbols).await?,
    };

    let bar = ProgressBar::new(snapshots.len() as u64);
    bar.set_style(
        ProgressStyle::with_template("{bar:30} {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    for snapshot in &snapshots {
        bar.set_message(snapshot.symbol.clone());
        ctx.market_data.insert_snapshot(snapshot).await?;
        ctx.price_history
            .insert_point(
                &snapshot.symbol,
                &PricePoint {
                    price: snapshot.price,
                    timestamp: snapshot.last_updated,
                },
            )
            .await?;
        bar.inc(1);
    }
    bar.finish_and_clear();

    for snapshot in &snapshots {
        println!(
            "  {:<6} {:>14} {:>8}",
            snapshot.symbol,
            format_price(snapshot.price),
            format_change(snapshot.price_change_24h),
        );
    }
    println!("Stored {} snapshot(s).", snapshots.len());

    if snapshots.len() < symbols.len() {
        println!(
            "Note: {} token(s) returned no usable quote.",
            symbols.len() - snapshots.len()
        );
    }

    if sparklines {
        refresh_sparklines(ctx, &snapshots).await?;
    }

    Ok(())
}

async fn refresh_sparklines(
    ctx: &CliContext,
    snapshots: &[coinwatch_core::MarketSnapshot],
) -> Result<(), CliError> {
    let mut refreshed = 0_usize;
    for snapshot in snapshots {
        match ctx.router.sparkline(&snapshot.symbol).await {
            Ok(points) if !points.is_empty() => {
                ctx.sparklines
                    .upsert(&snapshot.symbol, &points, SPARKLINE_WINDOW_HOURS)
                    .await?;
                refreshed += 1;
            }
            Ok(_) => {
                tracing::warn!(token = %snapshot.symbol, "empty sparkline, keeping cached copy");
            }
            Err(e) => {
                tracing::warn!(token = %snapshot.symbol, error = %e, "sparkline refresh failed");
            }
        }
    }
    println!("Refreshed {refreshed} sparkline(s).");
    Ok(())
}
