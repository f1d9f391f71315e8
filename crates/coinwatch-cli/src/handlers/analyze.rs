//! Analyze command handler.
//!
//! Runs the combined technical analysis (SMA/EMA/RSI, trend, volatility)
//! over stored price history.

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::handlers::resolve_token;
use coinwatch_core::analysis::indicators::MIN_ANALYSIS_POINTS;
use coinwatch_core::{AnalysisError, Timeframe, Trend, analyze};

pub async fn execute(ctx: &CliContext, token: &str, timeframe: &str) -> Result<(), CliError> {
    let timeframe: Timeframe = timeframe.parse()?;
    let resolved = resolve_token(ctx, token)?;

    let series = ctx
        .price_history
        .series(&resolved.symbol, timeframe.lookback_hours(), None)
        .await?;
    let prices: Vec<f64> = series.iter().map(|p| p.price).collect();

    let analysis = match analyze(&prices) {
        Ok(analysis) => analysis,
        Err(AnalysisError::InsufficientData { needed, got }) => {
            println!(
                "Not enough history for {}: {got} point(s) stored, {needed} needed \
                 (minimum {MIN_ANALYSIS_POINTS}). Run 'coinwatch fetch' a few more times.",
                resolved.symbol
            );
            return Ok(());
        }
        Err(e) => return Err(CliError::Arguments(e.to_string())),
    };

    let trend = match analysis.overall_trend {
        Trend::Bullish => "bullish",
        Trend::Bearish => "bearish",
        Trend::Neutral => "neutral",
    };

    println!(
        "{} analysis over {timeframe} ({} point(s)):",
        resolved.symbol,
        prices.len()
    );
    println!(
        "  trend       {trend} (strength {:.0}/100)",
        analysis.trend_strength
    );
    println!("  volatility  {:.4}%", analysis.volatility);
    println!("  SMA-20      {:.6}", analysis.indicators.sma_20);
    println!("  EMA-12      {:.6}", analysis.indicators.ema_12);
    println!("  RSI-14      {:.2}", analysis.indicators.rsi_14);

    Ok(())
}
