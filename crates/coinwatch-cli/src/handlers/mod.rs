//! Command handlers.
//!
//! Handlers follow the canonical pattern:
//! - Signature: `pub async fn execute(ctx: &CliContext, ...) -> Result<(), CliError>`
//! - Thin wrappers that:
//!   1. Parse/validate CLI-specific input
//!   2. Call repositories, the router, or core analysis
//!   3. Format output for the terminal
//!
//! Business rules (volatility math, candle validation, token resolution)
//! live in `coinwatch-core`, never here.

pub mod alias;
pub mod analyze;
pub mod coverage;
pub mod fetch;
pub mod history;
pub mod ohlc;
pub mod prices;
pub mod sparkline;
pub mod status;
pub mod volatility;

use crate::bootstrap::CliContext;
use crate::error::CliError;
use coinwatch_core::Resolved;

/// Resolve a user-supplied token or fail with a usage error naming it.
pub(crate) fn resolve_token(ctx: &CliContext, token: &str) -> Result<Resolved, CliError> {
    ctx.map.resolve(token).ok_or_else(|| {
        CliError::Arguments(format!(
            "unknown token '{token}' (try 'coinwatch alias {} <coingecko-id>')",
            token.to_uppercase()
        ))
    })
}
