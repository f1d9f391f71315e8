//! CLI-specific error types and mappings.
//!
//! Handlers surface user mistakes (bad timeframe, unknown token) through
//! `CliError` so `main` can map them to conventional exit codes.

use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Argument parsing error.
    #[error("Invalid arguments: {0}")]
    Arguments(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),

    /// Provider/network error.
    #[error("Provider error: {0}")]
    Provider(String),
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow Unix conventions:
    /// - 1: General error
    /// - 2: Misuse of shell command (invalid arguments)
    /// - 64-78: Reserved for specific error categories (see sysexits.h)
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Arguments(_) => 2, // EX_USAGE
            Self::Config(_) => 78,   // EX_CONFIG
            Self::Database(_) => 73, // EX_CANTCREAT (closest fit)
            Self::Provider(_) => 69, // EX_UNAVAILABLE
        }
    }
}

impl From<coinwatch_db::DbError> for CliError {
    fn from(err: coinwatch_db::DbError) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<coinwatch_api::ApiError> for CliError {
    fn from(err: coinwatch_api::ApiError) -> Self {
        Self::Provider(err.to_string())
    }
}

impl From<coinwatch_core::TimeframeParseError> for CliError {
    fn from(err: coinwatch_core::TimeframeParseError) -> Self {
        Self::Arguments(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_follow_sysexits() {
        assert_eq!(CliError::Arguments("bad".into()).exit_code(), 2);
        assert_eq!(CliError::Provider("down".into()).exit_code(), 69);
    }
}
