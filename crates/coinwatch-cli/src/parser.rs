//! Main CLI parser and top-level argument handling.
//!
//! This module defines the root CLI structure with global options.

use clap::Parser;

use crate::commands::Commands;

/// Command-line interface definition for the market tracking tool.
///
/// This is the top-level parser that handles global options and dispatches
/// to subcommands.
#[derive(Parser)]
#[command(name = "coinwatch")]
#[command(about = "Track crypto market data, history, and volatility")]
#[command(version)]
pub struct Cli {
    /// Override the database path for this invocation
    #[arg(long = "db-path", global = true, env = "COINWATCH_DB_PATH")]
    pub db_path: Option<String>,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_parser_builds() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_args_parse() {
        let cli = Cli::parse_from(["coinwatch", "--verbose", "--db-path", "/tmp/cw.db", "status"]);
        assert!(cli.verbose);
        assert_eq!(cli.db_path, Some("/tmp/cw.db".to_string()));
    }
}
