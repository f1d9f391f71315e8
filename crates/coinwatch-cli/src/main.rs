//! CLI entry point - the composition root.
//!
//! Parses arguments, bootstraps the `CliContext`, and dispatches to a
//! handler per command. All wiring happens in `bootstrap`; handlers never
//! touch the pool or raw HTTP clients.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use coinwatch_cli::{Cli, CliConfig, CliError, Commands, bootstrap, handlers};

#[tokio::main]
async fn main() {
    // Load environment variables before clap reads env-backed args
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Initialize logging; --verbose lowers the default level to debug
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(e.exit_code());
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let Some(command) = cli.command else {
        use clap::CommandFactory;
        Cli::command()
            .print_help()
            .map_err(|e| CliError::Arguments(e.to_string()))?;
        return Ok(());
    };

    let mut config = CliConfig::with_defaults();
    if let Some(db_path) = cli.db_path {
        config = config.with_db_path(db_path);
    }
    let ctx = bootstrap(config)
        .await
        .map_err(|e| CliError::Config(e.to_string()))?;

    match command {
        Commands::Fetch {
            tokens,
            provider,
            sparklines,
        } => {
            handlers::fetch::execute(&ctx, &tokens, provider.as_deref(), sparklines).await?;
        }
        Commands::Prices { tokens } => {
            handlers::prices::execute(&ctx, &tokens).await?;
        }
        Commands::History {
            token,
            timeframe,
            limit,
        } => {
            handlers::history::execute(&ctx, &token, &timeframe, limit).await?;
        }
        Commands::Sparkline { token, refresh } => {
            handlers::sparkline::execute(&ctx, &token, refresh).await?;
        }
        Commands::Volatility { token, timeframe } => {
            handlers::volatility::execute(&ctx, &token, &timeframe).await?;
        }
        Commands::Analyze { token, timeframe } => {
            handlers::analyze::execute(&ctx, &token, &timeframe).await?;
        }
        Commands::Ohlc { token, days } => {
            handlers::ohlc::execute(&ctx, &token, days).await?;
        }
        Commands::Status => {
            handlers::status::execute(&ctx)?;
        }
        Commands::Coverage => {
            handlers::coverage::execute(&ctx).await?;
        }
        Commands::Alias {
            symbol,
            coingecko_id,
        } => {
            handlers::alias::execute(&ctx, &symbol, &coingecko_id).await?;
        }
    }

    Ok(())
}
