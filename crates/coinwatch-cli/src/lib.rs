//! CLI adapter for coinwatch.
//!
//! `main.rs` is the composition root: it parses arguments, bootstraps the
//! [`CliContext`], and dispatches to a handler per command. Handlers stay
//! thin; market logic lives in `coinwatch-core` and data access behind the
//! repositories and the provider router.

// Anchor dev-dependencies that tests pull in only indirectly
#[cfg(test)]
use tempfile as _;
#[cfg(test)]
use tokio_test as _;

pub mod bootstrap;
pub mod commands;
pub mod error;
pub mod handlers;
pub mod parser;
pub mod presentation;

pub use bootstrap::{CliConfig, CliContext, bootstrap};
pub use commands::Commands;
pub use error::CliError;
pub use parser::Cli;
