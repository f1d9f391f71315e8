//! Storage error type shared by all repositories.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),

    #[error("stored value could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("stored timestamp is malformed: {0}")]
    BadTimestamp(String),
}
