//! Error types for provider operations.

use thiserror::Error;

/// Result type alias for provider operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors from market-data provider operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// API request failed with an HTTP error status.
    #[error("API request failed with status {status}: {url}")]
    RequestFailed {
        /// HTTP status code
        status: u16,
        /// The URL that was requested
        url: String,
    },

    /// The provider rate-limited us and retries were exhausted.
    #[error("rate limited by provider: {url}")]
    RateLimited { url: String },

    /// The requested coin does not exist at the provider.
    #[error("coin '{coin_id}' not found at {provider}")]
    CoinNotFound {
        provider: &'static str,
        coin_id: String,
    },

    /// Token could not be mapped to a provider identifier.
    #[error("token '{token}' is not mapped to any provider identifier")]
    UnknownToken { token: String },

    /// The provider does not implement this operation.
    #[error("{provider} does not support {operation}")]
    Unsupported {
        provider: &'static str,
        operation: &'static str,
    },

    /// No registered provider could serve the operation.
    #[error("no provider available for {operation}: {detail}")]
    NoProviderAvailable {
        operation: &'static str,
        detail: String,
    },

    /// API returned an invalid or unexpected response.
    #[error("invalid response from provider: {message}")]
    InvalidResponse { message: String },

    /// The returned series failed validation.
    #[error(transparent)]
    Analysis(#[from] coinwatch_core::AnalysisError),

    /// Network or HTTP client error.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// JSON parsing error.
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),
}
