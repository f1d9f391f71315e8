//! HTTP backend abstraction for provider APIs.
//!
//! A trait-based backend allows dependency injection and testing without a
//! network. The production implementation uses reqwest with exponential
//! backoff for transient errors; market-data APIs rate-limit aggressively,
//! so 429 is retried alongside 5xx.

use crate::config::ProviderConfig;
use crate::error::{ApiError, ApiResult};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

/// Trait for HTTP backends that fetch JSON from URLs.
///
/// Clients are generic over the backend; production wiring uses
/// [`ReqwestBackend`], tests use the canned fake in [`testing`].
#[async_trait]
pub trait HttpBackend: Send + Sync {
    /// Fetch JSON from a URL and deserialize it.
    async fn get_json<T: DeserializeOwned + Send>(&self, url: &Url) -> ApiResult<T>;
}

/// Production HTTP backend using reqwest with retry logic.
pub struct ReqwestBackend {
    client: reqwest::Client,
    max_retries: u8,
    retry_base_delay_ms: u64,
    api_key: Option<(&'static str, String)>,
}

impl ReqwestBackend {
    /// Create a backend from a provider config.
    pub fn new(config: &ProviderConfig) -> ApiResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            max_retries: config.max_retries,
            retry_base_delay_ms: config.retry_base_delay_ms,
            api_key: config
                .api_key
                .clone()
                .map(|key| (config.api_key_header, key)),
        })
    }

    fn build_request(&self, url: &Url) -> reqwest::RequestBuilder {
        let mut request = self.client.get(url.as_str());
        if let Some((header, key)) = &self.api_key {
            request = request.header(*header, key);
        }
        request
    }

    /// Fetch a URL, retrying network errors, 5xx, and 429 with backoff.
    async fn fetch_with_retry(&self, url: &Url) -> ApiResult<reqwest::Response> {
        let mut last_error: Option<ApiError> = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                let delay = Duration::from_millis(
                    self.retry_base_delay_ms * 2u64.pow(u32::from(attempt) - 1),
                );
                tokio::time::sleep(delay).await;
            }

            match self.build_request(url).send().await {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        return Ok(response);
                    }

                    if status.as_u16() == 429 {
                        if attempt < self.max_retries {
                            tracing::warn!(url = %url, attempt, "rate limited, backing off");
                            last_error = Some(ApiError::RateLimited {
                                url: url.to_string(),
                            });
                            continue;
                        }
                        return Err(ApiError::RateLimited {
                            url: url.to_string(),
                        });
                    }

                    // 5xx is a server-side issue and worth retrying
                    if status.is_server_error() && attempt < self.max_retries {
                        last_error = Some(ApiError::RequestFailed {
                            status: status.as_u16(),
                            url: url.to_string(),
                        });
                        continue;
                    }

                    // 404 on a coin path means the coin ID is wrong, not the request
                    if status.as_u16() == 404 {
                        if let Some(coin_id) = extract_coin_id_from_path(url.path()) {
                            return Err(ApiError::CoinNotFound {
                                provider: "coingecko",
                                coin_id,
                            });
                        }
                    }

                    return Err(ApiError::RequestFailed {
                        status: status.as_u16(),
                        url: url.to_string(),
                    });
                }
                Err(e) => {
                    if attempt < self.max_retries {
                        last_error = Some(e.into());
                        continue;
                    }
                    return Err(e.into());
                }
            }
        }

        Err(last_error.unwrap_or_else(|| ApiError::InvalidResponse {
            message: "unknown error during fetch".to_string(),
        }))
    }
}

/// Try to extract a coin ID from a CoinGecko coin path.
fn extract_coin_id_from_path(path: &str) -> Option<String> {
    let path = path.trim_start_matches('/');
    let rest = path.strip_prefix("api/v3/coins/")?;
    let id = rest.split('/').next()?;
    if id.is_empty() || id == "markets" {
        return None;
    }
    Some(id.to_string())
}

#[async_trait]
impl HttpBackend for ReqwestBackend {
    async fn get_json<T: DeserializeOwned + Send>(&self, url: &Url) -> ApiResult<T> {
        let response = self.fetch_with_retry(url).await?;
        let data: T = response.json().await?;
        Ok(data)
    }
}

// ============================================================================
// Fake backend for testing
// ============================================================================
