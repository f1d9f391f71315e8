//! Centralized provider routing.
//!
//! Every data request goes through the router, which picks a provider per
//! operation: providers advertising a matching specialization are tried
//! first (in registration order), then the rest as fallback. Failures are
//! recorded and the next candidate is tried, so a rate-limited provider
//! degrades service instead of breaking it.

use crate::error::{ApiError, ApiResult};
use crate::provider::{MarketDataProvider, Operation};
use chrono::{DateTime, Utc};
use coinwatch_core::{MarketSnapshot, OhlcCandle, PricePoint};
use serde::Serialize;
use std::sync::{Arc, Mutex};

/// Health and usage counters for one registered provider.
#[derive(Debug, Clone, Serialize)]
pub struct ProviderStatus {
    pub name: &'static str,
    /// Whether the provider initialized (e.g. had its API key).
    pub available: bool,
    pub specializations: Vec<Operation>,
    pub last_check: DateTime<Utc>,
    pub last_error: Option<String>,
    pub calls: u64,
    pub failures: u64,
}

struct Registered {
    provider: Arc<dyn MarketDataProvider>,
    status: Mutex<ProviderStatus>,
}

/// Routes operations across registered providers.
#[derive(Default)]
pub struct ProviderRouter {
    providers: Vec<Registered>,
}

impl ProviderRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a provider. `init_error` marks it unavailable with a reason
    /// (a CoinMarketCap client without an API key registers this way so
    /// `status` can explain why it is never called).
    pub fn register(
        &mut self,
        provider: Arc<dyn MarketDataProvider>,
        init_error: Option<String>,
    ) {
        let status = ProviderStatus {
            name: provider.name(),
            available: init_error.is_none(),
            specializations: provider.specializations().to_vec(),
            last_check: Utc::now(),
            last_error: init_error,
            calls: 0,
            failures: 0,
        };
        self.providers.push(Registered {
            provider,
            status: Mutex::new(status),
        });
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Snapshot of every provider's status.
    pub fn statuses(&self) -> Vec<ProviderStatus> {
        self.providers
            .iter()
            .map(|r| r.status.lock().unwrap().clone())
            .collect()
    }

    /// Candidates for an operation: available specialists first, then the
    /// remaining available providers as fallback.
    fn ordered_for(&self, op: Operation) -> Vec<&Registered> {
        let available =
            |r: &&Registered| r.status.lock().unwrap().available;
        let mut ordered: Vec<&Registered> = self
            .providers
            .iter()
            .filter(available)
            .filter(|r| r.provider.specializations().contains(&op))
            .collect();
        ordered.extend(
            self.providers
                .iter()
                .filter(available)
                .filter(|r| !r.provider.specializations().contains(&op)),
        );
        ordered
    }

    fn record_attempt(registered: &Registered, result: Result<(), &ApiError>) {
        let mut status = registered.status.lock().unwrap();
        status.calls += 1;
        status.last_check = Utc::now();
        match result {
            Ok(()) => status.last_error = None,
            Err(e) => {
                status.failures += 1;
                status.last_error = Some(e.to_string());
            }
        }
    }

    fn exhausted(op: Operation, last: Option<ApiError>) -> ApiError {
        ApiError::NoProviderAvailable {
            operation: op.as_str(),
            detail: last.map_or_else(
                || "no available provider registered".to_string(),
                |e| e.to_string(),
            ),
        }
    }

    /// Current quotes from one named provider, bypassing specialization
    /// order. Unavailable or unknown providers are an error.
    pub async fn market_snapshots_via(
        &self,
        name: &str,
        symbols: &[String],
    ) -> ApiResult<Vec<MarketSnapshot>> {
        let registered = self
            .providers
            .iter()
            .find(|r| r.provider.name() == name)
            .filter(|r| r.status.lock().unwrap().available)
            .ok_or_else(|| ApiError::NoProviderAvailable {
                operation: Operation::BulkQuotes.as_str(),
                detail: format!("provider '{name}' is not registered or unavailable"),
            })?;

        let result = registered.provider.market_snapshots(symbols).await;
        Self::record_attempt(registered, result.as_ref().map(|_| ()));
        result
    }

    /// Current quotes for the given symbols.
    pub async fn market_snapshots(&self, symbols: &[String]) -> ApiResult<Vec<MarketSnapshot>> {
        let op = Operation::BulkQuotes;
        let mut last_error = None;
        for registered in self.ordered_for(op) {
            match registered.provider.market_snapshots(symbols).await {
                Ok(snapshots) => {
                    Self::record_attempt(registered, Ok(()));
                    return Ok(snapshots);
                }
                Err(e) => {
                    tracing::warn!(provider = registered.provider.name(), error = %e, "snapshot fetch failed, trying next provider");
                    Self::record_attempt(registered, Err(&e));
                    last_error = Some(e);
                }
            }
        }
        Err(Self::exhausted(op, last_error))
    }

    /// Historical price series covering the trailing `hours`.
    pub async fn price_series(&self, symbol: &str, hours: i64) -> ApiResult<Vec<PricePoint>> {
        let op = Operation::HistoricalSeries;
        let mut last_error = None;
        for registered in self.ordered_for(op) {
            match registered.provider.price_series(symbol, hours).await {
                Ok(points) => {
                    Self::record_attempt(registered, Ok(()));
                    return Ok(points);
                }
                Err(e) => {
                    Self::record_attempt(registered, Err(&e));
                    last_error = Some(e);
                }
            }
        }
        Err(Self::exhausted(op, last_error))
    }

    /// Validated OHLC candles.
    pub async fn ohlc(&self, symbol: &str, days: u32) -> ApiResult<Vec<OhlcCandle>> {
        let op = Operation::Ohlc;
        let mut last_error = None;
        for registered in self.ordered_for(op) {
            match registered.provider.ohlc(symbol, days).await {
                Ok(candles) => {
                    Self::record_attempt(registered, Ok(()));
                    return Ok(candles);
                }
                Err(e) => {
                    Self::record_attempt(registered, Err(&e));
                    last_error = Some(e);
                }
            }
        }
        Err(Self::exhausted(op, last_error))
    }

    /// 7-day sparkline prices.
    pub async fn sparkline(&self, symbol: &str) -> ApiResult<Vec<f64>> {
        let op = Operation::Sparkline;
        let mut last_error = None;
        for registered in self.ordered_for(op) {
            match registered.provider.sparkline(symbol).await {
                Ok(prices) => {
                    Self::record_attempt(registered, Ok(()));
                    return Ok(prices);
                }
                Err(e) => {
                    Self::record_attempt(registered, Err(&e));
                    last_error = Some(e);
                }
            }
        }
        Err(Self::exhausted(op, last_error))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Utc;
    use std::sync::atomic::{AtomicU64, Ordering};

    struct StubProvider {
        name: &'static str,
        specs: &'static [Operation],
        fail: bool,
        snapshot_calls: AtomicU64,
    }

    impl StubProvider {
        fn new(name: &'static str, specs: &'static [Operation], fail: bool) -> Arc<Self> {
            Arc::new(Self {
                name,
                specs,
                fail,
                snapshot_calls: AtomicU64::new(0),
            })
        }

        fn snapshot(&self) -> MarketSnapshot {
            MarketSnapshot {
                symbol: "BTC".to_string(),
                price: 97_000.0,
                price_change_24h: None,
                volume: None,
                market_cap: None,
                last_updated: Utc::now(),
            }
        }
    }

    #[async_trait]
    impl MarketDataProvider for StubProvider {
        fn name(&self) -> &'static str {
            self.name
        }

        fn specializations(&self) -> &'static [Operation] {
            self.specs
        }

        async fn market_snapshots(&self, _: &[String]) -> ApiResult<Vec<MarketSnapshot>> {
            self.snapshot_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(ApiError::RateLimited {
                    url: "stub".to_string(),
                });
            }
            Ok(vec![self.snapshot()])
        }

        async fn price_series(&self, _: &str, _: i64) -> ApiResult<Vec<PricePoint>> {
            if self.fail {
                return Err(ApiError::Unsupported {
                    provider: self.name,
                    operation: "historical_series",
                });
            }
            Ok(vec![PricePoint {
                price: 1.0,
                timestamp: Utc::now(),
            }])
        }

        async fn ohlc(&self, _: &str, _: u32) -> ApiResult<Vec<OhlcCandle>> {
            Ok(vec![])
        }

        async fn sparkline(&self, _: &str) -> ApiResult<Vec<f64>> {
            Ok(vec![1.0, 2.0])
        }
    }

    const BULK: &[Operation] = &[Operation::BulkQuotes];
    const DETAIL: &[Operation] = &[
        Operation::HistoricalSeries,
        Operation::Ohlc,
        Operation::Sparkline,
    ];

    #[tokio::test]
    async fn specialists_are_preferred() {
        let bulk = StubProvider::new("bulk", BULK, false);
        let detail = StubProvider::new("detail", DETAIL, false);
        let mut router = ProviderRouter::new();
        // Registration order puts the generalist first; specialization wins anyway.
        router.register(detail.clone(), None);
        router.register(bulk.clone(), None);

        router.market_snapshots(&["BTC".to_string()]).await.unwrap();
        assert_eq!(bulk.snapshot_calls.load(Ordering::SeqCst), 1);
        assert_eq!(detail.snapshot_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn falls_back_when_the_specialist_fails() {
        let bulk = StubProvider::new("bulk", BULK, true);
        let detail = StubProvider::new("detail", DETAIL, false);
        let mut router = ProviderRouter::new();
        router.register(bulk.clone(), None);
        router.register(detail.clone(), None);

        let snaps = router.market_snapshots(&["BTC".to_string()]).await.unwrap();
        assert_eq!(snaps.len(), 1);
        assert_eq!(bulk.snapshot_calls.load(Ordering::SeqCst), 1);
        assert_eq!(detail.snapshot_calls.load(Ordering::SeqCst), 1);

        let statuses = router.statuses();
        let bulk_status = statuses.iter().find(|s| s.name == "bulk").unwrap();
        assert_eq!(bulk_status.failures, 1);
        assert!(bulk_status.last_error.as_ref().unwrap().contains("rate limited"));
    }

    #[tokio::test]
    async fn unavailable_providers_are_skipped() {
        let bulk = StubProvider::new("bulk", BULK, false);
        let detail = StubProvider::new("detail", DETAIL, false);
        let mut router = ProviderRouter::new();
        router.register(bulk.clone(), Some("API key missing".to_string()));
        router.register(detail.clone(), None);

        router.market_snapshots(&["BTC".to_string()]).await.unwrap();
        assert_eq!(bulk.snapshot_calls.load(Ordering::SeqCst), 0);
        assert_eq!(detail.snapshot_calls.load(Ordering::SeqCst), 1);

        let statuses = router.statuses();
        let bulk_status = statuses.iter().find(|s| s.name == "bulk").unwrap();
        assert!(!bulk_status.available);
        assert_eq!(
            bulk_status.last_error.as_deref(),
            Some("API key missing")
        );
    }

    #[tokio::test]
    async fn exhausting_all_providers_reports_the_operation() {
        let bulk = StubProvider::new("bulk", BULK, true);
        let mut router = ProviderRouter::new();
        router.register(bulk, None);

        let err = router
            .market_snapshots(&["BTC".to_string()])
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ApiError::NoProviderAvailable { operation: "bulk_quotes", .. }
        ));
    }

    #[tokio::test]
    async fn named_provider_can_be_forced() {
        let bulk = StubProvider::new("bulk", BULK, false);
        let detail = StubProvider::new("detail", DETAIL, false);
        let mut router = ProviderRouter::new();
        router.register(bulk.clone(), None);
        router.register(detail.clone(), None);

        router
            .market_snapshots_via("detail", &["BTC".to_string()])
            .await
            .unwrap();
        assert_eq!(bulk.snapshot_calls.load(Ordering::SeqCst), 0);
        assert_eq!(detail.snapshot_calls.load(Ordering::SeqCst), 1);

        let err = router
            .market_snapshots_via("nope", &["BTC".to_string()])
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::NoProviderAvailable { .. }));
    }

    #[tokio::test]
    async fn empty_router_reports_no_provider() {
        let router = ProviderRouter::new();
        let err = router.sparkline("BTC").await.unwrap_err();
        assert!(matches!(err, ApiError::NoProviderAvailable { .. }));
    }

    #[tokio::test]
    async fn success_counters_accumulate() {
        let detail = StubProvider::new("detail", DETAIL, false);
        let mut router = ProviderRouter::new();
        router.register(detail, None);

        router.sparkline("BTC").await.unwrap();
        router.price_series("BTC", 24).await.unwrap();

        let statuses = router.statuses();
        assert_eq!(statuses[0].calls, 2);
        assert_eq!(statuses[0].failures, 0);
    }
}
