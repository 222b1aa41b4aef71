//! Coalesced fetching for list refreshes.
//!
//! A [`CoalescingFetcher`] wraps any async loader and provides:
//! - **Single flight**: concurrent `fetch()` calls share one load
//! - **Minimum interval**: a fetch soon after a successful load is served
//!   from the cached value
//! - **Trailing debounce**: a burst of `request()` calls triggers one load
//!   after the burst goes quiet
//!
//! The latest loaded value is published on a `watch` channel.

use std::fmt::Display;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use futures::future::{BoxFuture, FutureExt, Shared};
use tokio::sync::{watch, Mutex};
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::types::{GuardError, Result};

type LoadResult<T> = std::result::Result<T, String>;
type Loader<T> = Arc<dyn Fn() -> BoxFuture<'static, LoadResult<T>> + Send + Sync>;
type InFlight<T> = Shared<BoxFuture<'static, LoadResult<T>>>;

/// Timing for a [`CoalescingFetcher`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoalesceConfig {
    /// Successful loads are reused for this long
    pub min_interval: Duration,
    /// Quiet period after the last `request()` before loading
    pub debounce: Duration,
}

impl Default for CoalesceConfig {
    fn default() -> Self {
        Self {
            min_interval: Duration::from_secs(2),
            debounce: Duration::from_millis(300),
        }
    }
}

struct FetchState<T> {
    in_flight: Option<InFlight<T>>,
    cached: Option<(T, Instant)>,
}

struct Inner<T> {
    loader: Loader<T>,
    config: CoalesceConfig,
    state: Mutex<FetchState<T>>,
    generation: AtomicU64,
    latest: watch::Sender<Option<T>>,
}

/// Single-flight, rate-limited, debounced wrapper around an async loader.
///
/// Cheap to clone; clones share state.
pub struct CoalescingFetcher<T> {
    inner: Arc<Inner<T>>,
}

impl<T> Clone for CoalescingFetcher<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> CoalescingFetcher<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new<F, Fut, E>(config: CoalesceConfig, loader: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = std::result::Result<T, E>> + Send + 'static,
        E: Display + Send + 'static,
    {
        let loader: Loader<T> = Arc::new(move || {
            let load = loader();
            async move { load.await.map_err(|e| e.to_string()) }.boxed()
        });
        let (latest, _) = watch::channel(None);

        Self {
            inner: Arc::new(Inner {
                loader,
                config,
                state: Mutex::new(FetchState {
                    in_flight: None,
                    cached: None,
                }),
                generation: AtomicU64::new(0),
                latest,
            }),
        }
    }

    /// Load, join an in-flight load, or return a fresh cached value.
    pub async fn fetch(&self) -> Result<T> {
        let load = {
            let mut state = self.inner.state.lock().await;
            if let Some(load) = &state.in_flight {
                debug!("Joining in-flight fetch");
                load.clone()
            } else {
                if let Some((value, loaded_at)) = &state.cached {
                    if loaded_at.elapsed() < self.inner.config.min_interval {
                        debug!("Serving cached value inside minimum interval");
                        return Ok(value.clone());
                    }
                }
                let load = (self.inner.loader)().shared();
                state.in_flight = Some(load.clone());
                load
            }
        };

        let result = load.clone().await;
        self.finish(&load, &result).await;
        result.map_err(GuardError::Fetch)
    }

    /// The first caller to finish a load records its outcome.
    async fn finish(&self, load: &InFlight<T>, result: &LoadResult<T>) {
        let mut state = self.inner.state.lock().await;
        let owns = state
            .in_flight
            .as_ref()
            .is_some_and(|current| current.ptr_eq(load));
        if !owns {
            return;
        }
        state.in_flight = None;
        match result {
            Ok(value) => {
                state.cached = Some((value.clone(), Instant::now()));
                self.inner.latest.send_replace(Some(value.clone()));
            }
            Err(e) => warn!(error = %e, "Fetch failed"),
        }
    }

    /// Schedule a load after the debounce period.
    ///
    /// Each call restarts the period; only the last call in a burst loads.
    /// Must be called from within a tokio runtime.
    pub fn request(&self) {
        let generation = self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let fetcher = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(fetcher.inner.config.debounce).await;
            if fetcher.inner.generation.load(Ordering::SeqCst) != generation {
                return;
            }
            if let Err(e) = fetcher.fetch().await {
                warn!(error = %e, "Debounced fetch failed");
            }
        });
    }

    /// Drop the cached value so the next fetch loads.
    pub async fn invalidate(&self) {
        self.inner.state.lock().await.cached = None;
    }

    /// Most recent successfully loaded value.
    pub fn latest(&self) -> Option<T> {
        self.inner.latest.borrow().clone()
    }

    /// Watch successive loaded values.
    pub fn subscribe(&self) -> watch::Receiver<Option<T>> {
        self.inner.latest.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use tokio_test::{assert_err, assert_ok};

    fn counting_fetcher(config: CoalesceConfig) -> (CoalescingFetcher<usize>, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let fetcher = CoalescingFetcher::new(config, move || {
            let counter = counter.clone();
            async move {
                tokio::time::sleep(Duration::from_millis(100)).await;
                Ok::<_, String>(counter.fetch_add(1, Ordering::SeqCst) + 1)
            }
        });
        (fetcher, calls)
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_fetches_share_one_load() {
        let (fetcher, calls) = counting_fetcher(CoalesceConfig::default());

        let (a, b, c) = tokio::join!(fetcher.fetch(), fetcher.fetch(), fetcher.fetch());
        assert_eq!(assert_ok!(a), 1);
        assert_eq!(assert_ok!(b), 1);
        assert_eq!(assert_ok!(c), 1);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_min_interval_serves_cache() {
        let config = CoalesceConfig {
            min_interval: Duration::from_secs(2),
            ..CoalesceConfig::default()
        };
        let (fetcher, calls) = counting_fetcher(config);

        assert_eq!(assert_ok!(fetcher.fetch().await), 1);
        assert_eq!(assert_ok!(fetcher.fetch().await), 1);
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        tokio::time::advance(Duration::from_secs(3)).await;
        assert_eq!(assert_ok!(fetcher.fetch().await), 2);

        fetcher.invalidate().await;
        assert_eq!(assert_ok!(fetcher.fetch().await), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_request_debounces_burst() {
        let config = CoalesceConfig {
            min_interval: Duration::ZERO,
            debounce: Duration::from_millis(50),
        };
        let (fetcher, calls) = counting_fetcher(config);
        let mut updates = fetcher.subscribe();

        for _ in 0..5 {
            fetcher.request();
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        assert_ok!(updates.changed().await);
        assert_eq!(*updates.borrow(), Some(1));
        assert_eq!(fetcher.latest(), Some(1));

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_fetch_is_not_cached() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let fetcher = CoalescingFetcher::new(CoalesceConfig::default(), move || {
            let attempt = counter.fetch_add(1, Ordering::SeqCst);
            async move {
                if attempt == 0 {
                    Err("connection reset")
                } else {
                    Ok(attempt)
                }
            }
        });

        let err = assert_err!(fetcher.fetch().await);
        assert!(matches!(err, GuardError::Fetch(ref msg) if msg == "connection reset"));
        assert_eq!(fetcher.latest(), None);

        assert_eq!(assert_ok!(fetcher.fetch().await), 1);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
