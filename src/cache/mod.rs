//! In-process memoization of scan results with a fixed validity window.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};
use tokio::time::Instant;
use tracing::{debug, info};

use crate::metrics::Metrics;
use crate::models::signal::ScanResult;

pub const DEFAULT_TTL: Duration = Duration::from_secs(3600);

/// A computed value and when it was computed.
pub struct CacheEntry<T> {
    pub value: Arc<T>,
    pub computed_at: Instant,
}

impl<T> CacheEntry<T> {
    pub fn is_fresh(&self, ttl: Duration) -> bool {
        self.computed_at.elapsed() < ttl
    }
}

impl<T> Clone for CacheEntry<T> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            computed_at: self.computed_at,
        }
    }
}

/// Holds at most one value, valid for `ttl` after it was computed.
///
/// Values are shared as `Arc<T>` and replaced wholesale, so a reader holds
/// either the old value or the new one, never a mix. Only one refresh runs at
/// a time; callers arriving during a refresh wait for it and reuse its value.
pub struct TtlCache<T> {
    ttl: Duration,
    entry: RwLock<Option<CacheEntry<T>>>,
    refresh_lock: Mutex<()>,
    metrics: Option<Arc<Metrics>>,
}

pub type ScanCache = TtlCache<ScanResult>;

impl<T> TtlCache<T> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entry: RwLock::new(None),
            refresh_lock: Mutex::new(()),
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Return the cached value while fresh, otherwise compute, store and
    /// return a new one.
    pub async fn get_or_refresh<F, Fut>(&self, compute: F) -> Arc<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        if let Some(value) = self.fresh().await {
            self.record_hit();
            return value;
        }

        let _guard = self.refresh_lock.lock().await;

        // another caller may have refreshed while we waited
        if let Some(value) = self.fresh().await {
            self.record_hit();
            return value;
        }

        if let Some(ref metrics) = self.metrics {
            metrics.cache_misses_total.inc();
        }
        debug!(ttl_secs = self.ttl.as_secs(), "Cache: entry missing or expired, recomputing");
        self.store(compute().await).await
    }

    /// Recompute unconditionally and replace the entry.
    pub async fn refresh<F, Fut>(&self, compute: F) -> Arc<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        let _guard = self.refresh_lock.lock().await;
        info!("Cache: forced refresh");
        self.store(compute().await).await
    }

    /// The current value, fresh or stale, without computing.
    pub async fn peek(&self) -> Option<Arc<T>> {
        self.entry.read().await.as_ref().map(|e| e.value.clone())
    }

    /// The current entry, fresh or stale.
    pub async fn entry(&self) -> Option<CacheEntry<T>> {
        self.entry.read().await.clone()
    }

    pub async fn is_fresh(&self) -> bool {
        self.fresh().await.is_some()
    }

    pub async fn invalidate(&self) {
        *self.entry.write().await = None;
    }

    async fn fresh(&self) -> Option<Arc<T>> {
        let entry = self.entry.read().await;
        entry
            .as_ref()
            .filter(|e| e.is_fresh(self.ttl))
            .map(|e| e.value.clone())
    }

    async fn store(&self, value: T) -> Arc<T> {
        let value = Arc::new(value);
        *self.entry.write().await = Some(CacheEntry {
            value: value.clone(),
            computed_at: Instant::now(),
        });
        value
    }

    fn record_hit(&self) {
        if let Some(ref metrics) = self.metrics {
            metrics.cache_hits_total.inc();
        }
    }
}

impl<T> Default for TtlCache<T> {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}
