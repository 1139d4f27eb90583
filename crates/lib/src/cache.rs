//! # Metadata Cache
//!
//! A read-through cache for fetched pages. `CacheStore` is the storage seam
//! (get / set-with-expiry); `ReadThroughCache` layers the fetch-on-miss policy
//! and per-key single-flight on top of any store.

use crate::constants::CACHE_TTL;
use crate::errors::CacheError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex as SyncMutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};
use tokio::time::Instant;
use tracing::debug;

/// A key/value store whose entries expire.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Returns the live value for `key`, or `None` if absent or expired.
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Stores `value` under `key`, replacing any previous entry, expiring after `ttl`.
    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<(), CacheError>;
}

#[derive(Debug, Clone)]
struct CacheEntry {
    value: String,
    expires_at: Instant,
}

/// In-process `CacheStore`. Expired entries are dropped when read and swept
/// on every write.
#[derive(Debug, Default)]
pub struct MemoryCacheStore {
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl MemoryCacheStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl CacheStore for MemoryCacheStore {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                None => return Ok(None),
                Some(entry) if entry.expires_at > Instant::now() => {
                    return Ok(Some(entry.value.clone()))
                }
                Some(_) => {}
            }
        }
        let mut entries = self.entries.write().await;
        if entries
            .get(key)
            .is_some_and(|entry| entry.expires_at <= Instant::now())
        {
            entries.remove(key);
        }
        Ok(None)
    }

    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<(), CacheError> {
        let now = Instant::now();
        let entry = CacheEntry {
            value,
            expires_at: now + ttl,
        };
        let mut entries = self.entries.write().await;
        entries.retain(|_, entry| entry.expires_at > now);
        entries.insert(key.to_string(), entry);
        Ok(())
    }
}

/// Fetch-on-miss policy over a `CacheStore`.
///
/// Concurrent misses on the same key are collapsed: one caller runs the
/// fetch, the others wait on a per-key lock and then read what it stored.
pub struct ReadThroughCache {
    store: Arc<dyn CacheStore>,
    ttl: Duration,
    in_flight: SyncMutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl ReadThroughCache {
    pub fn new(store: Arc<dyn CacheStore>) -> Self {
        Self {
            store,
            ttl: CACHE_TTL,
            in_flight: SyncMutex::new(HashMap::new()),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryCacheStore::new()))
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the cached value for `key`, running `fetch` and storing its
    /// result when there is no live entry. Fetch errors are returned as-is
    /// and nothing is stored.
    pub async fn get_or_fetch<F, Fut, E>(&self, key: &str, fetch: F) -> Result<String, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<String, E>>,
        E: From<CacheError>,
    {
        if let Some(value) = self.store.get(key).await? {
            debug!("Cache hit for {key}");
            return Ok(value);
        }

        let slot = self.key_lock(key);
        let _held = slot.lock.lock().await;
        self.fetch_and_store(key, fetch).await
    }

    async fn fetch_and_store<F, Fut, E>(&self, key: &str, fetch: F) -> Result<String, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<String, E>>,
        E: From<CacheError>,
    {
        // Another caller may have filled the entry while we waited.
        if let Some(value) = self.store.get(key).await? {
            debug!("Cache filled by concurrent fetch for {key}");
            return Ok(value);
        }
        debug!("Cache miss for {key}");
        let value = fetch().await?;
        self.store.set(key, value.clone(), self.ttl).await?;
        Ok(value)
    }

    fn key_lock<'a>(&'a self, key: &'a str) -> KeyLock<'a> {
        let lock = self
            .lock_in_flight()
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        KeyLock {
            cache: self,
            key,
            lock,
        }
    }

    fn lock_in_flight(&self) -> MutexGuard<'_, HashMap<String, Arc<Mutex<()>>>> {
        self.in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

/// A caller's claim on a per-key lock. Dropping it, including when the
/// caller's future is cancelled, removes the map entry once no other caller
/// holds the same lock.
struct KeyLock<'a> {
    cache: &'a ReadThroughCache,
    key: &'a str,
    lock: Arc<Mutex<()>>,
}

impl Drop for KeyLock<'_> {
    fn drop(&mut self) {
        let mut in_flight = self.cache.lock_in_flight();
        // One reference in the map plus ours means nobody else is waiting.
        if Arc::strong_count(&self.lock) <= 2 {
            in_flight.remove(self.key);
        }
    }
}
