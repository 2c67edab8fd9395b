//! Caching layer for key stores.
//!
//! Wraps a slower store (database, remote service) and keeps resolved lookups
//! in memory for a configurable duration. Writes go through to the inner
//! store and invalidate the cached entry for that key.
//!
//! A lookup that raced with a write is returned to its caller but not
//! cached: every invalidation bumps a write epoch, and a lookup only caches
//! its result if the epoch it started with is still current while it holds
//! the entry lock.
//!
//! # Example
//! ```rust,ignore
//! let store = CachingKeyStore::new(DatabaseKeyStore::new(pool))
//!     .ttl(Duration::from_secs(60));
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::http::security::key::{ApiKey, ApiKeyUpdate};
use crate::http::security::store::{KeyStore, Lookup, StoreError};

struct CachedLookup {
    lookup: Lookup,
    cached_at: Instant,
}

/// Caching wrapper for a `KeyStore`.
///
/// Only `Found` and `Disabled` results are cached, so a key inserted
/// directly into the inner store is visible on the next lookup. Changes made
/// to an existing key behind this wrapper's back become visible once the TTL
/// elapses.
pub struct CachingKeyStore<S>
where
    S: KeyStore,
{
    inner: S,
    cache: DashMap<String, CachedLookup>,
    epoch: AtomicU64,
    ttl: Duration,
}

impl<S> CachingKeyStore<S>
where
    S: KeyStore,
{
    /// Create a new caching store with default TTL (5 minutes).
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            cache: DashMap::new(),
            epoch: AtomicU64::new(0),
            ttl: Duration::from_secs(300),
        }
    }

    /// Set the cache TTL (time-to-live).
    pub fn ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Returns the wrapped store.
    pub fn get_inner(&self) -> &S {
        &self.inner
    }

    /// Clear the cache.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Invalidate a specific key from cache.
    ///
    /// Lookups already in flight will not cache what they read.
    pub fn invalidate(&self, key: &str) {
        self.epoch.fetch_add(1, Ordering::SeqCst);
        self.cache.remove(key);
    }

    /// Number of cached lookups, including stale ones.
    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }

    fn is_fresh(&self, entry: &CachedLookup) -> bool {
        entry.cached_at.elapsed() < self.ttl
    }
}

impl<S> KeyStore for CachingKeyStore<S>
where
    S: KeyStore,
{
    fn lookup(&self, key: &str) -> Result<Lookup, StoreError> {
        let cached = self
            .cache
            .get(key)
            .filter(|entry| self.is_fresh(entry))
            .map(|entry| entry.lookup.clone());
        if let Some(lookup) = cached {
            return Ok(lookup);
        }

        let started = self.epoch.load(Ordering::SeqCst);
        let lookup = self.inner.lookup(key)?;

        // The entry lock orders this against the `remove` in `invalidate`.
        let entry = self.cache.entry(key.to_string());
        let cacheable =
            lookup != Lookup::NotFound && self.epoch.load(Ordering::SeqCst) == started;
        let cached = CachedLookup {
            lookup: lookup.clone(),
            cached_at: Instant::now(),
        };
        match entry {
            Entry::Occupied(mut entry) if cacheable => {
                entry.insert(cached);
            }
            Entry::Occupied(entry) => {
                entry.remove();
            }
            Entry::Vacant(entry) if cacheable => {
                entry.insert(cached);
            }
            Entry::Vacant(_) => {}
        }
        Ok(lookup)
    }

    fn evaluate(&self, key: &ApiKey, resource: &str, action: &str) -> bool {
        self.inner.evaluate(key, resource, action)
    }

    fn insert(&self, key: ApiKey) -> Result<(), StoreError> {
        let id = key.get_key().to_string();
        let result = self.inner.insert(key);
        self.invalidate(&id);
        result
    }

    fn update(&self, key: &str, update: ApiKeyUpdate) -> Result<(), StoreError> {
        let result = self.inner.update(key, update);
        self.invalidate(key);
        result
    }

    fn delete(&self, key: &str) -> Result<(), StoreError> {
        let result = self.inner.delete(key);
        self.invalidate(key);
        result
    }
}
