// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! In-memory cache with a uniform time-to-live

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;

use super::CacheStats;

/// Entry in the TTL cache
#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    expires_at: Instant,
}

impl<V> CacheEntry<V> {
    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Internal state for the TTL cache
#[derive(Debug)]
struct TtlCacheState<K, V> {
    entries: HashMap<K, CacheEntry<V>>,
    stats: CacheStats,
}

impl<K, V> Default for TtlCacheState<K, V> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
            stats: CacheStats::default(),
        }
    }
}

/// Keyed cache whose entries expire a fixed duration after being written
///
/// - Reads never extend an entry's lifetime
/// - Writing a key replaces its value and restarts its TTL
/// - An entry read at or after its expiry behaves exactly like a key that was
///   never written; it is removed on that read (no background sweeping)
/// - Keys are independent: removing or expiring one never touches another
///
/// Time comes from `tokio::time`, so tests can pause and advance the clock.
/// Create one instance at startup and share it behind an `Arc`; it needs no
/// teardown.
///
/// # Performance
///
/// - Get: O(1) average case (HashMap lookup)
/// - Insert: O(1)
pub struct TtlCache<K, V> {
    ttl: Duration,
    state: Mutex<TtlCacheState<K, V>>,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash + Clone + fmt::Debug,
    V: Clone,
{
    /// Creates an empty cache with the given TTL
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            state: Mutex::new(TtlCacheState::default()),
        }
    }

    /// The TTL applied to every entry
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the cached value, or `None` if absent or expired
    pub async fn get(&self, key: &K) -> Option<V> {
        let now = Instant::now();
        let mut guard = self.state.lock().await;
        let state = &mut *guard;

        match state.entries.get(key) {
            Some(entry) if !entry.is_expired(now) => {
                state.stats.hits += 1;
                debug!(?key, "Cache hit");
                return Some(entry.value.clone());
            }
            Some(_) => {
                state.entries.remove(key);
                state.stats.expirations += 1;
                state.stats.entries = state.entries.len();
                debug!(?key, "Cache entry expired");
            }
            None => debug!(?key, "Cache miss"),
        }
        state.stats.misses += 1;

        None
    }

    /// Stores `value` under `key`, expiring `ttl` from now
    pub async fn insert(&self, key: K, value: V) {
        let expires_at = Instant::now() + self.ttl;
        let mut state = self.state.lock().await;

        debug!(?key, ttl = ?self.ttl, "Caching value");
        state.entries.insert(key, CacheEntry { value, expires_at });
        state.stats.entries = state.entries.len();
    }

    /// Removes `key`, returning its value if it was present and unexpired
    pub async fn remove(&self, key: &K) -> Option<V> {
        let now = Instant::now();
        let mut state = self.state.lock().await;

        let removed = state.entries.remove(key);
        state.stats.entries = state.entries.len();
        removed
            .filter(|entry| !entry.is_expired(now))
            .map(|entry| entry.value)
    }

    /// Removes every entry
    pub async fn clear(&self) {
        let mut state = self.state.lock().await;
        debug!(entries = state.entries.len(), "Clearing cache");
        state.entries.clear();
        state.stats.entries = 0;
    }

    /// Number of stored entries, including expired ones not yet evicted
    pub async fn len(&self) -> usize {
        self.state.lock().await.entries.len()
    }

    /// Whether no entries are stored
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Returns current cache statistics
    pub async fn stats(&self) -> CacheStats {
        self.state.lock().await.stats.clone()
    }
}

impl<K, V> fmt::Debug for TtlCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TtlCache").field("ttl", &self.ttl).finish()
    }
}
