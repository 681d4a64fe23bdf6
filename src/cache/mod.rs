// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Time-bounded caching for computed supply metrics.
//!
//! - [`TtlCache`]: keyed in-memory store where every entry expires a fixed
//!   duration after it was written
//! - [`CacheStats`]: hit/miss/expiration counters for logging
//!
//! # Examples
//!
//! ```rust
//! use supplyscan::cache::TtlCache;
//! use std::time::Duration;
//!
//! # async fn example() {
//! let cache: TtlCache<&'static str, u64> = TtlCache::new(Duration::from_secs(600));
//! cache.insert("supply", 42).await;
//! assert_eq!(cache.get(&"supply").await, Some(42));
//! # }
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

mod ttl;

pub use ttl::TtlCache;

/// Statistics about cache performance
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    /// Number of cache hits (successful retrievals)
    pub hits: u64,
    /// Number of cache misses (key absent or expired)
    pub misses: u64,
    /// Number of entries dropped because their TTL elapsed
    pub expirations: u64,
    /// Current number of entries in the cache
    pub entries: usize,
}

impl CacheStats {
    /// Calculates the cache hit rate as a percentage (0.0 to 100.0)
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            (self.hits as f64 / total as f64) * 100.0
        }
    }
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hits={}, misses={}, expirations={}, entries={}, hit_rate={:.1}%",
            self.hits,
            self.misses,
            self.expirations,
            self.entries,
            self.hit_rate()
        )
    }
}
