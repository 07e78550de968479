//! Route resolution caching.
//!
//! [`RouteCache`] remembers how a path resolved so repeated navigations to
//! the same target skip the table walk. It is gated behind the `cache`
//! feature flag and uses the [`lru`] crate internally.
//!
//! The route table is immutable, so cached entries never go stale. The
//! router only clears the cache when asked to.
//!
//! [`CacheStats`] tracks hits and misses so you can check whether the cache
//! earns its keep.
//!
//! # Examples
//!
//! ```
//! use guard_navigator::cache::RouteCache;
//! use guard_navigator::{Resolved, RouteParams};
//!
//! let mut cache = RouteCache::new();
//! assert!(cache.get("/home").is_none());
//!
//! cache.insert("/home".to_string(), Resolved {
//!     index: 0,
//!     path: "/home".into(),
//!     params: RouteParams::new(),
//!     redirected_from: None,
//!     is_fallback: false,
//! });
//! assert_eq!(cache.get("/home").unwrap().index, 0);
//! assert_eq!(cache.stats().hits, 1);
//! assert_eq!(cache.stats().misses, 1);
//! ```

use crate::table::Resolved;
use crate::{debug_log, trace_log};
use lru::LruCache;
use std::num::NonZeroUsize;

/// Counters tracking cache hit/miss rates and invalidations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of lookups answered from the cache.
    pub hits: usize,
    /// Number of lookups that fell through to the table.
    pub misses: usize,
    /// Number of full cache invalidations (via [`RouteCache::clear`]).
    pub invalidations: usize,
}

impl CacheStats {
    /// Return the hit rate as a value in `0.0..=1.0`.
    ///
    /// Returns `0.0` if no lookups have been performed.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// LRU cache from normalized path to its [`Resolved`] route.
#[derive(Debug)]
pub struct RouteCache {
    entries: LruCache<String, Resolved>,
    stats: CacheStats,
}

impl RouteCache {
    /// Default number of cached paths.
    pub const DEFAULT_CAPACITY: usize = 1000;

    /// Create a cache with the default capacity.
    pub fn new() -> Self {
        Self::with_capacity(NonZeroUsize::new(Self::DEFAULT_CAPACITY).unwrap_or(NonZeroUsize::MIN))
    }

    /// Create a cache holding at most `capacity` paths.
    pub fn with_capacity(capacity: NonZeroUsize) -> Self {
        Self {
            entries: LruCache::new(capacity),
            stats: CacheStats::default(),
        }
    }

    /// Look up a normalized path. Updates hit/miss stats.
    pub fn get(&mut self, path: &str) -> Option<Resolved> {
        if let Some(resolved) = self.entries.get(path) {
            self.stats.hits += 1;
            trace_log!("Route cache hit for '{}'", path);
            Some(resolved.clone())
        } else {
            self.stats.misses += 1;
            trace_log!("Route cache miss for '{}'", path);
            None
        }
    }

    /// Remember how `path` resolved, evicting the least recently used entry
    /// when full.
    pub fn insert(&mut self, path: String, resolved: Resolved) {
        trace_log!("Caching '{}' -> route #{}", path, resolved.index);
        self.entries.push(path, resolved);
    }

    /// Drop every entry and increment the invalidation counter.
    pub fn clear(&mut self) {
        let removed = self.entries.len();
        self.entries.clear();
        self.stats.invalidations += 1;
        debug_log!(
            "Route cache cleared: {} entries removed ({} invalidations, hit rate {:.1}%)",
            removed,
            self.stats.invalidations,
            self.stats.hit_rate() * 100.0
        );
    }

    /// Current statistics.
    pub const fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Reset all counters to zero.
    pub fn reset_stats(&mut self) {
        self.stats = CacheStats::default();
    }

    /// Number of cached paths.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Return `true` if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of cached paths.
    pub fn capacity(&self) -> usize {
        self.entries.cap().get()
    }
}

impl Default for RouteCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::RouteParams;

    fn resolved(index: usize, path: &str) -> Resolved {
        Resolved {
            index,
            path: path.to_string(),
            params: RouteParams::new(),
            redirected_from: None,
            is_fallback: false,
        }
    }

    #[test]
    fn test_cache_creation() {
        let cache = RouteCache::new();
        assert!(cache.is_empty());
        assert_eq!(cache.capacity(), RouteCache::DEFAULT_CAPACITY);
        assert_eq!(cache.stats(), &CacheStats::default());
    }

    #[test]
    fn test_cache_clear() {
        let mut cache = RouteCache::new();
        cache.insert("/home".to_string(), resolved(0, "/home"));
        assert_eq!(cache.len(), 1);

        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.stats().invalidations, 1);
    }

    #[test]
    fn test_lru_eviction() {
        let mut cache = RouteCache::with_capacity(NonZeroUsize::new(2).unwrap());
        cache.insert("/a".to_string(), resolved(0, "/a"));
        cache.insert("/b".to_string(), resolved(1, "/b"));
        cache.get("/a");
        cache.insert("/c".to_string(), resolved(2, "/c"));

        assert!(cache.get("/a").is_some());
        assert!(cache.get("/b").is_none());
        assert!(cache.get("/c").is_some());
    }

    #[test]
    fn test_hit_rate_calculation() {
        let mut cache = RouteCache::new();
        cache.get("/a");
        cache.get("/b");
        cache.get("/c");

        cache.insert("/a".to_string(), resolved(0, "/a"));
        cache.insert("/b".to_string(), resolved(1, "/b"));

        cache.get("/a");
        cache.get("/b");

        assert_eq!(cache.stats().hits, 2);
        assert_eq!(cache.stats().misses, 3);
        assert!((cache.stats().hit_rate() - 0.4).abs() < 0.001);

        cache.reset_stats();
        assert_eq!(cache.stats().hits, 0);
    }
}
