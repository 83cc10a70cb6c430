//! Cache statistics

use std::fmt;

/// Snapshot of cache usage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    /// Stored outcomes, fresh or not
    pub entries: usize,
    /// Stored outcomes still inside the freshness window
    pub fresh_entries: usize,
    /// Lookups answered from the cache
    pub hits: u64,
    /// Lookups that needed a fetch
    pub misses: u64,
}

impl CacheStats {
    /// Fraction of lookups served from the cache, 0.0 when nothing was looked up
    pub fn hit_ratio(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            return 0.0;
        }
        self.hits as f64 / total as f64
    }
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} entries ({} fresh), {} hits, {} misses ({:.0}% hit rate)",
            self.entries,
            self.fresh_entries,
            self.hits,
            self.misses,
            self.hit_ratio() * 100.0
        )
    }
}
