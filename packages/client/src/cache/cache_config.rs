//! Cache configuration
//!
//! Provides `CacheConfig` for the limits of the fetch-style response cache.

use std::time::Duration;

/// Cache configuration and limits
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// Maximum number of entries in cache; zero disables caching
    pub max_entries: usize,
    /// Maximum memory usage in bytes
    pub max_memory_bytes: u64,
    /// Freshness lifetime for responses without `max-age` or `Expires`
    pub default_ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: 1000,
            max_memory_bytes: 100 * 1024 * 1024,   // 100MB
            default_ttl: Duration::from_secs(300), // 5 minutes
        }
    }
}

impl CacheConfig {
    /// Create no-cache configuration (disabled caching)
    #[must_use]
    pub fn no_cache() -> Self {
        Self {
            max_entries: 0,
            max_memory_bytes: 0,
            default_ttl: Duration::ZERO,
        }
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.max_entries > 0 && self.max_memory_bytes > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_limits_disable_the_cache() {
        assert!(CacheConfig::default().is_enabled());
        assert!(!CacheConfig::no_cache().is_enabled());
        let no_memory = CacheConfig {
            max_memory_bytes: 0,
            ..CacheConfig::default()
        };
        assert!(!no_memory.is_enabled());
    }
}
