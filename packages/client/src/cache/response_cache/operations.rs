//! Cache operations for lookup, store, revalidation and invalidation
//!
//! Core caching operations with HTTP semantics and cache-control handling.

use std::sync::atomic::Ordering;

use http::header::CACHE_CONTROL;
use http::{HeaderMap, StatusCode};
use url::Url;

use super::super::{cache_entry::{CacheEntry, has_directive}, cache_key::CacheKey};
use super::core::ResponseCache;

impl ResponseCache {
    /// Stored entry for `key`, fresh or stale, marking it recently used
    pub fn lookup(&self, key: &CacheKey) -> Option<CacheEntry> {
        let stored = self.entries.get(&key.storage_key())?;
        stored.value().record_hit();
        Some(stored.value().clone())
    }

    /// Check if a response may be stored
    #[must_use]
    pub fn should_store(&self, status: StatusCode, headers: &HeaderMap) -> bool {
        if !self.config.is_enabled() {
            return false;
        }

        if !status.is_success() || status == StatusCode::PARTIAL_CONTENT {
            return false;
        }

        if let Some(cache_control) = headers.get(CACHE_CONTROL).and_then(|v| v.to_str().ok())
            && has_directive(cache_control, "no-store")
        {
            tracing::debug!(
                target: "niupee::cache",
                cache_control,
                "Response marked as not storable by Cache-Control header"
            );
            return false;
        }

        true
    }

    /// Store `entry` under `key`, evicting least recently used entries as needed
    pub fn store(&self, key: &CacheKey, entry: CacheEntry) {
        if !self.config.is_enabled() {
            return; // Caching disabled
        }

        if entry.size_bytes > self.config.max_memory_bytes {
            tracing::debug!(
                target: "niupee::cache",
                entry_size = entry.size_bytes,
                max_memory = self.config.max_memory_bytes,
                "Response larger than the whole cache, not storing"
            );
            return;
        }

        let storage_key = key.storage_key();
        self.remove_key(&storage_key);

        while !self.within_limits(entry.size_bytes) {
            let evicted = self.evict_lru_entries();
            tracing::debug!(
                target: "niupee::cache",
                evicted_count = evicted,
                current_memory = self.memory_usage.load(Ordering::Relaxed),
                entry_size = entry.size_bytes,
                "Cache evicted entries to make room"
            );
            if evicted == 0 {
                break;
            }
        }

        self.entry_count.fetch_add(1, Ordering::Relaxed);
        self.memory_usage
            .fetch_add(entry.size_bytes, Ordering::Relaxed);
        self.entries.insert(storage_key, entry);
    }

    /// Apply a `304 Not Modified` to the stored entry and return the refreshed entry
    pub fn refresh(&self, key: &CacheKey, not_modified: &HeaderMap) -> Option<CacheEntry> {
        let mut entry = self.entries.get(&key.storage_key())?.value().clone();
        entry.refresh(not_modified, self.config.default_ttl);
        // Goes through `store` so the entry count and memory stay accounted
        self.store(key, entry.clone());
        Some(entry)
    }

    /// Drop every entry stored for `url`, whatever its method or keyed headers
    pub fn invalidate_url(&self, url: &Url) -> usize {
        let mut url = url.clone();
        url.set_fragment(None);

        let keys: Vec<String> = self
            .entries
            .iter()
            .filter(|entry_ref| entry_ref.value().url == url.as_str())
            .map(|entry_ref| entry_ref.key().clone())
            .collect();

        let removed = keys.iter().filter(|key| self.remove_key(key)).count();
        if removed > 0 {
            tracing::debug!(target: "niupee::cache", %url, removed, "invalidated cache entries");
        }
        removed
    }
}
