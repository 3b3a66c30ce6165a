//! Cache eviction and memory accounting
//!
//! LRU eviction and memory management operations
//! using lock-free patterns for concurrent cache maintenance.

use std::{sync::atomic::Ordering, time::Instant};

use super::core::ResponseCache;

impl ResponseCache {
    /// Evict least recently used entries to free space
    /// Returns the number of entries actually evicted
    pub(super) fn evict_lru_entries(&self) -> u32 {
        let mut candidates: Vec<(String, Instant)> = self
            .entries
            .iter()
            .map(|entry_ref| (entry_ref.key().clone(), entry_ref.value().last_accessed()))
            .collect();

        // Oldest first
        candidates.sort_by_key(|(_, last_accessed)| *last_accessed);

        // Evict oldest 25% of entries or until under limits
        let target_evictions = (candidates.len() / 4).max(1);
        let mut evicted_count = 0;

        for (key, _) in candidates.iter().take(target_evictions) {
            if self.remove_key(key) {
                self.stats.record_eviction();
                evicted_count += 1;

                if self.within_limits(0) {
                    break;
                }
            }
        }

        evicted_count
    }

    /// Whether one more entry of `incoming_bytes` fits without eviction
    pub(super) fn within_limits(&self, incoming_bytes: u64) -> bool {
        let current_memory = self.memory_usage.load(Ordering::Relaxed);
        let current_entries = usize::try_from(self.entry_count.load(Ordering::Relaxed)).unwrap_or(usize::MAX);
        current_memory + incoming_bytes <= self.config.max_memory_bytes
            && current_entries < self.config.max_entries
    }

    /// Remove `key` and release its accounting; false if it was absent
    pub(super) fn remove_key(&self, key: &str) -> bool {
        match self.entries.remove(key) {
            Some(removed) => {
                self.entry_count.fetch_sub(1, Ordering::Relaxed);
                self.memory_usage
                    .fetch_sub(removed.value().size_bytes, Ordering::Relaxed);
                true
            }
            None => false,
        }
    }
}
