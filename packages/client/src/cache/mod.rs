//! In-memory HTTP response cache behind the fetch-style transport
//!
//! This module provides a concurrent response cache using:
//! - Lock-free `SkipMap` for concurrent operations
//! - Atomic counters for statistics and cache management
//! - Freshness from `Cache-Control`, `Expires` and a default TTL
//! - LRU eviction using access timestamps
//! - [`CachedFetch`], which applies the six fetch cache directives

pub mod cache_config;
pub mod cache_entry;
pub mod cache_integration;
pub mod cache_key;
pub mod cache_stats;
pub mod http_date;
pub mod response_cache;

pub use cache_config::CacheConfig;
pub use cache_entry::CacheEntry;
pub use cache_integration::CachedFetch;
pub use cache_key::CacheKey;
pub use cache_stats::CacheStats;
pub use http_date::{HttpDateParseError, httpdate};
pub use response_cache::ResponseCache;
