//! Response cache modules
//!
//! Lock-free fetch-style response cache.
//!
//! The functionality is organized into logical modules:
//!
//! - `core`: `ResponseCache` struct and basic initialization
//! - `operations`: lookup/store/refresh/invalidate with HTTP semantics
//! - `eviction`: LRU eviction and memory accounting
//!
//! All modules maintain lock-free concurrent access using crossbeam `SkipMap`.

pub mod core;
pub mod eviction;
pub mod operations;

pub use core::ResponseCache;
