//! Caching and storage utilities.
//!
//! This module provides the key-value storage abstraction used for cached
//! reference data, and a time-based memo for keeping it in memory.

pub mod store;
pub mod timed_cache;

pub use store::{FileStore, KeyValueStore, MemoryStore};
pub use timed_cache::TimedCache;
