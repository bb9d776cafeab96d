//! Time-based memoization with TTL (Time To Live) support.
//!
//! Used to keep reference data such as the technology allow-list in memory
//! between verifications without rereading storage on every call.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    inserted_at: Instant,
}

/// A thread-safe cache with time-based expiration.
///
/// Entries are ignored once older than the TTL. Clones share the same
/// underlying map, so an invalidation through one handle is seen by all.
///
/// Wrap large values in `Arc` to keep `get` cheap:
/// ```ignore
/// let cache = TimedCache::<&'static str, Arc<HashSet<String>>>::new(Duration::from_secs(60));
/// ```
#[derive(Clone)]
pub struct TimedCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    entries: Arc<RwLock<HashMap<K, CacheEntry<V>>>>,
    ttl: Duration,
}

impl<K, V> TimedCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Create a new TimedCache with the given TTL.
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    /// Insert a value, replacing any existing entry for the key.
    pub fn insert(&self, key: K, value: V) {
        let entry = CacheEntry {
            value,
            inserted_at: Instant::now(),
        };

        if let Ok(mut entries) = self.entries.write() {
            entries.insert(key, entry);
        }
    }

    /// Get a value if it exists and hasn't expired.
    pub fn get(&self, key: &K) -> Option<V> {
        let entries = self.entries.read().ok()?;
        let entry = entries.get(key)?;

        if entry.inserted_at.elapsed() < self.ttl {
            Some(entry.value.clone())
        } else {
            None
        }
    }

    /// Return the cached value for `key`, or compute, store and return it.
    ///
    /// Errors from `load` are returned as-is and nothing is cached.
    pub fn get_or_try_insert_with<E, F>(&self, key: K, load: F) -> Result<V, E>
    where
        F: FnOnce() -> Result<V, E>,
    {
        if let Some(value) = self.get(&key) {
            return Ok(value);
        }

        let value = load()?;
        self.insert(key, value.clone());
        Ok(value)
    }

    /// Drop the entry for `key`.
    pub fn invalidate(&self, key: &K) {
        if let Ok(mut entries) = self.entries.write() {
            entries.remove(key);
        }
    }
}

impl<K, V> std::fmt::Debug for TimedCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let entries = self.entries.read().map(|e| e.len()).unwrap_or(0);
        f.debug_struct("TimedCache")
            .field("ttl", &self.ttl)
            .field("entries", &entries)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_insert_and_get() {
        let cache = TimedCache::new(Duration::from_secs(60));
        cache.insert("key1", "value1");

        assert_eq!(cache.get(&"key1"), Some("value1"));
        assert_eq!(cache.get(&"key2"), None);
    }

    #[test]
    fn test_ttl_expiration() {
        let cache = TimedCache::new(Duration::from_millis(50));
        cache.insert("key1", "value1");
        assert_eq!(cache.get(&"key1"), Some("value1"));

        thread::sleep(Duration::from_millis(80));

        assert_eq!(cache.get(&"key1"), None);
    }

    #[test]
    fn test_get_or_try_insert_with_loads_once() {
        let cache = TimedCache::new(Duration::from_secs(60));
        let mut loads = 0;

        let first: Result<i32, String> = cache.get_or_try_insert_with("k", || {
            loads += 1;
            Ok(7)
        });
        assert_eq!(first, Ok(7));

        let second: Result<i32, String> = cache.get_or_try_insert_with("k", || {
            loads += 1;
            Ok(8)
        });
        assert_eq!(second, Ok(7));
        assert_eq!(loads, 1);
    }

    #[test]
    fn test_failed_load_is_not_cached() {
        let cache: TimedCache<&str, i32> = TimedCache::new(Duration::from_secs(60));

        let failed: Result<i32, &str> = cache.get_or_try_insert_with("k", || Err("boom"));
        assert_eq!(failed, Err("boom"));
        assert_eq!(cache.get(&"k"), None);
    }

    #[test]
    fn test_invalidate_shared_between_clones() {
        let cache = TimedCache::new(Duration::from_secs(60));
        let other = cache.clone();
        cache.insert("key1", "value1");

        other.invalidate(&"key1");

        assert_eq!(cache.get(&"key1"), None);
    }

    #[test]
    fn test_debug_format() {
        let cache = TimedCache::new(Duration::from_secs(60));
        cache.insert("key1", "value1");

        let debug_str = format!("{:?}", cache);
        assert!(debug_str.contains("TimedCache"));
        assert!(debug_str.contains("entries: 1"));
    }
}
