//! Allow-list of recognized technology names.

use crate::cache::{KeyValueStore, TimedCache};
use crate::error::{StorageError, StorageResult};
use crate::support::validators::as_string_list;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

/// Storage key of the JSON-encoded technology list.
pub const VALID_TECHNOLOGIES_KEY: &str = "valid_technologies.json";

/// Recognized technology names, read from a [`KeyValueStore`] and memoized.
///
/// The list is populated by
/// [`crate::client::TechnologyCatalogRefresher`]; the catalog never fills
/// it in on its own.
#[derive(Clone)]
pub struct TechnologyCatalog {
    store: Arc<dyn KeyValueStore>,
    memo: TimedCache<&'static str, Arc<HashSet<String>>>,
}

impl TechnologyCatalog {
    pub fn new(store: Arc<dyn KeyValueStore>, ttl: Duration) -> Self {
        Self {
            store,
            memo: TimedCache::new(ttl),
        }
    }

    /// The backing store.
    pub fn store(&self) -> &Arc<dyn KeyValueStore> {
        &self.store
    }

    /// Case-folded set of recognized names.
    ///
    /// # Errors
    ///
    /// - `StorageError::Missing` if the list was never written
    /// - `StorageError::Corrupted` if the payload is not a non-empty list of
    ///   non-empty strings
    pub fn technologies(&self) -> StorageResult<Arc<HashSet<String>>> {
        self.memo
            .get_or_try_insert_with(VALID_TECHNOLOGIES_KEY, || self.load())
    }

    /// Whether `name` is recognized, ignoring case.
    pub fn contains(&self, name: &str) -> StorageResult<bool> {
        Ok(self.technologies()?.contains(&name.to_lowercase()))
    }

    /// Forget the memoized list so the next lookup reads the store.
    pub fn invalidate(&self) {
        self.memo.invalidate(&VALID_TECHNOLOGIES_KEY);
    }

    fn load(&self) -> StorageResult<Arc<HashSet<String>>> {
        let raw = self
            .store
            .get(VALID_TECHNOLOGIES_KEY)?
            .ok_or_else(|| StorageError::Missing(VALID_TECHNOLOGIES_KEY.to_string()))?;

        let value: serde_json::Value = serde_json::from_str(&raw).map_err(|_| {
            StorageError::Corrupted(format!("{} is not valid JSON", VALID_TECHNOLOGIES_KEY))
        })?;

        let names = as_string_list(&value).ok_or_else(|| {
            StorageError::Corrupted(format!(
                "{} must hold a list of technology names",
                VALID_TECHNOLOGIES_KEY
            ))
        })?;

        tracing::debug!("Loaded {} recognized technologies", names.len());
        Ok(Arc::new(
            names.into_iter().map(|name| name.to_lowercase()).collect(),
        ))
    }
}

impl std::fmt::Debug for TechnologyCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TechnologyCatalog")
            .field("memo", &self.memo)
            .finish_non_exhaustive()
    }
}
