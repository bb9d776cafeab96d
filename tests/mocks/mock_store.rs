use job_board_core::error::{StorageError, StorageResult};
use job_board_core::KeyValueStore;
use std::collections::HashMap;
use std::io;
use std::sync::{Arc, Mutex};

/// Mock key-value store for testing.
///
/// Keeps values in memory, counts reads and writes, and can be switched to
/// fail every write with an I/O error.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct MockStore {
    values: Arc<Mutex<HashMap<String, String>>>,
    call_counts: Arc<Mutex<HashMap<String, usize>>>,
    fail_writes: Arc<Mutex<bool>>,
}

#[allow(dead_code)]
impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a value without counting a write.
    pub fn insert(&self, key: &str, value: &str) {
        self.values
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }

    pub fn set_fail_writes(&self, fail: bool) {
        *self.fail_writes.lock().unwrap() = fail;
    }

    /// Get the number of times a method was called.
    pub fn get_call_count(&self, method: &str) -> usize {
        let counts = self.call_counts.lock().unwrap();
        *counts.get(method).unwrap_or(&0)
    }

    fn track_call(&self, method: &str) {
        let mut counts = self.call_counts.lock().unwrap();
        *counts.entry(method.to_string()).or_insert(0) += 1;
    }
}

impl KeyValueStore for MockStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        self.track_call("get");
        Ok(self.values.lock().unwrap().get(key).cloned())
    }

    fn put(&self, key: &str, value: &str) -> StorageResult<()> {
        self.track_call("put");
        if *self.fail_writes.lock().unwrap() {
            return Err(StorageError::Io(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "read-only store",
            )));
        }
        self.insert(key, value);
        Ok(())
    }
}
