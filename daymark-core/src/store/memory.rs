//! In-memory storage adapter, primarily for tests.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use serde_json::Value;

use crate::error::DaymarkResult;
use crate::store::StorageAdapter;

#[derive(Default)]
struct Inner {
    values: BTreeMap<String, Value>,
    writes: usize,
}

/// Non-durable storage backed by a shared map.
///
/// Clones share the same underlying map, so a test can keep a handle to
/// inspect writes after handing the store to a `Daymark` context.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    /// Number of mutating operations that reached the store.
    pub fn write_count(&self) -> usize {
        self.inner.lock().unwrap().writes
    }

    /// Peek at a stored value without going through the adapter interface.
    pub fn snapshot(&self, key: &str) -> Option<Value> {
        self.inner.lock().unwrap().values.get(key).cloned()
    }
}

impl StorageAdapter for MemoryStore {
    fn get(&self, key: &str) -> DaymarkResult<Option<Value>> {
        Ok(self.inner.lock().unwrap().values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: Value) -> DaymarkResult<()> {
        let mut inner = self.inner.lock().unwrap();
        inner.values.insert(key.to_string(), value);
        inner.writes += 1;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> DaymarkResult<()> {
        let mut inner = self.inner.lock().unwrap();
        if inner.values.remove(key).is_some() {
            inner.writes += 1;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_clones_share_state() {
        let store = MemoryStore::new();
        let mut handle = store.clone();

        handle.set("users", json!({})).unwrap();
        assert_eq!(store.get("users").unwrap(), Some(json!({})));
        assert_eq!(store.write_count(), 1);
    }
}
