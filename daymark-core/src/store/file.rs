//! File-backed storage adapter.

use std::fs;
use std::path::PathBuf;

use serde_json::{Map, Value};

use crate::error::{DaymarkError, DaymarkResult};
use crate::store::StorageAdapter;

const STORE_FILE: &str = "store.json";

/// Stores all keys in a single JSON file under the user's data directory.
///
/// Every write rewrites the whole file through a temp-file rename, so a
/// crash mid-write never leaves a truncated store behind.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileStore { path: path.into() }
    }

    /// Default store location: `<data_dir>/daymark/store.json`.
    pub fn default_path() -> DaymarkResult<PathBuf> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| DaymarkError::Storage("Could not determine data directory".into()))?
            .join("daymark");

        Ok(data_dir.join(STORE_FILE))
    }

    pub fn open_default() -> DaymarkResult<Self> {
        Ok(FileStore::new(Self::default_path()?))
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    fn read_all(&self) -> DaymarkResult<Map<String, Value>> {
        if !self.path.exists() {
            return Ok(Map::new());
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(Map::new());
        }

        let value: Value = serde_json::from_str(&content)?;
        match value {
            Value::Object(map) => Ok(map),
            _ => Err(DaymarkError::Storage(format!(
                "store file {} is not a JSON object",
                self.path.display()
            ))),
        }
    }

    fn write_all(&self, map: &Map<String, Value>) -> DaymarkResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let temp = self.path.with_extension("json.tmp");
        let content = serde_json::to_string_pretty(&Value::Object(map.clone()))?;

        fs::write(&temp, content)?;
        fs::rename(&temp, &self.path)?;
        Ok(())
    }
}

impl StorageAdapter for FileStore {
    fn get(&self, key: &str) -> DaymarkResult<Option<Value>> {
        Ok(self.read_all()?.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: Value) -> DaymarkResult<()> {
        let mut map = self.read_all()?;
        map.insert(key.to_string(), value);
        self.write_all(&map)
    }

    fn remove(&mut self, key: &str) -> DaymarkResult<()> {
        let mut map = self.read_all()?;
        if map.remove(key).is_some() {
            self.write_all(&map)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_roundtrip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        let mut store = FileStore::new(&path);
        assert_eq!(store.get("users").unwrap(), None);

        store.set("users", json!({"a@x.com": {}})).unwrap();
        store.set("current_user", json!({"identity": "a@x.com"})).unwrap();

        // A fresh adapter over the same file sees both keys.
        let store = FileStore::new(&path);
        assert_eq!(store.get("users").unwrap(), Some(json!({"a@x.com": {}})));
        assert!(store.get("current_user").unwrap().is_some());
    }

    #[test]
    fn test_remove_key() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path().join("store.json"));

        store.set("current_user", json!({"identity": "a@x.com"})).unwrap();
        store.remove("current_user").unwrap();
        assert_eq!(store.get("current_user").unwrap(), None);

        // Removing an absent key is a no-op, not an error.
        store.remove("current_user").unwrap();
    }
}
