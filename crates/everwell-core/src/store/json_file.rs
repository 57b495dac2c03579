//! File-backed store: the whole key space as one JSON document.
//!
//! Every write rewrites the document. That is deliberate: the state is a
//! handful of small JSON values and the single-writer model (one UI event
//! handled to completion at a time) means there is nothing to contend
//! with. The document lives at `<data_dir>/store.json`.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::StoreError;
use crate::store::{data_dir, KvStore};

const STORE_FILE: &str = "store.json";

/// Persistent [`KvStore`] backed by a single JSON file.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: Mutex<HashMap<String, String>>,
}

impl JsonFileStore {
    /// Open (or create) the store in the default data directory.
    pub fn open() -> Result<Self, StoreError> {
        let path = data_dir()?.join(STORE_FILE);
        Self::open_at(path)
    }

    /// Open (or create) the store at a specific path, for testing.
    pub fn open_at(path: PathBuf) -> Result<Self, StoreError> {
        let entries = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            serde_json::from_str(&content)
                .map_err(|e| StoreError::Backend(format!("corrupt store document: {e}")))?
        } else {
            HashMap::new()
        };
        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    fn persist(&self, entries: &HashMap<String, String>) -> Result<(), StoreError> {
        let data = serde_json::to_string_pretty(entries)
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        std::fs::write(&self.path, data)?;
        Ok(())
    }
}

#[async_trait]
impl KvStore for JsonFileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        Ok(entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.insert(key.to_string(), value.to_string());
        self.persist(&entries)
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        if entries.remove(key).is_some() {
            self.persist(&entries)?;
        }
        Ok(())
    }

    async fn batch_get(&self, keys: &[&str]) -> Result<Vec<Option<String>>, StoreError> {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        Ok(keys.iter().map(|k| entries.get(*k).cloned()).collect())
    }

    async fn batch_set(&self, batch: &[(String, String)]) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        for (k, v) in batch {
            entries.insert(k.clone(), v.clone());
        }
        self.persist(&entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        {
            let store = JsonFileStore::open_at(path.clone()).unwrap();
            store.set("everwell.theme", "dark").await.unwrap();
        }

        let store = JsonFileStore::open_at(path).unwrap();
        assert_eq!(
            store.get("everwell.theme").await.unwrap(),
            Some("dark".to_string())
        );
    }

    #[tokio::test]
    async fn test_remove_absent_key_does_not_rewrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        let store = JsonFileStore::open_at(path.clone()).unwrap();

        store.remove("nothing").await.unwrap();
        // No write happened, so the file was never created
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_corrupt_document_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, "{not json").unwrap();

        assert!(matches!(
            JsonFileStore::open_at(path),
            Err(StoreError::Backend(_))
        ));
    }
}
