//! Persistent key-value storage.
//!
//! The engine never talks to a concrete store directly; everything goes
//! through the [`KvStore`] trait so trackers are testable against the
//! in-memory fake. The store is string-keyed and string-valued; structured
//! state is serialized to JSON by the caller.
//!
//! Concurrency model: a single logical writer (the UI event loop). The
//! implementations here use an interior mutex only to satisfy `Sync`, not
//! because concurrent writes to the same slice are expected.

pub mod json_file;
pub mod keys;
mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

use std::path::PathBuf;

use async_trait::async_trait;

use crate::error::StoreError;

/// Abstraction over a persistent, asynchronous, string-keyed store.
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Read a single value, `None` if the key is absent.
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write a single value.
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove a key. Removing an absent key is not an error.
    async fn remove(&self, key: &str) -> Result<(), StoreError>;

    /// Read several keys at once; result is positionally aligned with `keys`.
    async fn batch_get(&self, keys: &[&str]) -> Result<Vec<Option<String>>, StoreError>;

    /// Write several entries at once.
    async fn batch_set(&self, entries: &[(String, String)]) -> Result<(), StoreError>;
}

#[async_trait]
impl<S: KvStore + ?Sized> KvStore for std::sync::Arc<S> {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value).await
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key).await
    }

    async fn batch_get(&self, keys: &[&str]) -> Result<Vec<Option<String>>, StoreError> {
        (**self).batch_get(keys).await
    }

    async fn batch_set(&self, entries: &[(String, String)]) -> Result<(), StoreError> {
        (**self).batch_set(entries).await
    }
}

/// Returns `~/.config/everwell[-dev]/` based on EVERWELL_ENV.
///
/// Set EVERWELL_ENV=dev to use a development data directory.
///
/// # Errors
/// Returns an error if the config directory cannot be created.
pub fn data_dir() -> Result<PathBuf, StoreError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("EVERWELL_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("everwell-dev")
    } else {
        base_dir.join("everwell")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
