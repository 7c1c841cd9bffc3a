//! Key/value persistence contract for word records
//!
//! The core only ever talks to a [`RecordStore`]; concrete backends live
//! in the submodules:
//! - [`FileStore`]: one JSON file per key, atomic replace on write
//! - [`MemoryStore`]: in-process map, for tests and throwaway decks

mod file_store;
mod memory_store;

pub use file_store::FileStore;
pub use memory_store::MemoryStore;

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid key: {0}")]
    InvalidKey(String),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// String key/value store. Each call is atomic on its own; nothing spans keys.
pub trait RecordStore: Send + Sync {
    fn get_item(&self, key: &str) -> StoreResult<Option<String>>;

    fn set_item(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Removing a missing key is not an error
    fn remove_item(&self, key: &str) -> StoreResult<()>;
}

/// JSON helpers available on every store
pub trait RecordStoreExt: RecordStore {
    fn get_json<T: DeserializeOwned>(&self, key: &str) -> StoreResult<Option<T>> {
        match self.get_item(key)? {
            Some(raw) if !raw.is_empty() => Ok(Some(serde_json::from_str(&raw)?)),
            _ => Ok(None),
        }
    }

    fn set_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> StoreResult<()> {
        let raw = serde_json::to_string_pretty(value)?;
        self.set_item(key, &raw)
    }
}

impl<S: RecordStore + ?Sized> RecordStoreExt for S {}

/// Split a `/`-separated key into validated segments
pub(crate) fn key_segments(key: &str) -> StoreResult<Vec<&str>> {
    if key.is_empty() {
        return Err(StoreError::InvalidKey(key.to_string()));
    }

    let segments: Vec<&str> = key.split('/').collect();
    for segment in &segments {
        let bad = segment.is_empty()
            || *segment == "."
            || *segment == ".."
            || segment.contains('\\')
            || segment.contains('\0');
        if bad {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
    }
    Ok(segments)
}
