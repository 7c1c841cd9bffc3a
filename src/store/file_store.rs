//! File-backed store
//!
//! Directory structure (keys are `/`-separated):
//! ```text
//! {root}/
//! └── decks/
//!     └── {deck}/
//!         ├── index.json
//!         └── words/
//!             └── {word-id}.json
//! ```

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use super::{key_segments, RecordStore, StoreResult};

pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `root`, creating the directory if needed
    pub fn new(root: PathBuf) -> StoreResult<Self> {
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &PathBuf {
        &self.root
    }

    fn path_for(&self, key: &str) -> StoreResult<PathBuf> {
        let segments = key_segments(key)?;
        let mut path = self.root.clone();
        if let Some((last, dirs)) = segments.split_last() {
            for dir in dirs {
                path.push(dir);
            }
            path.push(format!("{}.json", last));
        }
        Ok(path)
    }
}

impl RecordStore for FileStore {
    fn get_item(&self, key: &str) -> StoreResult<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Atomic write: the value lands in a `.tmp` sibling and is renamed over the target
    fn set_item(&self, key: &str, value: &str) -> StoreResult<()> {
        let path = self.path_for(key)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, value)?;
        fs::rename(&tmp_path, &path)?;
        Ok(())
    }

    fn remove_item(&self, key: &str) -> StoreResult<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
