use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use crate::error::{ApiError, Result};

/// Whole-blob read/write capability backing the library state. Injected so
/// persistence is an explicit collaborator rather than ambient filesystem
/// calls, and so tests can run against memory.
pub trait BlobStore: Send + Sync {
    fn read(&self, key: &str) -> Result<Option<String>>;
    fn write(&self, key: &str, value: &str) -> Result<()>;
}

/// One JSON file per blob key under a data directory.
#[derive(Debug)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: &Path) -> Result<Self> {
        fs::create_dir_all(root)
            .map_err(|e| ApiError::StorageError(format!("create {}: {}", root.display(), e)))?;
        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", key))
    }
}

impl BlobStore for FileStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ApiError::StorageError(format!("read {}: {}", key, e))),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        // Write-then-rename keeps the blob whole on disk at all times.
        let path = self.path_for(key);
        let tmp = self.root.join(format!("{}.json.tmp", key));
        fs::write(&tmp, value)
            .map_err(|e| ApiError::StorageError(format!("write {}: {}", key, e)))?;
        fs::rename(&tmp, &path)
            .map_err(|e| ApiError::StorageError(format!("rename {}: {}", key, e)))?;
        Ok(())
    }
}

/// In-memory store for tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    blobs: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BlobStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let blobs = self
            .blobs
            .read()
            .map_err(|_| ApiError::StorageError("memory store poisoned".to_string()))?;
        Ok(blobs.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        let mut blobs = self
            .blobs
            .write()
            .map_err(|_| ApiError::StorageError("memory store poisoned".to_string()))?;
        blobs.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trips() {
        let store = MemoryStore::new();
        assert_eq!(store.read("missing").unwrap(), None);
        store.write("k", "{\"a\":1}").unwrap();
        assert_eq!(store.read("k").unwrap().as_deref(), Some("{\"a\":1}"));
    }

    #[test]
    fn file_store_round_trips() {
        let dir = std::env::temp_dir().join(format!("bookfinder-store-{}", uuid::Uuid::new_v4()));
        let store = FileStore::new(&dir).unwrap();

        assert_eq!(store.read("prefs").unwrap(), None);
        store.write("prefs", "{}").unwrap();
        assert_eq!(store.read("prefs").unwrap().as_deref(), Some("{}"));
        // Overwrites replace the whole blob
        store.write("prefs", "{\"x\":2}").unwrap();
        assert_eq!(store.read("prefs").unwrap().as_deref(), Some("{\"x\":2}"));

        std::fs::remove_dir_all(&dir).ok();
    }
}
