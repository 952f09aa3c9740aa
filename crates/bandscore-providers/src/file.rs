//! JSON file key-value store.
//!
//! All keys live in one JSON object file. The file is created on the first
//! write; a missing file reads as an empty store.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use bandscore_core::error::StoreError;
use bandscore_core::traits::KeyValueStore;

/// A store persisted as a single JSON object mapping keys to string values.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    /// Serializes read-modify-write cycles within this process.
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, StoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(e.into()),
        };
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        Ok(serde_json::from_str(&content)?)
    }

    fn write_all(&self, values: &BTreeMap<String, String>) -> Result<(), StoreError> {
        let data = serde_json::to_vec_pretty(values)?;

        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }

        let temp_path = temp_sibling(&self.path);
        {
            let mut file = fs::File::create(&temp_path)?;
            file.write_all(&data)?;
            file.sync_all()?;
        }
        if let Err(e) = fs::rename(&temp_path, &self.path) {
            let _ = fs::remove_file(&temp_path);
            return Err(e.into());
        }
        tracing::debug!(path = %self.path.display(), keys = values.len(), "store written");
        Ok(())
    }
}

fn temp_sibling(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "store".into());
    name.push(".tmp");
    path.with_file_name(name)
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().map_err(|_| StoreError::Poisoned)?;
        let mut values = self.read_all()?;
        values.insert(key.to_string(), value);
        self.write_all(&values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("progress.json"));
        assert!(store.get("user_progress").unwrap().is_none());
        assert!(!store.path().exists());
    }

    #[test]
    fn set_creates_parent_dirs_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("progress.json");

        let store = JsonFileStore::new(&path);
        store.set("a", "[1,2]".into()).unwrap();
        store.set("b", "x".into()).unwrap();
        assert!(path.exists());
        assert!(!temp_sibling(&path).exists());

        let reopened = JsonFileStore::new(&path);
        assert_eq!(reopened.get("a").unwrap().as_deref(), Some("[1,2]"));
        assert_eq!(reopened.get("b").unwrap().as_deref(), Some("x"));
    }

    #[test]
    fn overwrite_keeps_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("s.json"));
        store.set("keep", "1".into()).unwrap();
        store.set("k", "old".into()).unwrap();
        store.set("k", "new".into()).unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("new"));
        assert_eq!(store.get("keep").unwrap().as_deref(), Some("1"));
    }

    #[test]
    fn corrupt_file_is_a_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("s.json");
        fs::write(&path, "not json").unwrap();

        let store = JsonFileStore::new(&path);
        let err = store.get("k").unwrap_err();
        assert!(matches!(err, StoreError::Serialization(_)));
        assert!(!err.is_io());
    }

    #[test]
    fn empty_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("s.json");
        fs::write(&path, "").unwrap();
        assert!(JsonFileStore::new(&path).get("k").unwrap().is_none());
    }
}
