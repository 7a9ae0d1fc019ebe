//! Session storage backed by a JSON file on disk.

use std::{
    collections::BTreeMap,
    fs,
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
    sync::{Mutex, PoisonError},
};

use authgate_sdk::{SessionStorage, StorageError};
use tempfile::NamedTempFile;
use tracing::warn;

/// Flat `{ key: value }` JSON object in a single file.
///
/// The file is re-read on every access so edits from another process (or a
/// logout in another terminal) are observed. Writes go through an owner-only
/// temp file in the same directory and a rename; concurrent writers in other
/// processes race, last one wins.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> BTreeMap<String, String> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return BTreeMap::new(),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "cannot read session file");
                return BTreeMap::new();
            }
        };
        if raw.trim().is_empty() {
            return BTreeMap::new();
        }
        serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!(path = %self.path.display(), error = %e, "session file is malformed, ignoring it");
            BTreeMap::new()
        })
    }

    fn persist(&self, key: &str, items: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let encoded = serde_json::to_string_pretty(items).map_err(|source| StorageError::Encode {
            key: key.to_string(),
            source,
        })?;
        let write_err = |e: std::io::Error| StorageError::Write {
            key: key.to_string(),
            reason: e.to_string(),
        };

        let parent = match self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            Some(parent) => {
                fs::create_dir_all(parent).map_err(write_err)?;
                parent
            }
            None => Path::new("."),
        };
        // Created owner-only (0600 on unix); the rename keeps those permissions.
        let mut tmp = NamedTempFile::new_in(parent).map_err(write_err)?;
        tmp.write_all(encoded.as_bytes()).map_err(write_err)?;
        tmp.persist(&self.path)
            .map(|_| ())
            .map_err(|e| write_err(e.error))
    }

    fn update(
        &self,
        key: &str,
        apply: impl FnOnce(&mut BTreeMap<String, String>) -> bool,
    ) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut items = self.load();
        if apply(&mut items) {
            self.persist(key, &items)?;
        }
        Ok(())
    }
}

impl SessionStorage for FileStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.load().remove(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.update(key, |items| {
            items.insert(key.to_string(), value.to_string());
            true
        })
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.update(key, |items| items.remove(key).is_some())
    }
}
