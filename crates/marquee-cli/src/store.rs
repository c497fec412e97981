//! File-backed key-value store for CLI sessions.
//!
//! # Design
//! - The whole store is one JSON object of string values.
//! - Every mutation rewrites the file through a temp file + rename, so a
//!   crash never leaves a half-written state file.
//! - Multi-key writes commit in a single rename.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use marquee_ui::core::storage::{KeyValueStore, StorageError};
use tempfile::NamedTempFile;

/// JSON file persisted next to the working directory by default.
#[derive(Debug)]
pub(crate) struct FileStore {
    path: PathBuf,
    entries: RefCell<BTreeMap<String, String>>,
}

impl FileStore {
    /// Open the store at `path`. A missing file is an empty store; a malformed
    /// file is logged and treated as empty.
    pub(crate) fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str(&text).unwrap_or_else(|err| {
                tracing::warn!(path = %path.display(), error = %err, "ignoring malformed state file");
                BTreeMap::new()
            }),
            Err(err) if err.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => {
                return Err(StorageError::Unavailable {
                    detail: format!("failed to read {}: {err}", path.display()),
                });
            }
        };
        Ok(Self {
            path,
            entries: RefCell::new(entries),
        })
    }

    fn commit<F>(&self, key: &str, mutate: F) -> Result<(), StorageError>
    where
        F: FnOnce(&mut BTreeMap<String, String>),
    {
        let mut next = self.entries.borrow().clone();
        mutate(&mut next);
        self.persist(key, &next)?;
        *self.entries.borrow_mut() = next;
        Ok(())
    }

    fn persist(&self, key: &str, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let write_error = |detail: String| StorageError::Write {
            key: key.to_string(),
            detail,
        };
        let payload = serde_json::to_string_pretty(entries).map_err(|err| StorageError::Encode {
            key: key.to_string(),
            detail: err.to_string(),
        })?;
        let dir = self
            .path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let mut staged =
            NamedTempFile::new_in(dir).map_err(|err| write_error(err.to_string()))?;
        staged
            .write_all(payload.as_bytes())
            .map_err(|err| write_error(err.to_string()))?;
        staged
            .persist(&self.path)
            .map_err(|err| write_error(err.error.to_string()))?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.commit(key, |entries| {
            entries.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        if !self.entries.borrow().contains_key(key) {
            return Ok(());
        }
        self.commit(key, |entries| {
            entries.remove(key);
        })
    }

    fn set_all(&self, entries: &[(&str, &str)]) -> Result<(), StorageError> {
        let Some((first, _)) = entries.first() else {
            return Ok(());
        };
        self.commit(first, |current| {
            for (key, value) in entries {
                current.insert((*key).to_string(), (*value).to_string());
            }
        })
    }

    fn remove_all(&self, keys: &[&str]) -> Result<(), StorageError> {
        let present = {
            let current = self.entries.borrow();
            keys.iter().find(|key| current.contains_key(**key)).copied()
        };
        let Some(first) = present else {
            return Ok(());
        };
        self.commit(first, |current| {
            for key in keys {
                current.remove(*key);
            }
        })
    }
}
