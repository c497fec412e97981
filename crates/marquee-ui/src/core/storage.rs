//! Durable key-value persistence seam.
//!
//! # Design
//! - Values are stored as raw strings so the browser and file backends share one contract.
//! - Reads never fail: missing or malformed values fall back to the field default.
//! - Writes are synchronous; multi-key writes go through `set_all`/`remove_all`
//!   so backends that can commit atomically do so.

use std::cell::RefCell;
use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use thiserror::Error;

/// Authenticated flag (`"true"` when signed in).
pub const AUTHENTICATED_KEY: &str = "isAuthenticated";
/// Identity id issued by the sign-in provider.
pub const IDENTITY_KEY: &str = "userId";
/// Cached catalog API key.
pub const API_KEY_KEY: &str = "TMDb-Key";
/// Token issued by the external social login provider.
pub const EXTERNAL_TOKEN_KEY: &str = "kakao_token";
/// Dark mode flag (`"true"`/`"false"`).
pub const DARK_MODE_KEY: &str = "darkMode";
/// JSON array of wishlisted movie ids.
pub const WISHLIST_KEY: &str = "wishlisted";

/// Every credential key cleared on logout.
pub const CREDENTIAL_KEYS: [&str; 4] = [
    AUTHENTICATED_KEY,
    IDENTITY_KEY,
    API_KEY_KEY,
    EXTERNAL_TOKEN_KEY,
];

/// Persistence failures surfaced to state owners.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// The backend cannot be reached at all (e.g. storage disabled).
    #[error("storage backend unavailable")]
    Unavailable {
        /// Backend-specific detail.
        detail: String,
    },
    /// A write or delete was refused.
    #[error("storage write failed for {key}")]
    Write {
        /// Key being written.
        key: String,
        /// Backend-specific detail.
        detail: String,
    },
    /// A value could not be encoded before writing.
    #[error("storage value for {key} could not be encoded")]
    Encode {
        /// Key being written.
        key: String,
        /// Encoder detail.
        detail: String,
    },
}

/// Synchronous string key-value store.
pub trait KeyValueStore {
    /// Raw value for `key`, if present.
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the backend refuses the write.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key`. Deleting a missing key succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the backend refuses the delete.
    fn remove(&self, key: &str) -> Result<(), StorageError>;

    /// Store several entries as one logical write.
    ///
    /// # Errors
    ///
    /// Returns the first [`StorageError`] encountered.
    fn set_all(&self, entries: &[(&str, &str)]) -> Result<(), StorageError> {
        for (key, value) in entries {
            self.set(key, value)?;
        }
        Ok(())
    }

    /// Delete several keys as one logical write. Every key is attempted even
    /// when an earlier delete fails.
    ///
    /// # Errors
    ///
    /// Returns the first [`StorageError`] encountered.
    fn remove_all(&self, keys: &[&str]) -> Result<(), StorageError> {
        let mut first_error = None;
        for key in keys {
            if let Err(err) = self.remove(key) {
                first_error.get_or_insert(err);
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}

/// In-memory store for tests and non-persistent sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<BTreeMap<String, String>>,
}

impl MemoryStore {
    /// Empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with the given entries.
    #[must_use]
    pub fn with_entries(entries: &[(&str, &str)]) -> Self {
        let store = Self::new();
        store.entries.borrow_mut().extend(
            entries
                .iter()
                .map(|(key, value)| ((*key).to_string(), (*value).to_string())),
        );
        store
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Whether the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

/// `"true"` flag lookup; anything else reads as `false`.
#[must_use]
pub fn read_flag(store: &dyn KeyValueStore, key: &str) -> bool {
    store.get(key).is_some_and(|value| value.trim() == "true")
}

/// Non-blank string lookup.
#[must_use]
pub fn read_text(store: &dyn KeyValueStore, key: &str) -> Option<String> {
    store.get(key).filter(|value| !value.trim().is_empty())
}

/// JSON lookup; malformed payloads are logged and read as the default.
#[must_use]
pub fn read_json<T>(store: &dyn KeyValueStore, key: &str) -> T
where
    T: DeserializeOwned + Default,
{
    let Some(raw) = read_text(store, key) else {
        return T::default();
    };
    serde_json::from_str(&raw).unwrap_or_else(|err| {
        tracing::warn!(key, error = %err, "ignoring malformed persisted value");
        T::default()
    })
}
