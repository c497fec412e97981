//! Browser persistence and build-time settings for the app shell.

use gloo::utils::window;
use marquee_catalog::{CatalogConfig, ConfigError};
use web_sys::Storage;

use crate::core::storage::{KeyValueStore, StorageError};

/// `window.localStorage` behind the shared storage seam.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct LocalStore;

impl LocalStore {
    /// Values stay raw strings, so this skips `gloo::storage` (JSON encoded,
    /// and its `raw()` throws when storage is disabled).
    fn raw() -> Result<Storage, StorageError> {
        window()
            .local_storage()
            .ok()
            .flatten()
            .ok_or_else(|| StorageError::Unavailable {
                detail: "localStorage is not available".to_string(),
            })
    }
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        Self::raw().ok()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        Self::raw()?
            .set_item(key, value)
            .map_err(|err| StorageError::Write {
                key: key.to_string(),
                detail: format!("{err:?}"),
            })
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        Self::raw()?
            .remove_item(key)
            .map_err(|err| StorageError::Write {
                key: key.to_string(),
                detail: format!("{err:?}"),
            })
    }
}

/// Catalog settings baked in at build time; the API key comes from the session.
pub(crate) fn catalog_config() -> Result<CatalogConfig, ConfigError> {
    CatalogConfig::from_parts(
        option_env!("MARQUEE_TMDB_BASE_URL"),
        option_env!("MARQUEE_TMDB_IMAGE_BASE_URL"),
        None,
        option_env!("MARQUEE_TMDB_LANGUAGE").map(str::to_string),
    )
}
