//! App-wide yewdux store.
//!
//! # Design
//! - One store holds the auth, catalog, and theme slices; components select what they render.
//! - Slices own their own reducers; the store only composes them.

use yewdux::store::Store;

use crate::core::auth::AuthState;
use crate::core::storage::KeyValueStore;
use crate::core::theme::ThemeState;
use crate::features::catalog::state::{CatalogState, restore_wishlist};

/// Global application store for shared state.
#[derive(Clone, Debug, PartialEq, Store, Default)]
pub struct AppStore {
    /// Session and sign-in state.
    pub auth: AuthState,
    /// Movie buckets, genres, and wishlist.
    pub catalog: CatalogState,
    /// Colour scheme and menu state.
    pub theme: ThemeState,
}

impl AppStore {
    /// Rebuild every persisted slice from storage.
    #[must_use]
    pub fn restore(store: &dyn KeyValueStore) -> Self {
        Self {
            auth: AuthState::initialize(store),
            catalog: CatalogState {
                wishlist: restore_wishlist(store),
                ..CatalogState::default()
            },
            theme: ThemeState::load(store),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::storage::{
        API_KEY_KEY, AUTHENTICATED_KEY, DARK_MODE_KEY, MemoryStore, WISHLIST_KEY,
    };

    #[test]
    fn restore_reads_every_slice() {
        let store = MemoryStore::with_entries(&[
            (AUTHENTICATED_KEY, "true"),
            (API_KEY_KEY, "k"),
            (DARK_MODE_KEY, "true"),
            (WISHLIST_KEY, "[5,2]"),
        ]);
        let app = AppStore::restore(&store);
        assert!(app.auth.session().is_authenticated);
        assert!(app.theme.is_dark());
        assert_eq!(app.catalog.wishlist.iter().copied().collect::<Vec<_>>(), vec![2, 5]);
        assert!(!app.catalog.loading);
    }

    #[test]
    fn restore_from_empty_storage_is_default() {
        assert_eq!(AppStore::restore(&MemoryStore::new()), AppStore::default());
    }
}
