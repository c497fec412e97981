//! Theme preference and menu state.
//!
//! # Design
//! - Dark mode is persisted as `"true"`/`"false"`; anything else reads as light.
//! - System preference changes only toggle when they disagree with the current mode.
//! - Persistence failures are cosmetic: logged, never surfaced.

use crate::core::storage::{DARK_MODE_KEY, KeyValueStore, read_flag};

/// Theme mode applied to the document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ThemeMode {
    /// Light theme mode.
    #[default]
    Light,
    /// Dark theme mode.
    Dark,
}

impl ThemeMode {
    /// String identifier used in CSS datasets.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Class toggled on `<html>` and `<body>` while dark.
    pub const DARK_CLASS: &'static str = "dark-mode";
}

/// Theme slice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct ThemeState {
    /// Current mode.
    pub mode: ThemeMode,
    /// Whether the navigation menu is open.
    pub menu_open: bool,
}

impl ThemeState {
    /// Restore the persisted mode; the menu always starts closed.
    #[must_use]
    pub fn load(store: &dyn KeyValueStore) -> Self {
        Self {
            mode: if read_flag(store, DARK_MODE_KEY) {
                ThemeMode::Dark
            } else {
                ThemeMode::Light
            },
            menu_open: false,
        }
    }

    /// Whether dark mode is active.
    #[must_use]
    pub const fn is_dark(self) -> bool {
        matches!(self.mode, ThemeMode::Dark)
    }

    /// Flip between light and dark and persist the result.
    pub fn toggle_dark_mode(&mut self, store: &dyn KeyValueStore) -> ThemeMode {
        self.mode = match self.mode {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        };
        let value = if self.is_dark() { "true" } else { "false" };
        if let Err(err) = store.set(DARK_MODE_KEY, value) {
            tracing::warn!(error = %err, "failed to persist theme preference");
        }
        self.mode
    }

    /// Follow a system colour-scheme change. Returns whether the mode changed.
    pub fn sync_with_system(&mut self, prefers_dark: bool, store: &dyn KeyValueStore) -> bool {
        if prefers_dark == self.is_dark() {
            return false;
        }
        self.toggle_dark_mode(store);
        true
    }

    /// Open or close the navigation menu.
    pub const fn toggle_menu(&mut self) {
        self.menu_open = !self.menu_open;
    }

    /// Close the navigation menu.
    pub const fn close_menu(&mut self) {
        self.menu_open = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::storage::MemoryStore;

    #[test]
    fn theme_mode_to_str() {
        assert_eq!(ThemeMode::Light.as_str(), "light");
        assert_eq!(ThemeMode::Dark.as_str(), "dark");
    }

    #[test]
    fn load_reads_dark_flag() {
        let store = MemoryStore::with_entries(&[(DARK_MODE_KEY, "true")]);
        assert!(ThemeState::load(&store).is_dark());
        let store = MemoryStore::with_entries(&[(DARK_MODE_KEY, "maybe")]);
        assert!(!ThemeState::load(&store).is_dark());
    }

    #[test]
    fn toggle_persists_mode() {
        let store = MemoryStore::new();
        let mut theme = ThemeState::load(&store);
        assert_eq!(theme.toggle_dark_mode(&store), ThemeMode::Dark);
        assert_eq!(store.get(DARK_MODE_KEY).as_deref(), Some("true"));
        assert_eq!(theme.toggle_dark_mode(&store), ThemeMode::Light);
        assert_eq!(store.get(DARK_MODE_KEY).as_deref(), Some("false"));
    }

    #[test]
    fn system_sync_only_toggles_on_disagreement() {
        let store = MemoryStore::new();
        let mut theme = ThemeState::default();
        assert!(!theme.sync_with_system(false, &store));
        assert!(store.get(DARK_MODE_KEY).is_none());
        assert!(theme.sync_with_system(true, &store));
        assert!(theme.is_dark());
        assert!(!theme.sync_with_system(true, &store));
    }

    #[test]
    fn menu_toggles_and_closes() {
        let mut theme = ThemeState::default();
        theme.toggle_menu();
        assert!(theme.menu_open);
        theme.close_menu();
        assert!(!theme.menu_open);
    }
}
