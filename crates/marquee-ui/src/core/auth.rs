//! Authentication state shared across the UI.
//!
//! # Design
//! - The session is plain data restored from storage once at startup.
//! - Blank credentials are treated as absent.
//! - Sign-in validates before mutating; a rejected key never touches state.
//! - Sign-in rewrites every credential key; a failed write puts the previous values back.
//! - Logout clears every credential key together and always ends signed out.

use marquee_catalog::CatalogApi;
use thiserror::Error;

use crate::core::route::Route;
use crate::core::storage::{
    API_KEY_KEY, AUTHENTICATED_KEY, CREDENTIAL_KEYS, EXTERNAL_TOKEN_KEY, IDENTITY_KEY,
    KeyValueStore, StorageError, read_flag, read_text,
};

/// Proof of authorization held by the current client.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Session {
    /// Whether sign-in completed.
    pub is_authenticated: bool,
    /// Identity issued by the sign-in provider.
    pub identity_id: Option<String>,
    /// Catalog API key validated at sign-in.
    pub cached_api_key: Option<String>,
    /// Token issued by the external social login provider.
    pub external_token: Option<String>,
}

impl Session {
    /// Whether at least one credential backs the authenticated flag.
    #[must_use]
    pub fn has_credentials(&self) -> bool {
        let present = |value: &Option<String>| {
            value
                .as_deref()
                .is_some_and(|value| !value.trim().is_empty())
        };
        present(&self.cached_api_key) || present(&self.external_token)
    }
}

/// Validated identity handed over by the sign-in flow.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignIn {
    /// Identity id from the provider.
    pub identity_id: String,
    /// Catalog API key to cache.
    pub api_key: String,
    /// Optional provider token.
    pub external_token: Option<String>,
}

/// Sign-in failures reported to the caller.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    /// The catalog rejected the API key.
    #[error("API key was rejected")]
    InvalidCredential,
    /// The identity id was blank.
    #[error("identity id is required")]
    MissingIdentity,
    /// The session could not be persisted.
    #[error("failed to persist session")]
    Storage {
        /// Source storage error.
        #[from]
        source: StorageError,
    },
}

/// Authentication slice: the session plus its persistence rules.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct AuthState {
    session: Session,
}

impl AuthState {
    /// Restore the session from storage. No network access.
    #[must_use]
    pub fn initialize(store: &dyn KeyValueStore) -> Self {
        Self {
            session: Session {
                is_authenticated: read_flag(store, AUTHENTICATED_KEY),
                identity_id: read_text(store, IDENTITY_KEY),
                cached_api_key: read_text(store, API_KEY_KEY),
                external_token: read_text(store, EXTERNAL_TOKEN_KEY),
            },
        }
    }

    /// Current session snapshot.
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Record a successful sign-in and persist it.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::MissingIdentity`] for a blank identity,
    /// [`AuthError::InvalidCredential`] for a blank key, and
    /// [`AuthError::Storage`] when persisting fails. The in-memory session is
    /// unchanged on every error path.
    pub fn sign_in(
        &mut self,
        store: &dyn KeyValueStore,
        sign_in: SignIn,
    ) -> Result<(), AuthError> {
        let identity_id = sign_in.identity_id.trim().to_string();
        let api_key = sign_in.api_key.trim().to_string();
        if identity_id.is_empty() {
            return Err(AuthError::MissingIdentity);
        }
        if api_key.is_empty() {
            return Err(AuthError::InvalidCredential);
        }
        let external_token = sign_in
            .external_token
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty());

        let mut entries = vec![
            (AUTHENTICATED_KEY, "true"),
            (IDENTITY_KEY, identity_id.as_str()),
            (API_KEY_KEY, api_key.as_str()),
        ];
        if let Some(token) = external_token.as_deref() {
            entries.push((EXTERNAL_TOKEN_KEY, token));
        }
        let previous: Vec<(&str, Option<String>)> = CREDENTIAL_KEYS
            .iter()
            .map(|key| (*key, store.get(key)))
            .collect();
        let persisted = store.set_all(&entries).and_then(|()| {
            if external_token.is_none() {
                store.remove(EXTERNAL_TOKEN_KEY)
            } else {
                Ok(())
            }
        });
        if let Err(err) = persisted {
            if let Err(cleanup) = restore_entries(store, &previous) {
                tracing::warn!(error = %cleanup, "failed to roll back partial sign-in");
            }
            return Err(err.into());
        }

        self.session = Session {
            is_authenticated: true,
            identity_id: Some(identity_id),
            cached_api_key: Some(api_key),
            external_token,
        };
        Ok(())
    }

    /// Validate the key against the catalog, then sign in.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredential`] when the catalog rejects the key,
    /// plus every error of [`AuthState::sign_in`].
    pub async fn sign_in_with_key<A>(
        &mut self,
        api: &A,
        store: &dyn KeyValueStore,
        sign_in: SignIn,
    ) -> Result<(), AuthError>
    where
        A: CatalogApi + ?Sized,
    {
        let sign_in = validate_sign_in(api, sign_in).await?;
        self.sign_in(store, sign_in)
    }

    /// Clear every credential and return the route to reset navigation to.
    ///
    /// Idempotent: logging out twice ends in the same state without error.
    pub fn logout(&mut self, store: &dyn KeyValueStore) -> Route {
        if let Err(err) = store.remove_all(&CREDENTIAL_KEYS) {
            tracing::error!(error = %err, "failed to clear persisted credentials");
        }
        self.session = Session::default();
        Route::Home
    }

    /// Drop only the cached API key, e.g. after the catalog answered 401.
    pub fn revoke_api_key(&mut self, store: &dyn KeyValueStore) {
        if let Err(err) = store.remove(API_KEY_KEY) {
            tracing::error!(error = %err, "failed to clear cached API key");
        }
        self.session.cached_api_key = None;
    }
}

/// Put back the values captured before a failed write; absent keys are removed.
fn restore_entries(
    store: &dyn KeyValueStore,
    previous: &[(&str, Option<String>)],
) -> Result<(), StorageError> {
    let present: Vec<(&str, &str)> = previous
        .iter()
        .filter_map(|(key, value)| value.as_deref().map(|value| (*key, value)))
        .collect();
    let absent: Vec<&str> = previous
        .iter()
        .filter(|(_, value)| value.is_none())
        .map(|(key, _)| *key)
        .collect();
    let removed = store.remove_all(&absent);
    store.set_all(&present).and(removed)
}

/// Check a sign-in candidate against the catalog without touching state.
///
/// # Errors
///
/// Returns [`AuthError::InvalidCredential`] when the catalog rejects the key.
pub async fn validate_sign_in<A>(api: &A, sign_in: SignIn) -> Result<SignIn, AuthError>
where
    A: CatalogApi + ?Sized,
{
    if api.validate_api_key(&sign_in.api_key).await {
        Ok(sign_in)
    } else {
        Err(AuthError::InvalidCredential)
    }
}
