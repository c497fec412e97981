//! Catalog client context shared by views.
//!
//! # Design
//! - Create exactly one HTTP client per app boot.
//! - Views derive a per-session client carrying the cached API key.

use std::rc::Rc;

use marquee_catalog::{CatalogClient, CatalogConfig};

/// Shared catalog client context.
#[derive(Clone)]
pub(crate) struct ApiCtx {
    /// Singleton client without a key.
    pub(crate) client: Rc<CatalogClient>,
}

impl ApiCtx {
    /// Create the context from build-time settings.
    pub(crate) fn new(config: CatalogConfig) -> Self {
        Self {
            client: Rc::new(CatalogClient::new(reqwest::Client::new(), config)),
        }
    }

    /// Client that authenticates with `api_key`.
    pub(crate) fn with_api_key(&self, api_key: Option<String>) -> Rc<CatalogClient> {
        Rc::new(self.client.with_api_key(api_key))
    }
}

impl PartialEq for ApiCtx {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.client, &other.client)
    }
}
