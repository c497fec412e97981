//! Catalog feature: buckets, featured pick, wishlist, and loaders.
//!
//! # Design
//! - Keep HTTP calls behind the `CatalogApi` seam so loaders run against fakes in tests.
//! - State transitions are synchronous reducers; only the loaders await.

pub mod reload;
pub mod state;
