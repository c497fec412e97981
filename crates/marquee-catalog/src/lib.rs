#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![allow(clippy::module_name_repetitions)]
//! Stateless client for the movie catalog API.
//!
//! Layout:
//! - `config.rs`: base URLs, API key, and locale settings
//! - `client.rs`: the [`CatalogApi`] seam and its `reqwest` implementation
//! - `image.rs`: pure artwork URL resolution
//! - `error.rs`: error taxonomy shared by callers

pub mod client;
pub mod config;
pub mod error;
pub mod image;

pub use client::{CatalogApi, CatalogClient, FIRST_PAGE};
pub use config::CatalogConfig;
pub use error::{CatalogError, CatalogResult, ConfigError};
pub use image::{PLACEHOLDER_IMAGE, image_url};
