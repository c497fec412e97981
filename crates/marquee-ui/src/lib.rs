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
#![allow(clippy::multiple_crate_versions)]
//! Marquee web UI: movie browsing, wishlist, and session handling.
//!
//! Layout:
//! - `core/`: DOM-free session, guard, routing, storage, and theme logic
//! - `features/catalog/`: movie buckets, wishlist, and async loaders
//! - `app/` (wasm only): Yew components, browser storage, and boot wiring

pub mod core;
pub mod features;

#[cfg(target_arch = "wasm32")]
mod app;

#[cfg(test)]
mod test_support;

#[cfg(target_arch = "wasm32")]
pub use app::run_app;
