//! Core UI primitives (DOM-free).
//!
//! # Design
//! - Keep these modules free of wasm/DOM types so they can be unit-tested natively.
//! - Persistence goes through `storage::KeyValueStore`; the browser binding lives in `app`.

pub mod auth;
pub mod guard;
pub mod route;
pub mod storage;
pub mod store;
pub mod theme;
