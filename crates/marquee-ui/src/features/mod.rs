//! Feature slices.
pub mod catalog;
