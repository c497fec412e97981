//! Error types for catalog operations.

use marquee_models::MovieId;
use thiserror::Error;

/// Primary error type for catalog requests.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Network or HTTP-layer failure before a response was received.
    #[error("catalog request failed")]
    Transport {
        /// Endpoint path that was requested.
        path: String,
        /// Source transport error.
        source: reqwest::Error,
    },
    /// Upstream rejected the API key (HTTP 401).
    #[error("catalog rejected the API key")]
    InvalidCredential,
    /// Detail lookup for an id the upstream does not know.
    #[error("movie {id} not found")]
    NotFound {
        /// Requested movie identifier.
        id: MovieId,
    },
    /// Any other non-success status.
    #[error("catalog returned status {status}")]
    Status {
        /// Endpoint path that was requested.
        path: String,
        /// HTTP status code.
        status: u16,
    },
    /// Response body did not match the expected shape.
    #[error("catalog response could not be decoded")]
    Decode {
        /// Endpoint path that was requested.
        path: String,
        /// Source decode error.
        source: reqwest::Error,
    },
    /// No API key is configured or cached.
    #[error("no catalog API key configured")]
    MissingApiKey,
}

impl CatalogError {
    /// Whether the failure means the credential itself is unusable.
    #[must_use]
    pub const fn is_credential_failure(&self) -> bool {
        matches!(self, Self::InvalidCredential | Self::MissingApiKey)
    }
}

/// Convenience alias for catalog results.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors raised while assembling a [`crate::CatalogConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A URL setting could not be parsed.
    #[error("invalid URL for {setting}")]
    InvalidUrl {
        /// Setting name (environment variable or flag).
        setting: &'static str,
        /// Offending value.
        value: String,
        /// Source parse error.
        source: url::ParseError,
    },
    /// A URL setting used a scheme other than http(s).
    #[error("unsupported URL scheme for {setting}")]
    UnsupportedScheme {
        /// Setting name (environment variable or flag).
        setting: &'static str,
        /// Offending value.
        value: String,
    },
}
