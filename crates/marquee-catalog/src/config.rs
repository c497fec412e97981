//! Catalog connection settings.
//!
//! # Design
//! - Every request carries the base URL, API key, and a fixed locale.
//! - Environment lookups go through a closure so tests never touch the process env.

use url::Url;

use crate::error::ConfigError;

/// Default upstream API root.
pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";
/// Default image CDN root.
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";
/// Locale attached to every request unless overridden.
pub const DEFAULT_LANGUAGE: &str = "ko-KR";

/// Environment variable for the API root.
pub const ENV_BASE_URL: &str = "MARQUEE_TMDB_BASE_URL";
/// Environment variable for the image CDN root.
pub const ENV_IMAGE_BASE_URL: &str = "MARQUEE_TMDB_IMAGE_BASE_URL";
/// Environment variable for the API key.
pub const ENV_API_KEY: &str = "MARQUEE_TMDB_API_KEY";
/// Environment variable for the request locale.
pub const ENV_LANGUAGE: &str = "MARQUEE_TMDB_LANGUAGE";

/// Connection settings for the catalog client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    /// API root, e.g. `https://api.themoviedb.org/3`.
    pub base_url: Url,
    /// Image CDN root, e.g. `https://image.tmdb.org/t/p`.
    pub image_base_url: Url,
    /// API key attached as the `api_key` query parameter.
    pub api_key: Option<String>,
    /// Locale attached as the `language` query parameter.
    pub language: String,
}

impl CatalogConfig {
    /// Build a config from explicit values, falling back to defaults for `None`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a URL fails to parse or is not http(s).
    pub fn from_parts(
        base_url: Option<&str>,
        image_base_url: Option<&str>,
        api_key: Option<String>,
        language: Option<String>,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_url(ENV_BASE_URL, base_url.unwrap_or(DEFAULT_BASE_URL))?,
            image_base_url: parse_url(
                ENV_IMAGE_BASE_URL,
                image_base_url.unwrap_or(DEFAULT_IMAGE_BASE_URL),
            )?,
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            language: language
                .filter(|lang| !lang.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
        })
    }

    /// Load settings from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a URL variable is malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load settings through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a URL variable is malformed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::from_parts(
            lookup(ENV_BASE_URL).as_deref(),
            lookup(ENV_IMAGE_BASE_URL).as_deref(),
            lookup(ENV_API_KEY),
            lookup(ENV_LANGUAGE),
        )
    }

    /// Copy of this config with a different API key.
    #[must_use]
    pub fn with_api_key(&self, api_key: Option<String>) -> Self {
        Self {
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            ..self.clone()
        }
    }
}

fn parse_url(setting: &'static str, value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value.trim()).map_err(|source| ConfigError::InvalidUrl {
        setting,
        value: value.to_string(),
        source,
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::UnsupportedScheme {
            setting,
            value: value.to_string(),
        });
    }
    Ok(url)
}
