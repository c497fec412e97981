//! Shared CLI plumbing: error types, dependency wiring, and logging setup.

use std::fmt::{self, Display, Formatter};
use std::time::Duration;

use anyhow::anyhow;
use marquee_catalog::{CatalogClient, CatalogConfig, CatalogError};
use marquee_ui::core::storage::StorageError;
use reqwest::Client;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, OutputFormat};
use crate::store::FileStore;

const LOG_FORMAT_ENV: &str = "MARQUEE_LOG_FORMAT";

/// CLI-level error type to distinguish validation from operational failures.
#[derive(Debug)]
pub(crate) enum CliError {
    Validation(String),
    Failure(anyhow::Error),
}

/// Convenience alias for functions returning a `CliError`.
pub(crate) type CliResult<T> = Result<T, CliError>;

impl CliError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub(crate) fn failure(error: impl Into<anyhow::Error>) -> Self {
        Self::Failure(error.into())
    }

    pub(crate) const fn exit_code(&self) -> i32 {
        match self {
            Self::Validation(_) => 2,
            Self::Failure(_) => 3,
        }
    }

    pub(crate) fn display_message(&self) -> String {
        match self {
            Self::Validation(message) => message.clone(),
            Self::Failure(error) => format!("{error:#}"),
        }
    }
}

impl Display for CliError {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str("cli error")
    }
}

impl std::error::Error for CliError {}

impl From<CatalogError> for CliError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::MissingApiKey => Self::validation(
                "an API key is required (sign in, pass --api-key, or set MARQUEE_TMDB_API_KEY)",
            ),
            CatalogError::InvalidCredential => {
                Self::validation("the catalog rejected the API key; sign in again")
            }
            CatalogError::NotFound { id } => Self::validation(format!("movie {id} not found")),
            other => Self::failure(other),
        }
    }
}

impl From<StorageError> for CliError {
    fn from(err: StorageError) -> Self {
        Self::failure(anyhow!(err).context("failed to update the state file"))
    }
}

/// Dependencies constructed from CLI options.
pub(crate) struct CliDependencies {
    pub(crate) http: Client,
    pub(crate) config: CatalogConfig,
    pub(crate) store: FileStore,
}

impl CliDependencies {
    /// Build the HTTP client, catalog settings, and open the state file.
    pub(crate) fn from_cli(cli: &Cli) -> CliResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(cli.timeout))
            .build()
            .map_err(|err| CliError::failure(anyhow!("failed to build HTTP client: {err}")))?;
        let config = CatalogConfig::from_parts(
            cli.api_url.as_deref(),
            cli.image_url.as_deref(),
            cli.api_key.clone(),
            cli.language.clone(),
        )
        .map_err(|err| CliError::validation(err.to_string()))?;
        let store = FileStore::open(&cli.state_file)?;
        Ok(Self {
            http,
            config,
            store,
        })
    }
}

/// Application context passed to command handlers.
pub(crate) struct AppContext {
    /// Catalog client; carries the flag key, else the session's cached key.
    pub(crate) catalog: CatalogClient,
    /// Persisted session, theme, and wishlist.
    pub(crate) store: FileStore,
    /// Output format for structured results.
    pub(crate) output: OutputFormat,
}

/// Install the stderr fmt subscriber. `RUST_LOG` overrides the default `warn`
/// filter; `MARQUEE_LOG_FORMAT=json` switches to JSON lines.
pub(crate) fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);
    let installed = if std::env::var(LOG_FORMAT_ENV).is_ok_and(|format| format == "json") {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    if installed.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}
