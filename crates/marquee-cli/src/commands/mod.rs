//! Command handlers grouped by concern.

pub(crate) mod catalog;
pub(crate) mod session;
pub(crate) mod theme;
pub(crate) mod wishlist;

#[cfg(test)]
pub(crate) mod test_support {
    use httpmock::MockServer;
    use marquee_catalog::{CatalogClient, CatalogConfig};
    use reqwest::Client;
    use tempfile::TempDir;

    use crate::cli::OutputFormat;
    use crate::client::AppContext;
    use crate::store::FileStore;

    /// Context against `server` (or an unroutable address) with state in `dir`.
    pub(crate) fn context(
        server: Option<&MockServer>,
        api_key: Option<&str>,
        dir: &TempDir,
    ) -> anyhow::Result<AppContext> {
        let base = server.map_or_else(|| "http://127.0.0.1:9".to_string(), MockServer::base_url);
        let config = CatalogConfig::from_parts(
            Some(&base),
            Some("https://img.example.test/t/p"),
            api_key.map(str::to_string),
            Some("en-US".to_string()),
        )?;
        Ok(AppContext {
            catalog: CatalogClient::new(Client::new(), config),
            store: FileStore::open(dir.path().join("state.json"))?,
            output: OutputFormat::Table,
        })
    }

    /// Minimal TMDB movie JSON.
    pub(crate) fn movie_json(id: u64, title: &str) -> serde_json::Value {
        serde_json::json!({
            "id": id,
            "title": title,
            "overview": "",
            "poster_path": format!("/{id}.jpg"),
            "backdrop_path": null,
            "vote_average": 7.5,
            "release_date": "2024-01-01",
            "genre_ids": [28],
            "original_language": "en"
        })
    }

    /// One-page listing body.
    pub(crate) fn page_json(movies: &[serde_json::Value]) -> serde_json::Value {
        serde_json::json!({
            "page": 1,
            "results": movies,
            "total_pages": 1,
            "total_results": movies.len()
        })
    }
}
