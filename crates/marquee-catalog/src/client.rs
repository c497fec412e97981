//! Stateless HTTP facade over the movie catalog API.
//!
//! # Design
//! - The client never retains catalog data; every call is request/response.
//! - Every request carries `api_key` and `language` query parameters.
//! - HTTP 401 maps to [`CatalogError::InvalidCredential`] so callers can revoke a cached key.

use async_trait::async_trait;
use marquee_models::{
    Genre, GenreList, ImageSize, Movie, MovieCategory, MovieId, MoviePage, VideoList,
};
use reqwest::{Client, StatusCode};
use serde::de::{DeserializeOwned, IgnoredAny};

use crate::config::CatalogConfig;
use crate::error::{CatalogError, CatalogResult};
use crate::image::image_url;

/// First page of any paginated listing.
pub const FIRST_PAGE: u32 = 1;

const SEARCH_PATH: &str = "/search/movie";
const GENRES_PATH: &str = "/genre/movie/list";

/// Read-only catalog operations consumed by the state layer.
///
/// Futures are not required to be `Send` so the same trait serves the
/// single-threaded browser runtime.
#[async_trait(?Send)]
pub trait CatalogApi {
    /// One page of a category listing. Page numbers are 1-based; 0 is read as 1.
    async fn list(&self, category: MovieCategory, page: u32) -> CatalogResult<MoviePage>;

    /// One page of title search results.
    async fn search(&self, query: &str, page: u32) -> CatalogResult<MoviePage>;

    /// Detail lookup for one movie.
    async fn movie(&self, id: MovieId) -> CatalogResult<Movie>;

    /// Videos attached to one movie.
    async fn videos(&self, id: MovieId) -> CatalogResult<VideoList>;

    /// Full movie genre list.
    async fn genres(&self) -> CatalogResult<Vec<Genre>>;

    /// Probe the catalog with a candidate key and report whether it was accepted.
    async fn validate_api_key(&self, candidate: &str) -> bool;

    /// Popular titles.
    async fn popular(&self, page: u32) -> CatalogResult<MoviePage> {
        self.list(MovieCategory::Popular, page).await
    }

    /// Titles in theatres now.
    async fn now_playing(&self, page: u32) -> CatalogResult<MoviePage> {
        self.list(MovieCategory::NowPlaying, page).await
    }

    /// Highest rated titles.
    async fn top_rated(&self, page: u32) -> CatalogResult<MoviePage> {
        self.list(MovieCategory::TopRated, page).await
    }

    /// Upcoming titles.
    async fn upcoming(&self, page: u32) -> CatalogResult<MoviePage> {
        self.list(MovieCategory::Upcoming, page).await
    }
}

/// `reqwest`-backed catalog client.
#[derive(Clone, Debug)]
pub struct CatalogClient {
    http: Client,
    config: CatalogConfig,
}

impl CatalogClient {
    /// Wrap an HTTP client with catalog settings.
    #[must_use]
    pub const fn new(http: Client, config: CatalogConfig) -> Self {
        Self { http, config }
    }

    /// Active settings.
    #[must_use]
    pub const fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// Copy of this client that authenticates with a different key.
    #[must_use]
    pub fn with_api_key(&self, api_key: Option<String>) -> Self {
        Self {
            http: self.http.clone(),
            config: self.config.with_api_key(api_key),
        }
    }

    /// Resolve an artwork path against the configured image CDN.
    #[must_use]
    pub fn image_url(&self, path: Option<&str>, size: ImageSize) -> String {
        image_url(&self.config.image_base_url, path, size)
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}{}",
            self.config.base_url.as_str().trim_end_matches('/'),
            path
        )
    }

    fn api_key(&self) -> CatalogResult<&str> {
        self.config
            .api_key
            .as_deref()
            .ok_or(CatalogError::MissingApiKey)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        api_key: &str,
        params: &[(&str, String)],
        lookup_id: Option<MovieId>,
    ) -> CatalogResult<T> {
        let mut query = vec![
            ("api_key", api_key.to_string()),
            ("language", self.config.language.clone()),
        ];
        query.extend_from_slice(params);
        tracing::debug!(path, "catalog request");

        let response = self
            .http
            .get(self.endpoint(path))
            .query(&query)
            .send()
            .await
            .map_err(|source| CatalogError::Transport {
                path: path.to_string(),
                source,
            })?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(CatalogError::InvalidCredential);
        }
        if status == StatusCode::NOT_FOUND
            && let Some(id) = lookup_id
        {
            return Err(CatalogError::NotFound { id });
        }
        if !status.is_success() {
            return Err(CatalogError::Status {
                path: path.to_string(),
                status: status.as_u16(),
            });
        }
        response
            .json::<T>()
            .await
            .map_err(|source| CatalogError::Decode {
                path: path.to_string(),
                source,
            })
    }
}

#[async_trait(?Send)]
impl CatalogApi for CatalogClient {
    async fn list(&self, category: MovieCategory, page: u32) -> CatalogResult<MoviePage> {
        let key = self.api_key()?;
        self.get_json(
            category.path(),
            key,
            &[("page", page.max(FIRST_PAGE).to_string())],
            None,
        )
        .await
    }

    async fn search(&self, query: &str, page: u32) -> CatalogResult<MoviePage> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(MoviePage {
                page: FIRST_PAGE,
                ..MoviePage::default()
            });
        }
        let key = self.api_key()?;
        self.get_json(
            SEARCH_PATH,
            key,
            &[
                ("query", query.to_string()),
                ("page", page.max(FIRST_PAGE).to_string()),
            ],
            None,
        )
        .await
    }

    async fn movie(&self, id: MovieId) -> CatalogResult<Movie> {
        let key = self.api_key()?;
        self.get_json(&format!("/movie/{id}"), key, &[], Some(id))
            .await
    }

    async fn videos(&self, id: MovieId) -> CatalogResult<VideoList> {
        let key = self.api_key()?;
        self.get_json(&format!("/movie/{id}/videos"), key, &[], Some(id))
            .await
    }

    async fn genres(&self) -> CatalogResult<Vec<Genre>> {
        let key = self.api_key()?;
        let list: GenreList = self.get_json(GENRES_PATH, key, &[], None).await?;
        Ok(list.genres)
    }

    async fn validate_api_key(&self, candidate: &str) -> bool {
        let candidate = candidate.trim();
        if candidate.is_empty() {
            return false;
        }
        match self
            .get_json::<IgnoredAny>(
                MovieCategory::Popular.path(),
                candidate,
                &[("page", FIRST_PAGE.to_string())],
                None,
            )
            .await
        {
            Ok(_) => true,
            Err(err) => {
                tracing::warn!(error = %err, "API key validation failed");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_LANGUAGE;
    use httpmock::prelude::*;
    use serde_json::json;

    fn client_for(server: &MockServer, api_key: Option<&str>) -> CatalogClient {
        let config = CatalogConfig::from_parts(
            Some(&server.base_url()),
            Some("https://image.tmdb.org/t/p"),
            api_key.map(ToString::to_string),
            None,
        )
        .expect("valid config");
        CatalogClient::new(Client::new(), config)
    }

    fn movie_json(id: u64, title: &str) -> serde_json::Value {
        json!({
            "id": id,
            "title": title,
            "overview": "",
            "poster_path": null,
            "backdrop_path": null,
            "vote_average": 7.5,
            "release_date": "2024-01-01",
            "genre_ids": [18],
            "original_language": "en"
        })
    }

    #[tokio::test]
    async fn list_sends_key_locale_and_page() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/movie/top_rated")
                .query_param("api_key", "k")
                .query_param("language", DEFAULT_LANGUAGE)
                .query_param("page", "2");
            then.status(200).json_body(json!({
                "page": 2,
                "results": [movie_json(1, "One"), movie_json(2, "Two")],
                "total_pages": 5,
                "total_results": 100
            }));
        });

        let client = client_for(&server, Some("k"));
        let page = client.top_rated(2).await.expect("list succeeds");
        mock.assert();
        assert_eq!(page.page, 2);
        assert_eq!(page.results.len(), 2);
        assert_eq!(page.total_pages, 5);
        assert_eq!(page.total_results, 100);
    }

    #[tokio::test]
    async fn page_zero_is_read_as_first_page() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(GET).path("/movie/popular").query_param("page", "1");
            then.status(200)
                .json_body(json!({"page": 1, "results": [], "total_pages": 0, "total_results": 0}));
        });

        let client = client_for(&server, Some("k"));
        client.popular(0).await.expect("list succeeds");
        mock.assert();
    }

    #[tokio::test]
    async fn search_passes_query() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/search/movie")
                .query_param("query", "dune")
                .query_param("page", "1");
            then.status(200).json_body(json!({
                "page": 1,
                "results": [movie_json(438_631, "Dune")],
                "total_pages": 1,
                "total_results": 1
            }));
        });

        let client = client_for(&server, Some("k"));
        let page = client.search("  dune ", 1).await.expect("search succeeds");
        mock.assert();
        assert_eq!(page.results[0].title, "Dune");
    }

    #[tokio::test]
    async fn blank_search_short_circuits() {
        let server = MockServer::start_async().await;
        let client = client_for(&server, Some("k"));
        let page = client.search("   ", 3).await.expect("blank search succeeds");
        assert!(page.results.is_empty());
        assert_eq!(page.page, FIRST_PAGE);
    }

    #[tokio::test]
    async fn detail_maps_404_to_not_found() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/movie/999");
            then.status(404)
                .json_body(json!({"success": false, "status_code": 34}));
        });

        let client = client_for(&server, Some("k"));
        let err = client.movie(999).await.expect_err("unknown id");
        assert!(matches!(err, CatalogError::NotFound { id: 999 }));
    }

    #[tokio::test]
    async fn unauthorized_maps_to_invalid_credential() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/movie/upcoming");
            then.status(401);
        });

        let client = client_for(&server, Some("stale"));
        let err = client.upcoming(1).await.expect_err("rejected key");
        assert!(err.is_credential_failure());
        assert!(matches!(err, CatalogError::InvalidCredential));
    }

    #[tokio::test]
    async fn server_errors_surface_status() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/movie/now_playing");
            then.status(503);
        });

        let client = client_for(&server, Some("k"));
        let err = client.now_playing(1).await.expect_err("upstream down");
        assert!(matches!(err, CatalogError::Status { status: 503, .. }));
    }

    #[tokio::test]
    async fn missing_key_fails_without_request() {
        let server = MockServer::start_async().await;
        let client = client_for(&server, None);
        let err = client.genres().await.expect_err("no key");
        assert!(matches!(err, CatalogError::MissingApiKey));
    }

    #[tokio::test]
    async fn genres_and_videos_decode() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/genre/movie/list");
            then.status(200).json_body(json!({
                "genres": [{"id": 28, "name": "Action"}, {"id": 18, "name": "Drama"}]
            }));
        });
        server.mock(|when, then| {
            when.method(GET).path("/movie/5/videos");
            then.status(200).json_body(json!({
                "id": 5,
                "results": [{"id": "v", "key": "yt", "name": "Trailer", "site": "YouTube", "type": "Trailer"}]
            }));
        });

        let client = client_for(&server, Some("k"));
        let genres = client.genres().await.expect("genres decode");
        assert_eq!(genres.len(), 2);
        let videos = client.videos(5).await.expect("videos decode");
        assert_eq!(videos.trailer().map(|v| v.key.as_str()), Some("yt"));
    }

    #[tokio::test]
    async fn validate_api_key_uses_candidate_not_configured_key() {
        let server = MockServer::start_async().await;
        let accepted = server.mock(|when, then| {
            when.method(GET)
                .path("/movie/popular")
                .query_param("api_key", "candidate")
                .query_param("page", "1");
            then.status(200)
                .json_body(json!({"page": 1, "results": [], "total_pages": 1, "total_results": 0}));
        });
        server.mock(|when, then| {
            when.method(GET)
                .path("/movie/popular")
                .query_param("api_key", "wrong");
            then.status(401);
        });

        let client = client_for(&server, Some("configured"));
        assert!(client.validate_api_key("candidate").await);
        accepted.assert();
        assert!(!client.validate_api_key("wrong").await);
        assert!(!client.validate_api_key("  ").await);
    }

    #[tokio::test]
    async fn validate_api_key_treats_transport_failure_as_invalid() {
        let config = CatalogConfig::from_parts(Some("http://127.0.0.1:9"), None, None, None)
            .expect("valid config");
        let client = CatalogClient::new(Client::new(), config);
        assert!(!client.validate_api_key("anything").await);
    }

    #[test]
    fn image_url_uses_configured_cdn() {
        let config = CatalogConfig::from_parts(None, Some("https://cdn.example/t/p"), None, None)
            .expect("valid config");
        let client = CatalogClient::new(Client::new(), config);
        assert_eq!(
            client.image_url(Some("/abc.jpg"), ImageSize::Original),
            "https://cdn.example/t/p/original/abc.jpg"
        );
    }
}
