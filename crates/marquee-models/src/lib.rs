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
//! Wire DTOs for the movie catalog API.
//!
//! These types mirror the JSON payloads returned by the upstream catalog
//! (TMDB-shaped) and are shared by the HTTP client, the UI state slices, and
//! the CLI renderers so the contract lives in one place.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Stable upstream movie identifier.
pub type MovieId = u64;

/// A single movie as returned by list, search, and detail endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(from = "MovieWire")]
pub struct Movie {
    /// Stable upstream identifier.
    pub id: MovieId,
    /// Localised display title.
    pub title: String,
    /// Plot synopsis.
    pub overview: String,
    /// Poster image path relative to the image base URL.
    pub poster_path: Option<String>,
    /// Backdrop image path relative to the image base URL.
    pub backdrop_path: Option<String>,
    /// Average user rating on a 0-10 scale.
    pub vote_average: f64,
    /// Release date as reported upstream (`YYYY-MM-DD`, possibly empty).
    pub release_date: String,
    /// Ordered genre identifiers.
    pub genre_ids: Vec<u64>,
    /// ISO 639-1 code of the original language.
    pub original_language: String,
}

/// Tolerant decoding shape: list payloads carry `genre_ids`, detail payloads
/// carry expanded `genres`, and nullable strings show up for unreleased titles.
#[derive(Deserialize)]
struct MovieWire {
    id: MovieId,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    overview: Option<String>,
    #[serde(default)]
    poster_path: Option<String>,
    #[serde(default)]
    backdrop_path: Option<String>,
    #[serde(default)]
    vote_average: Option<f64>,
    #[serde(default)]
    release_date: Option<String>,
    #[serde(default)]
    genre_ids: Option<Vec<u64>>,
    #[serde(default)]
    genres: Option<Vec<Genre>>,
    #[serde(default)]
    original_language: Option<String>,
}

impl From<MovieWire> for Movie {
    fn from(wire: MovieWire) -> Self {
        let genre_ids = wire
            .genre_ids
            .or_else(|| {
                wire.genres
                    .map(|genres| genres.into_iter().map(|genre| genre.id).collect())
            })
            .unwrap_or_default();
        Self {
            id: wire.id,
            title: wire.title.unwrap_or_default(),
            overview: wire.overview.unwrap_or_default(),
            poster_path: wire.poster_path.filter(|path| !path.trim().is_empty()),
            backdrop_path: wire.backdrop_path.filter(|path| !path.trim().is_empty()),
            vote_average: wire.vote_average.unwrap_or_default(),
            release_date: wire.release_date.unwrap_or_default(),
            genre_ids,
            original_language: wire.original_language.unwrap_or_default(),
        }
    }
}

/// One page of movies plus pagination metadata.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct MoviePage {
    /// 1-based page number.
    pub page: u32,
    /// Movies on this page, in upstream order.
    pub results: Vec<Movie>,
    /// Total number of pages available.
    #[serde(default)]
    pub total_pages: u32,
    /// Total number of results across all pages.
    #[serde(default)]
    pub total_results: u64,
}

/// Genre reference data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Genre {
    /// Upstream genre identifier.
    pub id: u64,
    /// Localised genre name.
    pub name: String,
}

/// Envelope returned by the genre list endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct GenreList {
    /// All movie genres.
    pub genres: Vec<Genre>,
}

/// Video (trailer, teaser, clip) attached to a movie.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Video {
    /// Upstream video identifier.
    pub id: String,
    /// Provider-specific key (e.g. the `YouTube` video id).
    pub key: String,
    /// Display name.
    pub name: String,
    /// Hosting provider (e.g. `YouTube`).
    pub site: String,
    /// Video kind (e.g. `Trailer`, `Teaser`).
    #[serde(rename = "type")]
    pub kind: String,
}

/// Envelope returned by the movie videos endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct VideoList {
    /// Movie identifier the videos belong to.
    #[serde(default)]
    pub id: MovieId,
    /// Attached videos.
    pub results: Vec<Video>,
}

impl VideoList {
    /// First `YouTube` trailer, when present.
    #[must_use]
    pub fn trailer(&self) -> Option<&Video> {
        self.results
            .iter()
            .find(|video| video.site == "YouTube" && video.kind == "Trailer")
    }
}

/// Catalog category buckets that can be listed page by page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovieCategory {
    /// Currently popular titles.
    Popular,
    /// Titles in theatres now.
    NowPlaying,
    /// Highest rated titles.
    TopRated,
    /// Titles releasing soon.
    Upcoming,
}

impl MovieCategory {
    /// All categories in reload order.
    #[must_use]
    pub const fn all() -> [Self; 4] {
        [Self::Popular, Self::NowPlaying, Self::TopRated, Self::Upcoming]
    }

    /// Upstream endpoint path for the category.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Popular => "/movie/popular",
            Self::NowPlaying => "/movie/now_playing",
            Self::TopRated => "/movie/top_rated",
            Self::Upcoming => "/movie/upcoming",
        }
    }

    /// Stable lowercase identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Popular => "popular",
            Self::NowPlaying => "now_playing",
            Self::TopRated => "top_rated",
            Self::Upcoming => "upcoming",
        }
    }
}

impl Display for MovieCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Image size tokens accepted by the image CDN.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ImageSize {
    /// 342px wide posters.
    W342,
    /// 500px wide posters.
    W500,
    /// 780px wide posters or backdrops.
    W780,
    /// 1280px wide backdrops.
    W1280,
    /// Original upload resolution.
    #[default]
    Original,
}

impl ImageSize {
    /// Size token used in image URLs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::W342 => "w342",
            Self::W500 => "w500",
            Self::W780 => "w780",
            Self::W1280 => "w1280",
            Self::Original => "original",
        }
    }
}

impl Display for ImageSize {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a size token is not one of the supported values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownImageSize(pub String);

impl Display for UnknownImageSize {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "unknown image size `{}`", self.0)
    }
}

impl std::error::Error for UnknownImageSize {}

impl FromStr for ImageSize {
    type Err = UnknownImageSize;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "w342" => Ok(Self::W342),
            "w500" => Ok(Self::W500),
            "w780" => Ok(Self::W780),
            "w1280" => Ok(Self::W1280),
            "original" => Ok(Self::Original),
            _ => Err(UnknownImageSize(value.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn list_payload_decodes_genre_ids() {
        let page: MoviePage = serde_json::from_value(json!({
            "page": 1,
            "results": [{
                "id": 27205,
                "title": "Inception",
                "overview": "A thief who steals corporate secrets.",
                "poster_path": "/inception.jpg",
                "backdrop_path": null,
                "vote_average": 8.4,
                "release_date": "2010-07-15",
                "genre_ids": [28, 878],
                "original_language": "en"
            }],
            "total_pages": 3,
            "total_results": 60
        }))
        .expect("page decodes");
        let movie = &page.results[0];
        assert_eq!(movie.id, 27205);
        assert_eq!(movie.genre_ids, vec![28, 878]);
        assert_eq!(movie.poster_path.as_deref(), Some("/inception.jpg"));
        assert!(movie.backdrop_path.is_none());
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn detail_payload_flattens_genres_and_tolerates_nulls() {
        let movie: Movie = serde_json::from_value(json!({
            "id": 7,
            "title": "Untitled",
            "overview": null,
            "poster_path": "",
            "release_date": null,
            "genres": [{"id": 18, "name": "Drama"}, {"id": 35, "name": "Comedy"}]
        }))
        .expect("detail decodes");
        assert_eq!(movie.genre_ids, vec![18, 35]);
        assert!(movie.overview.is_empty());
        assert!(movie.poster_path.is_none());
        assert!(movie.release_date.is_empty());
        assert!(movie.vote_average.abs() < f64::EPSILON);
    }

    #[test]
    fn trailer_prefers_youtube_trailers() {
        let list: VideoList = serde_json::from_value(json!({
            "id": 1,
            "results": [
                {"id": "a", "key": "k1", "name": "Teaser", "site": "YouTube", "type": "Teaser"},
                {"id": "b", "key": "k2", "name": "Vimeo", "site": "Vimeo", "type": "Trailer"},
                {"id": "c", "key": "k3", "name": "Official", "site": "YouTube", "type": "Trailer"}
            ]
        }))
        .expect("videos decode");
        assert_eq!(list.trailer().map(|video| video.key.as_str()), Some("k3"));
    }

    #[test]
    fn image_size_parses_known_tokens() {
        assert_eq!("w500".parse::<ImageSize>(), Ok(ImageSize::W500));
        assert_eq!("ORIGINAL".parse::<ImageSize>(), Ok(ImageSize::Original));
        assert!("w9000".parse::<ImageSize>().is_err());
        assert_eq!(ImageSize::W1280.to_string(), "w1280");
    }

    #[test]
    fn categories_map_to_endpoints() {
        let paths: Vec<_> = MovieCategory::all().iter().map(|c| c.path()).collect();
        assert_eq!(
            paths,
            vec![
                "/movie/popular",
                "/movie/now_playing",
                "/movie/top_rated",
                "/movie/upcoming"
            ]
        );
    }
}
