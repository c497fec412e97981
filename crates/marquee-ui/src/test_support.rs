//! In-memory catalog fake and fixtures for unit tests.

use std::cell::Cell;
use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use marquee_catalog::{CatalogApi, CatalogError, CatalogResult};
use marquee_models::{Genre, Movie, MovieCategory, MovieId, MoviePage, VideoList};

/// Minimal movie fixture.
pub(crate) fn movie(id: MovieId, title: &str) -> Movie {
    Movie {
        id,
        title: title.to_string(),
        overview: String::new(),
        poster_path: Some(format!("/{id}.jpg")),
        backdrop_path: None,
        vote_average: 7.0,
        release_date: "2024-01-01".to_string(),
        genre_ids: Vec::new(),
        original_language: "en".to_string(),
    }
}

/// Scripted catalog: canned pages per category, scripted failures, call counter.
#[derive(Default)]
pub(crate) struct FakeCatalog {
    pages: HashMap<MovieCategory, Vec<Movie>>,
    searches: HashMap<String, Vec<Movie>>,
    failing: BTreeSet<&'static str>,
    genres: Vec<Genre>,
    genres_fail: bool,
    valid_key: Option<String>,
    calls: Cell<usize>,
}

impl FakeCatalog {
    pub(crate) fn with_page(mut self, category: MovieCategory, movies: Vec<Movie>) -> Self {
        self.pages.insert(category, movies);
        self
    }

    pub(crate) fn failing(mut self, category: MovieCategory) -> Self {
        self.failing.insert(category.as_str());
        self
    }

    pub(crate) fn with_search(mut self, query: &str, movies: Vec<Movie>) -> Self {
        self.searches.insert(query.to_string(), movies);
        self
    }

    pub(crate) fn with_genres(mut self, genres: &[(u64, &str)]) -> Self {
        self.genres = genres
            .iter()
            .map(|(id, name)| Genre {
                id: *id,
                name: (*name).to_string(),
            })
            .collect();
        self
    }

    pub(crate) fn failing_genres(mut self) -> Self {
        self.genres_fail = true;
        self
    }

    pub(crate) fn with_valid_key(mut self, key: &str) -> Self {
        self.valid_key = Some(key.to_string());
        self
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.get()
    }

    fn record(&self) {
        self.calls.set(self.calls.get() + 1);
    }

    fn page_of(movies: Vec<Movie>) -> MoviePage {
        MoviePage {
            page: 1,
            total_results: movies.len() as u64,
            total_pages: 1,
            results: movies,
        }
    }
}

#[async_trait(?Send)]
impl CatalogApi for FakeCatalog {
    async fn list(&self, category: MovieCategory, _page: u32) -> CatalogResult<MoviePage> {
        self.record();
        if self.failing.contains(category.as_str()) {
            return Err(CatalogError::Status {
                path: category.path().to_string(),
                status: 500,
            });
        }
        Ok(Self::page_of(
            self.pages.get(&category).cloned().unwrap_or_default(),
        ))
    }

    async fn search(&self, query: &str, _page: u32) -> CatalogResult<MoviePage> {
        self.record();
        Ok(Self::page_of(
            self.searches.get(query).cloned().unwrap_or_default(),
        ))
    }

    async fn movie(&self, id: MovieId) -> CatalogResult<Movie> {
        self.record();
        self.pages
            .values()
            .flatten()
            .find(|movie| movie.id == id)
            .cloned()
            .ok_or(CatalogError::NotFound { id })
    }

    async fn videos(&self, id: MovieId) -> CatalogResult<VideoList> {
        self.record();
        Ok(VideoList {
            id,
            results: Vec::new(),
        })
    }

    async fn genres(&self) -> CatalogResult<Vec<Genre>> {
        self.record();
        if self.genres_fail {
            return Err(CatalogError::Status {
                path: "/genre/movie/list".to_string(),
                status: 500,
            });
        }
        Ok(self.genres.clone())
    }

    async fn validate_api_key(&self, candidate: &str) -> bool {
        self.record();
        self.valid_key.as_deref() == Some(candidate)
    }
}
