//! Catalog feature state and pure state transformations for testing outside wasm.
//!
//! # Design
//! - Category buckets are replaced wholesale on reload; only `additional` accumulates.
//! - The wishlist is persisted before the in-memory copy changes.
//! - Derived views (`select_*`) are recomputed on read.

use std::collections::{BTreeSet, HashMap};

use marquee_models::{Genre, Movie, MovieId};
use rand::Rng;
use rand::seq::IndexedRandom;
use thiserror::Error;

use crate::core::storage::{KeyValueStore, StorageError, WISHLIST_KEY, read_json};

/// Wishlisted movie ids.
pub type WishlistSet = BTreeSet<MovieId>;

/// Catalog slice stored in the app state.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct CatalogState {
    /// Popular titles (page 1).
    pub popular: Vec<Movie>,
    /// Titles in theatres now (page 1).
    pub now_playing: Vec<Movie>,
    /// Highest rated titles (page 1).
    pub top_rated: Vec<Movie>,
    /// Upcoming titles (page 1).
    pub upcoming: Vec<Movie>,
    /// Movies appended by infinite scroll and search, first-seen wins.
    pub additional: Vec<Movie>,
    /// Random pick from `popular`, re-rolled on every full reload.
    pub featured: Option<Movie>,
    /// Genre reference data.
    pub genres: Vec<Genre>,
    /// Wishlisted ids, mirrored from storage.
    pub wishlist: WishlistSet,
    /// Whether a full reload is in flight.
    pub loading: bool,
}

/// Fresh page-1 results for the four category buckets.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct ReloadBatch {
    /// Popular titles.
    pub popular: Vec<Movie>,
    /// Titles in theatres now.
    pub now_playing: Vec<Movie>,
    /// Highest rated titles.
    pub top_rated: Vec<Movie>,
    /// Upcoming titles.
    pub upcoming: Vec<Movie>,
}

/// Reload failures.
#[derive(Debug, Error)]
pub enum LoadError {
    /// A reload is already in flight.
    #[error("a catalog reload is already in progress")]
    Busy,
    /// At least one category fetch failed; no bucket changed.
    #[error("failed to load movies")]
    Fetch {
        /// First failing fetch.
        #[from]
        source: marquee_catalog::CatalogError,
    },
}

/// Restore the wishlist from storage; malformed payloads read as empty.
#[must_use]
pub fn restore_wishlist(store: &dyn KeyValueStore) -> WishlistSet {
    read_json::<Vec<MovieId>>(store, WISHLIST_KEY)
        .into_iter()
        .collect()
}

/// Claim the in-flight slot for a full reload.
///
/// # Errors
///
/// Returns [`LoadError::Busy`] when a reload is already running; state is untouched.
pub fn begin_load(state: &mut CatalogState) -> Result<(), LoadError> {
    if state.loading {
        return Err(LoadError::Busy);
    }
    state.loading = true;
    Ok(())
}

/// Apply the outcome of a full reload and release the in-flight slot.
///
/// # Errors
///
/// Returns [`LoadError::Fetch`] when the batch failed; no bucket changes.
pub fn finish_load<R>(
    state: &mut CatalogState,
    outcome: Result<ReloadBatch, marquee_catalog::CatalogError>,
    rng: &mut R,
) -> Result<(), LoadError>
where
    R: Rng + ?Sized,
{
    state.loading = false;
    match outcome {
        Ok(batch) => {
            replace_buckets(state, batch, rng);
            Ok(())
        }
        Err(err) => {
            tracing::error!(error = %err, "failed to load movies");
            Err(LoadError::Fetch { source: err })
        }
    }
}

/// Replace the four category buckets and re-roll the featured pick.
pub fn replace_buckets<R>(state: &mut CatalogState, batch: ReloadBatch, rng: &mut R)
where
    R: Rng + ?Sized,
{
    state.popular = dedup_first_seen(batch.popular);
    state.now_playing = dedup_first_seen(batch.now_playing);
    state.top_rated = dedup_first_seen(batch.top_rated);
    state.upcoming = dedup_first_seen(batch.upcoming);
    state.featured = state.popular.choose(rng).cloned();
}

/// Merge a batch into `additional`; ids already present are dropped.
pub fn add_movies(state: &mut CatalogState, batch: Vec<Movie>) {
    let mut seen: BTreeSet<MovieId> = state.additional.iter().map(|movie| movie.id).collect();
    state
        .additional
        .extend(batch.into_iter().filter(|movie| seen.insert(movie.id)));
}

/// Replace genre reference data.
pub fn set_genres(state: &mut CatalogState, genres: Vec<Genre>) {
    state.genres = genres;
}

/// Flip wishlist membership for `id` and persist the full set immediately.
///
/// Returns whether `id` is wishlisted afterwards.
///
/// # Errors
///
/// Returns [`StorageError`] when the write fails; the in-memory set is unchanged.
pub fn toggle_wishlist(
    state: &mut CatalogState,
    store: &dyn KeyValueStore,
    id: MovieId,
) -> Result<bool, StorageError> {
    let mut next = state.wishlist.clone();
    let wished = if next.remove(&id) {
        false
    } else {
        next.insert(id);
        true
    };
    let ids: Vec<MovieId> = next.iter().copied().collect();
    let payload = serde_json::to_string(&ids).map_err(|err| StorageError::Encode {
        key: WISHLIST_KEY.to_string(),
        detail: err.to_string(),
    })?;
    store.set(WISHLIST_KEY, &payload)?;
    state.wishlist = next;
    Ok(wished)
}

/// Whether `id` is wishlisted.
#[must_use]
pub fn select_is_wishlisted(state: &CatalogState, id: MovieId) -> bool {
    state.wishlist.contains(&id)
}

/// Every loaded movie whose id is wishlisted, deduplicated by id.
///
/// Buckets are scanned in order (popular, now playing, top rated, upcoming,
/// additional); a later bucket's copy replaces an earlier one but keeps its
/// position. Wishlisted ids with no loaded movie are omitted.
#[must_use]
pub fn select_wished_movies(state: &CatalogState) -> Vec<Movie> {
    let mut order = Vec::new();
    let mut by_id: HashMap<MovieId, &Movie> = HashMap::new();
    for movie in select_all_buckets(state) {
        if by_id.insert(movie.id, movie).is_none() {
            order.push(movie.id);
        }
    }
    order
        .into_iter()
        .filter(|id| state.wishlist.contains(id))
        .filter_map(|id| by_id.get(&id).map(|movie| (*movie).clone()))
        .collect()
}

/// Movies from `additional` matching `ids`, in `ids` order; unknown ids are skipped.
#[must_use]
pub fn select_additional_by_ids(state: &CatalogState, ids: &[MovieId]) -> Vec<Movie> {
    ids.iter()
        .filter_map(|id| state.additional.iter().find(|movie| movie.id == *id))
        .cloned()
        .collect()
}

/// Genre names for a movie, in the movie's genre order; unknown ids are skipped.
#[must_use]
pub fn select_genre_names<'a>(state: &'a CatalogState, movie: &Movie) -> Vec<&'a str> {
    movie
        .genre_ids
        .iter()
        .filter_map(|id| {
            state
                .genres
                .iter()
                .find(|genre| genre.id == *id)
                .map(|genre| genre.name.as_str())
        })
        .collect()
}

fn select_all_buckets(state: &CatalogState) -> impl Iterator<Item = &Movie> {
    state
        .popular
        .iter()
        .chain(&state.now_playing)
        .chain(&state.top_rated)
        .chain(&state.upcoming)
        .chain(&state.additional)
}

fn dedup_first_seen(movies: Vec<Movie>) -> Vec<Movie> {
    let mut seen = BTreeSet::new();
    movies
        .into_iter()
        .filter(|movie| seen.insert(movie.id))
        .collect()
}
