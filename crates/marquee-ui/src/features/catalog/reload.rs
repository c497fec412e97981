//! Async catalog loaders.
//!
//! # Design
//! - Fetch first, then apply through the pure reducers in `state`.
//! - The four category fetches fan out concurrently and join on all of them.
//! - Callers holding state behind a store (yewdux) use `fetch_reload` with
//!   `begin_load`/`finish_load`; single owners use `load_movies`.

use futures_util::future::try_join4;
use marquee_catalog::{CatalogApi, CatalogError, FIRST_PAGE};
use marquee_models::{MovieCategory, MoviePage};
use rand::Rng;

use crate::features::catalog::state::{
    CatalogState, LoadError, ReloadBatch, add_movies, begin_load, finish_load, set_genres,
};

/// Fetch page 1 of every category. Fails as a whole if any fetch fails.
///
/// # Errors
///
/// Returns the first [`CatalogError`] reported by any of the four fetches.
pub async fn fetch_reload<A>(api: &A) -> Result<ReloadBatch, CatalogError>
where
    A: CatalogApi + ?Sized,
{
    let (popular, now_playing, top_rated, upcoming) = try_join4(
        api.popular(FIRST_PAGE),
        api.now_playing(FIRST_PAGE),
        api.top_rated(FIRST_PAGE),
        api.upcoming(FIRST_PAGE),
    )
    .await?;
    Ok(ReloadBatch {
        popular: popular.results,
        now_playing: now_playing.results,
        top_rated: top_rated.results,
        upcoming: upcoming.results,
    })
}

/// Full reload: claim the in-flight slot, fetch, apply all-or-nothing.
///
/// # Errors
///
/// Returns [`LoadError::Busy`] when a reload is already running and
/// [`LoadError::Fetch`] when any category fetch failed.
pub async fn load_movies<A, R>(
    state: &mut CatalogState,
    api: &A,
    rng: &mut R,
) -> Result<(), LoadError>
where
    A: CatalogApi + ?Sized,
    R: Rng + ?Sized,
{
    begin_load(state)?;
    let outcome = fetch_reload(api).await;
    finish_load(state, outcome, rng)
}

/// Fetch the genre list; on failure the previous genres stay in place.
///
/// # Errors
///
/// Returns the [`CatalogError`] from the genre fetch.
pub async fn load_genres<A>(state: &mut CatalogState, api: &A) -> Result<(), CatalogError>
where
    A: CatalogApi + ?Sized,
{
    match api.genres().await {
        Ok(genres) => {
            set_genres(state, genres);
            Ok(())
        }
        Err(err) => {
            tracing::error!(error = %err, "failed to load genres");
            Err(err)
        }
    }
}

/// Fetch one page of a category listing or a search.
///
/// # Errors
///
/// Returns the [`CatalogError`] from the fetch.
pub async fn fetch_page<A>(
    api: &A,
    source: PageSource<'_>,
    page: u32,
) -> Result<MoviePage, CatalogError>
where
    A: CatalogApi + ?Sized,
{
    match source {
        PageSource::Category(category) => api.list(category, page).await,
        PageSource::Search(query) => api.search(query, page).await,
    }
}

/// Merge a fetched page into `additional` and report where pagination stands.
pub fn apply_page(state: &mut CatalogState, fetched: MoviePage) -> PageCursor {
    let cursor = PageCursor {
        page: fetched.page,
        total_pages: fetched.total_pages,
    };
    add_movies(state, fetched.results);
    cursor
}

/// Fetch one more page and append it to the `additional` bucket.
///
/// # Errors
///
/// Returns the [`CatalogError`] from the fetch; state is untouched.
pub async fn append_page<A>(
    state: &mut CatalogState,
    api: &A,
    source: PageSource<'_>,
    page: u32,
) -> Result<PageCursor, CatalogError>
where
    A: CatalogApi + ?Sized,
{
    match fetch_page(api, source, page).await {
        Ok(fetched) => Ok(apply_page(state, fetched)),
        Err(err) => {
            tracing::warn!(error = %err, page, "failed to append page");
            Err(err)
        }
    }
}

/// Listing an appended page came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageSource<'a> {
    /// A category listing.
    Category(MovieCategory),
    /// A title search.
    Search(&'a str),
}

/// Pagination position after an append.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageCursor {
    /// Page just fetched.
    pub page: u32,
    /// Total pages available upstream.
    pub total_pages: u32,
}

impl PageCursor {
    /// Whether another page exists after this one.
    #[must_use]
    pub const fn has_more(self) -> bool {
        self.page < self.total_pages
    }

    /// Next page number to request.
    #[must_use]
    pub const fn next_page(self) -> u32 {
        self.page.saturating_add(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::storage::MemoryStore;
    use crate::features::catalog::state::{
        select_additional_by_ids, select_wished_movies, toggle_wishlist,
    };
    use crate::test_support::{FakeCatalog, movie};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn seeded() -> FakeCatalog {
        FakeCatalog::default()
            .with_page(MovieCategory::Popular, vec![movie(1, "A"), movie(2, "B")])
            .with_page(MovieCategory::NowPlaying, vec![movie(3, "C")])
            .with_page(MovieCategory::TopRated, vec![movie(1, "A")])
            .with_page(MovieCategory::Upcoming, vec![movie(4, "D")])
    }

    #[tokio::test]
    async fn load_movies_fills_every_bucket() {
        let catalog = seeded();
        let mut state = CatalogState::default();
        let mut rng = StdRng::seed_from_u64(5);
        load_movies(&mut state, &catalog, &mut rng)
            .await
            .expect("reload succeeds");

        assert_eq!(state.popular.len(), 2);
        assert_eq!(state.now_playing.len(), 1);
        assert_eq!(state.top_rated.len(), 1);
        assert_eq!(state.upcoming.len(), 1);
        assert!(state.featured.is_some());
        assert!(!state.loading);
        assert_eq!(catalog.calls(), 4);
    }

    #[tokio::test]
    async fn one_failing_category_changes_nothing() {
        let mut state = CatalogState::default();
        let mut rng = StdRng::seed_from_u64(5);
        load_movies(&mut state, &seeded(), &mut rng)
            .await
            .expect("initial reload");
        let before = state.clone();

        let failing = seeded()
            .with_page(MovieCategory::NowPlaying, vec![movie(50, "New")])
            .failing(MovieCategory::Upcoming);
        let err = load_movies(&mut state, &failing, &mut rng)
            .await
            .expect_err("partial failure");
        assert!(matches!(err, LoadError::Fetch { .. }));
        assert_eq!(state, before);
    }

    #[tokio::test]
    async fn reload_is_rejected_while_in_flight() {
        let catalog = seeded();
        let mut state = CatalogState {
            loading: true,
            ..CatalogState::default()
        };
        let mut rng = StdRng::seed_from_u64(5);
        let err = load_movies(&mut state, &catalog, &mut rng)
            .await
            .expect_err("busy");
        assert!(matches!(err, LoadError::Busy));
        assert_eq!(catalog.calls(), 0);
        assert!(state.loading);
    }

    #[tokio::test]
    async fn genres_survive_failed_refresh() {
        let mut state = CatalogState::default();
        let catalog = FakeCatalog::default().with_genres(&[(28, "Action")]);
        load_genres(&mut state, &catalog).await.expect("genres load");
        assert_eq!(state.genres.len(), 1);

        let failing = FakeCatalog::default().failing_genres();
        load_genres(&mut state, &failing)
            .await
            .expect_err("genre failure");
        assert_eq!(state.genres.len(), 1);
    }

    #[tokio::test]
    async fn append_page_accumulates_and_reports_cursor() {
        let catalog = FakeCatalog::default()
            .with_page(MovieCategory::Popular, vec![movie(1, "A"), movie(2, "B")])
            .with_search("dune", vec![movie(2, "B"), movie(7, "Dune")]);
        let mut state = CatalogState::default();

        let cursor = append_page(
            &mut state,
            &catalog,
            PageSource::Category(MovieCategory::Popular),
            1,
        )
        .await
        .expect("append popular");
        assert_eq!(cursor.next_page(), 2);
        assert!(!cursor.has_more());

        append_page(&mut state, &catalog, PageSource::Search("dune"), 1)
            .await
            .expect("append search");
        let ids: Vec<_> = state.additional.iter().map(|movie| movie.id).collect();
        assert_eq!(ids, vec![1, 2, 7]);
    }

    #[tokio::test]
    async fn search_results_wishlisted_show_up_in_wishlist() {
        let catalog = FakeCatalog::default().with_search("dune", vec![movie(7, "Dune")]);
        let store = MemoryStore::new();
        let mut state = CatalogState::default();

        let fetched = fetch_page(&catalog, PageSource::Search("dune"), 1)
            .await
            .expect("search");
        let ids: Vec<_> = fetched.results.iter().map(|movie| movie.id).collect();
        apply_page(&mut state, fetched);
        assert_eq!(select_additional_by_ids(&state, &ids)[0].title, "Dune");

        toggle_wishlist(&mut state, &store, 7).expect("wishlist write");
        let wished: Vec<_> = select_wished_movies(&state)
            .into_iter()
            .map(|movie| movie.id)
            .collect();
        assert_eq!(wished, vec![7]);
    }
}
