//! Catalog browsing commands.

use futures_util::future::join;
use marquee_catalog::{CatalogApi, CatalogError};
use marquee_models::{ImageSize, MovieId};
use marquee_ui::core::auth::AuthState;
use marquee_ui::features::catalog::reload::{load_genres, load_movies};
use marquee_ui::features::catalog::state::{
    CatalogState, LoadError, restore_wishlist, select_genre_names,
};

use crate::cli::{ImageUrlArgs, ListArgs, SearchArgs};
use crate::client::{AppContext, CliError, CliResult};
use crate::output::{
    MovieReport, ReloadReport, render_genres, render_movie, render_page, render_reload,
};

const YOUTUBE_WATCH_URL: &str = "https://www.youtube.com/watch?v=";

pub(crate) async fn handle_list(ctx: &AppContext, args: ListArgs) -> CliResult<()> {
    let page = ctx
        .catalog
        .list(args.category.into(), args.page)
        .await
        .map_err(|err| catalog_error(ctx, err))?;
    render_page(&page, ctx.output)
}

pub(crate) async fn handle_search(ctx: &AppContext, args: &SearchArgs) -> CliResult<()> {
    let page = ctx
        .catalog
        .search(&args.query, args.page)
        .await
        .map_err(|err| catalog_error(ctx, err))?;
    render_page(&page, ctx.output)
}

pub(crate) async fn handle_movie(ctx: &AppContext, id: MovieId) -> CliResult<()> {
    let movie = ctx
        .catalog
        .movie(id)
        .await
        .map_err(|err| catalog_error(ctx, err))?;
    let (videos, genres) = join(ctx.catalog.videos(id), ctx.catalog.genres()).await;
    let trailer_url = match videos {
        Ok(videos) => videos
            .trailer()
            .map(|video| format!("{YOUTUBE_WATCH_URL}{}", video.key)),
        Err(err) => {
            tracing::warn!(error = %err, movie_id = id, "failed to load videos");
            None
        }
    };
    let lookup = CatalogState {
        genres: genres.unwrap_or_else(|err| {
            tracing::warn!(error = %err, "failed to load genres");
            Vec::new()
        }),
        ..CatalogState::default()
    };
    let report = MovieReport {
        poster_url: ctx
            .catalog
            .image_url(movie.poster_path.as_deref(), ImageSize::W500),
        genres: select_genre_names(&lookup, &movie)
            .into_iter()
            .map(str::to_string)
            .collect(),
        trailer_url,
        movie,
    };
    render_movie(&report, ctx.output)
}

pub(crate) async fn handle_genres(ctx: &AppContext) -> CliResult<()> {
    let genres = ctx
        .catalog
        .genres()
        .await
        .map_err(|err| catalog_error(ctx, err))?;
    render_genres(&genres, ctx.output)
}

pub(crate) async fn handle_reload(ctx: &AppContext) -> CliResult<()> {
    let state = reload_state(ctx).await?;
    let report = ReloadReport {
        popular: state.popular.len(),
        now_playing: state.now_playing.len(),
        top_rated: state.top_rated.len(),
        upcoming: state.upcoming.len(),
        genres: state.genres.len(),
        featured: state.featured,
    };
    render_reload(&report, ctx.output)
}

pub(crate) fn handle_image_url(ctx: &AppContext, args: &ImageUrlArgs) -> CliResult<()> {
    println!("{}", ctx.catalog.image_url(Some(&args.path), args.size));
    Ok(())
}

/// Full reload of every bucket plus genres, with the persisted wishlist restored.
pub(crate) async fn reload_state(ctx: &AppContext) -> CliResult<CatalogState> {
    let mut state = CatalogState {
        wishlist: restore_wishlist(&ctx.store),
        ..CatalogState::default()
    };
    match load_movies(&mut state, &ctx.catalog, &mut rand::rng()).await {
        Ok(()) => {}
        Err(LoadError::Fetch { source }) => return Err(catalog_error(ctx, source)),
        Err(err @ LoadError::Busy) => return Err(CliError::failure(err)),
    }
    if let Err(err) = load_genres(&mut state, &ctx.catalog).await {
        tracing::debug!(error = %err, "continuing without genres");
    }
    Ok(state)
}

/// Map a catalog failure, dropping the cached key when the catalog rejected it.
///
/// A key supplied by flag or environment never touches the session.
fn catalog_error(ctx: &AppContext, err: CatalogError) -> CliError {
    if matches!(err, CatalogError::InvalidCredential) {
        let mut auth = AuthState::initialize(&ctx.store);
        if auth.session().cached_api_key == ctx.catalog.config().api_key {
            auth.revoke_api_key(&ctx.store);
        } else {
            tracing::debug!("rejected key was not the cached session key");
        }
    }
    err.into()
}
