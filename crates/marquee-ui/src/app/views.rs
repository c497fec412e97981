//! Routed views and movie cards.

use std::rc::Rc;

use marquee_catalog::{CatalogApi, CatalogClient, FIRST_PAGE, PLACEHOLDER_IMAGE};
use marquee_models::{ImageSize, Movie, MovieCategory, MovieId};
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::{Dispatch, use_selector, use_selector_with_deps};

use super::api::ApiCtx;
use super::preferences::LocalStore;
use crate::core::auth::{SignIn, validate_sign_in};
use crate::core::route::Route;
use crate::core::store::AppStore;
use crate::features::catalog::reload::{
    PageCursor, PageSource, apply_page, fetch_page, fetch_reload,
};
use crate::features::catalog::state::{
    LoadError, begin_load, finish_load, select_additional_by_ids, select_genre_names,
    select_is_wishlisted, select_wished_movies, set_genres, toggle_wishlist,
};

/// View for a route that already passed the guard.
pub(super) fn render(route: Route) -> Html {
    match route {
        Route::Home => html! { <HomeView /> },
        Route::Popular => html! { <PopularView /> },
        Route::Search => html! { <SearchView /> },
        Route::SignIn => html! { <SignInView /> },
        Route::Wishlist => html! { <WishlistView /> },
    }
}

#[hook]
fn use_session_client() -> Option<Rc<CatalogClient>> {
    let api = use_context::<ApiCtx>();
    let api_key = use_selector(|store: &AppStore| store.auth.session().cached_api_key.clone());
    let client = use_memo(
        move |api_key| api.map(|ctx| ctx.with_api_key(api_key.clone())),
        (*api_key).clone(),
    );
    (*client).clone()
}

fn spawn_reload(client: Rc<CatalogClient>) {
    let dispatch = Dispatch::<AppStore>::new();
    let mut claimed = false;
    dispatch.reduce_mut(|store| claimed = begin_load(&mut store.catalog).is_ok());
    if !claimed {
        tracing::debug!("catalog reload already in flight");
        return;
    }
    yew::platform::spawn_local(async move {
        let outcome = fetch_reload(&*client).await;
        dispatch.reduce_mut(|store| {
            if let Err(LoadError::Fetch { source }) =
                finish_load(&mut store.catalog, outcome, &mut rand::rng())
                && source.is_credential_failure()
            {
                store.auth.revoke_api_key(&LocalStore);
            }
        });
        match client.genres().await {
            Ok(genres) => dispatch.reduce_mut(|store| set_genres(&mut store.catalog, genres)),
            Err(err) => tracing::warn!(error = %err, "failed to load genres"),
        }
    });
}

fn movie_grid(movies: &[Movie]) -> Html {
    html! {
        <div class="movie-grid">
            { for movies.iter().cloned().map(|movie| html! {
                <MovieCard key={movie.id.to_string()} movie={movie} />
            }) }
        </div>
    }
}

#[function_component(HomeView)]
fn home_view() -> Html {
    let client = use_session_client();
    let api = use_context::<ApiCtx>();
    let catalog = use_selector(|store: &AppStore| store.catalog.clone());
    {
        let client = client.clone();
        use_effect_with_deps(
            move |_| {
                if let Some(client) = client {
                    spawn_reload(client);
                }
                || ()
            },
            (),
        );
    }

    let backdrop = |movie: &Movie| {
        api.as_ref().map_or_else(
            || PLACEHOLDER_IMAGE.to_string(),
            |ctx| ctx.client.image_url(movie.backdrop_path.as_deref(), ImageSize::W1280),
        )
    };

    html! {
        <section class="home">
            if catalog.loading {
                <p class="loading">{ "Loading..." }</p>
            }
            if let Some(featured) = catalog.featured.as_ref() {
                <div class="featured" style={format!("background-image: url('{}')", backdrop(featured))}>
                    <h1>{ featured.title.clone() }</h1>
                    <p>{ featured.overview.clone() }</p>
                </div>
            }
            <MovieRow title="Popular" movies={catalog.popular.clone()} />
            <MovieRow title="Now Playing" movies={catalog.now_playing.clone()} />
            <MovieRow title="Top Rated" movies={catalog.top_rated.clone()} />
            <MovieRow title="Upcoming" movies={catalog.upcoming.clone()} />
        </section>
    }
}

#[derive(Properties, PartialEq)]
struct MovieRowProps {
    title: AttrValue,
    movies: Vec<Movie>,
}

#[function_component(MovieRow)]
fn movie_row(props: &MovieRowProps) -> Html {
    html! {
        <section class="movie-row">
            <h2>{ props.title.clone() }</h2>
            { movie_grid(&props.movies) }
        </section>
    }
}

#[derive(Properties, PartialEq)]
struct MovieCardProps {
    movie: Movie,
}

#[function_component(MovieCard)]
fn movie_card(props: &MovieCardProps) -> Html {
    let api = use_context::<ApiCtx>();
    let id = props.movie.id;
    let wished = use_selector_with_deps(
        |store: &AppStore, id: &MovieId| select_is_wishlisted(&store.catalog, *id),
        id,
    );
    let genres = use_selector_with_deps(
        |store: &AppStore, movie: &Movie| {
            select_genre_names(&store.catalog, movie)
                .into_iter()
                .map(str::to_string)
                .collect::<Vec<_>>()
        },
        props.movie.clone(),
    );
    let poster = api.as_ref().map_or_else(
        || PLACEHOLDER_IMAGE.to_string(),
        |ctx| ctx.client.image_url(props.movie.poster_path.as_deref(), ImageSize::W342),
    );
    let toggle = Callback::from(move |_: MouseEvent| {
        Dispatch::<AppStore>::new().reduce_mut(|store| {
            if let Err(err) = toggle_wishlist(&mut store.catalog, &LocalStore, id) {
                tracing::warn!(error = %err, movie_id = id, "failed to update wishlist");
            }
        });
    });

    html! {
        <article class="movie-card">
            <img src={poster} alt={props.movie.title.clone()} loading="lazy" />
            <h3>{ props.movie.title.clone() }</h3>
            <p class="rating">{ format!("★ {:.1}", props.movie.vote_average) }</p>
            <p class="genres">{ genres.join(", ") }</p>
            <button class={classes!("wish", wished.then_some("on"))} onclick={toggle}>
                { if *wished { "♥" } else { "♡" } }
            </button>
        </article>
    }
}

#[function_component(PopularView)]
fn popular_view() -> Html {
    let client = use_session_client();
    let movies = use_selector(|store: &AppStore| store.catalog.additional.clone());
    let cursor = use_state(|| None::<PageCursor>);
    let busy = use_state(|| false);

    let load_more = {
        let cursor = cursor.clone();
        let busy = busy.clone();
        Callback::from(move |()| {
            let Some(client) = client.clone() else {
                return;
            };
            if *busy {
                return;
            }
            let page = (*cursor).map_or(FIRST_PAGE, PageCursor::next_page);
            busy.set(true);
            let cursor = cursor.clone();
            let busy = busy.clone();
            yew::platform::spawn_local(async move {
                let source = PageSource::Category(MovieCategory::Popular);
                match fetch_page(&*client, source, page).await {
                    Ok(fetched) => {
                        let mut next = None;
                        Dispatch::<AppStore>::new()
                            .reduce_mut(|store| next = Some(apply_page(&mut store.catalog, fetched)));
                        cursor.set(next);
                    }
                    Err(err) => tracing::warn!(error = %err, page, "failed to load popular page"),
                }
                busy.set(false);
            });
        })
    };
    {
        let load_more = load_more.clone();
        use_effect_with_deps(
            move |_| {
                load_more.emit(());
                || ()
            },
            (),
        );
    }

    let has_more = (*cursor).is_none_or(PageCursor::has_more);
    html! {
        <section class="popular">
            { movie_grid(&movies) }
            if has_more {
                <button class="load-more" disabled={*busy} onclick={load_more.reform(|_: MouseEvent| ())}>
                    { "Load more" }
                </button>
            }
        </section>
    }
}

#[function_component(SearchView)]
fn search_view() -> Html {
    let client = use_session_client();
    let query = use_state(String::new);
    let result_ids = use_state(Vec::<MovieId>::new);
    let results = use_selector_with_deps(
        |store: &AppStore, ids: &Vec<MovieId>| select_additional_by_ids(&store.catalog, ids),
        (*result_ids).clone(),
    );

    let oninput = {
        let query = query.clone();
        Callback::from(move |event: InputEvent| {
            let input: HtmlInputElement = event.target_unchecked_into();
            query.set(input.value());
        })
    };
    let onsubmit = {
        let query = query.clone();
        let result_ids = result_ids.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let Some(client) = client.clone() else {
                return;
            };
            let query = (*query).clone();
            let result_ids = result_ids.clone();
            yew::platform::spawn_local(async move {
                match fetch_page(&*client, PageSource::Search(&query), FIRST_PAGE).await {
                    Ok(fetched) => {
                        let ids = fetched.results.iter().map(|movie| movie.id).collect();
                        Dispatch::<AppStore>::new().reduce_mut(|store| {
                            apply_page(&mut store.catalog, fetched);
                        });
                        result_ids.set(ids);
                    }
                    Err(err) => tracing::warn!(error = %err, "search failed"),
                }
            });
        })
    };

    html! {
        <section class="search">
            <form onsubmit={onsubmit}>
                <input type="search" placeholder="Search titles" value={(*query).clone()} oninput={oninput} />
                <button type="submit">{ "Search" }</button>
            </form>
            { movie_grid(&results) }
        </section>
    }
}

#[function_component(WishlistView)]
fn wishlist_view() -> Html {
    let wished = use_selector(|store: &AppStore| select_wished_movies(&store.catalog));
    html! {
        <section class="wishlist">
            if wished.is_empty() {
                <p class="empty">{ "No wishlisted movies yet." }</p>
            } else {
                { movie_grid(&wished) }
            }
        </section>
    }
}

#[function_component(SignInView)]
fn sign_in_view() -> Html {
    let api = use_context::<ApiCtx>();
    let navigator = use_navigator();
    let identity = use_state(String::new);
    let api_key = use_state(String::new);
    let error = use_state(|| None::<String>);
    let busy = use_state(|| false);

    let bind = |handle: &UseStateHandle<String>| {
        let handle = handle.clone();
        Callback::from(move |event: InputEvent| {
            let input: HtmlInputElement = event.target_unchecked_into();
            handle.set(input.value());
        })
    };
    let on_identity = bind(&identity);
    let on_key = bind(&api_key);

    let onsubmit = {
        let identity = identity.clone();
        let api_key = api_key.clone();
        let error = error.clone();
        let busy = busy.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let Some(ctx) = api.clone() else {
                return;
            };
            busy.set(true);
            let candidate = SignIn {
                identity_id: (*identity).clone(),
                api_key: (*api_key).clone(),
                external_token: None,
            };
            let navigator = navigator.clone();
            let error = error.clone();
            let busy = busy.clone();
            yew::platform::spawn_local(async move {
                let outcome = validate_sign_in(&*ctx.client, candidate)
                    .await
                    .and_then(|sign_in| {
                        let mut result = Ok(());
                        Dispatch::<AppStore>::new().reduce_mut(|store| {
                            result = store.auth.sign_in(&LocalStore, sign_in);
                        });
                        result
                    });
                match outcome {
                    Ok(()) => {
                        tracing::info!("signed in");
                        error.set(None);
                        if let Some(navigator) = &navigator {
                            navigator.push(&Route::Home);
                        }
                    }
                    Err(err) => error.set(Some(err.to_string())),
                }
                busy.set(false);
            });
        })
    };

    html! {
        <section class="sign-in">
            <form onsubmit={onsubmit}>
                <input type="text" placeholder="User id" value={(*identity).clone()} oninput={on_identity} />
                <input type="password" placeholder="TMDB API key" value={(*api_key).clone()} oninput={on_key} />
                <button type="submit" disabled={*busy}>{ "Sign in" }</button>
            </form>
            if let Some(message) = (*error).clone() {
                <p class="error">{ message }</p>
            }
        </section>
    }
}
