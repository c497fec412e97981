//! Browser shell: boot wiring, router, theme application, and navigation chrome.

use gloo::events::EventListener;
use gloo::utils::window;
use wasm_bindgen::JsCast;
use web_sys::{Element, MediaQueryListEvent};
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::{Dispatch, use_selector};

use crate::core::guard::{GuardDecision, evaluate};
use crate::core::route::Route;
use crate::core::store::AppStore;
use crate::core::theme::ThemeMode;
use api::ApiCtx;
use preferences::LocalStore;

mod api;
mod preferences;
mod views;

const PREFERS_DARK_QUERY: &str = "(prefers-color-scheme: dark)";
const NAV_ROUTES: [Route; 4] = [Route::Home, Route::Popular, Route::Search, Route::Wishlist];

#[function_component(MarqueeApp)]
pub(crate) fn marquee_app() -> Html {
    let api_ctx = use_memo(|_| preferences::catalog_config().map(ApiCtx::new), ());
    match &*api_ctx {
        Ok(ctx) => html! {
            <ContextProvider<ApiCtx> context={ctx.clone()}>
                <BrowserRouter>
                    <Shell />
                </BrowserRouter>
            </ContextProvider<ApiCtx>>
        },
        Err(err) => html! {
            <p class="config-error">{ format!("Catalog configuration is invalid: {err}") }</p>
        },
    }
}

#[function_component(Shell)]
fn shell() -> Html {
    let dispatch = Dispatch::<AppStore>::new();
    let theme = use_selector(|store: &AppStore| store.theme);
    let signed_in = use_selector(|store: &AppStore| store.auth.session().is_authenticated);
    let navigator = use_navigator();

    {
        let mode = theme.mode;
        use_effect_with_deps(
            move |mode| {
                apply_theme(*mode);
                || ()
            },
            mode,
        );
    }
    {
        let dispatch = dispatch.clone();
        use_effect_with_deps(
            move |_| {
                let listener = prefers_dark_listener(dispatch);
                move || drop(listener)
            },
            (),
        );
    }

    let toggle_theme = {
        let dispatch = dispatch.clone();
        Callback::from(move |_: MouseEvent| {
            dispatch.reduce_mut(|store| {
                store.theme.toggle_dark_mode(&LocalStore);
            });
        })
    };
    let toggle_menu = {
        let dispatch = dispatch.clone();
        Callback::from(move |_: MouseEvent| dispatch.reduce_mut(|store| store.theme.toggle_menu()))
    };
    let close_menu = {
        let dispatch = dispatch.clone();
        Callback::from(move |_: MouseEvent| dispatch.reduce_mut(|store| store.theme.close_menu()))
    };
    let logout = Callback::from(move |_: MouseEvent| {
        let mut next = Route::Home;
        dispatch.reduce_mut(|store| next = store.auth.logout(&LocalStore));
        tracing::info!("signed out");
        if let Some(navigator) = &navigator {
            navigator.push(&next);
        }
    });

    html! {
        <>
            <header class={classes!("nav", theme.menu_open.then_some("open"))}>
                <button class="menu-toggle" onclick={toggle_menu}>{ "☰" }</button>
                <nav onclick={close_menu}>
                    { for NAV_ROUTES.into_iter().map(|route| html! {
                        <Link<Route> to={route}>{ route.name() }</Link<Route>>
                    }) }
                </nav>
                <button class="theme-toggle" onclick={toggle_theme}>
                    { if theme.is_dark() { "Light" } else { "Dark" } }
                </button>
                if *signed_in {
                    <button class="logout" onclick={logout}>{ "Logout" }</button>
                }
            </header>
            <main>
                <Switch<Route> render={switch} />
            </main>
        </>
    }
}

fn switch(route: Route) -> Html {
    html! { <Guarded route={route} /> }
}

#[derive(Properties, PartialEq)]
struct GuardedProps {
    route: Route,
}

#[function_component(Guarded)]
fn guarded(props: &GuardedProps) -> Html {
    let session = use_selector(|store: &AppStore| store.auth.session().clone());
    match evaluate(props.route, &session) {
        GuardDecision::Allow => views::render(props.route),
        GuardDecision::Redirect(to) => {
            tracing::debug!(from = props.route.name(), to = to.name(), "navigation redirected");
            html! { <Redirect<Route> to={to} /> }
        }
    }
}

fn apply_theme(mode: ThemeMode) {
    let Some(document) = window().document() else {
        return;
    };
    let dark = mode == ThemeMode::Dark;
    if let Some(root) = document.document_element() {
        set_dark_class(&root, dark);
    }
    if let Some(body) = document.body() {
        set_dark_class(&body, dark);
    }
}

fn set_dark_class(element: &Element, dark: bool) {
    if let Err(err) = element
        .class_list()
        .toggle_with_force(ThemeMode::DARK_CLASS, dark)
    {
        tracing::warn!(?err, "failed to apply theme class");
    }
}

fn prefers_dark_listener(dispatch: Dispatch<AppStore>) -> Option<EventListener> {
    let query = window().match_media(PREFERS_DARK_QUERY).ok().flatten()?;
    Some(EventListener::new(&query, "change", move |event| {
        let prefers_dark = event
            .dyn_ref::<MediaQueryListEvent>()
            .is_some_and(MediaQueryListEvent::matches);
        dispatch.reduce_mut(|store| {
            store.theme.sync_with_system(prefers_dark, &LocalStore);
        });
    }))
}

/// Restore persisted state, then mount the app on `#root` (or `<body>`).
pub fn run_app() {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();

    let restored = AppStore::restore(&LocalStore);
    apply_theme(restored.theme.mode);
    Dispatch::<AppStore>::new().set(restored);

    if let Some(root) = gloo::utils::document().get_element_by_id("root") {
        yew::Renderer::<MarqueeApp>::with_root(root).render();
    } else {
        yew::Renderer::<MarqueeApp>::new().render();
    }
}
