//! Navigation targets shared by the guard and the router.
use yew_router::prelude::*;

/// Every navigable view.
#[derive(Clone, Copy, Routable, PartialEq, Eq, Debug, Hash)]
pub enum Route {
    /// Landing view with the featured movie and category rows.
    #[at("/")]
    Home,
    /// Infinite-scroll popular listing.
    #[at("/popular")]
    Popular,
    /// Title search.
    #[at("/search")]
    Search,
    /// Sign-in view; always reachable.
    #[at("/signin")]
    SignIn,
    /// Wishlisted movies.
    #[at("/wishlist")]
    Wishlist,
}

impl Route {
    /// All routes in navigation order.
    #[must_use]
    pub const fn all() -> [Self; 5] {
        [
            Self::Home,
            Self::Popular,
            Self::Search,
            Self::SignIn,
            Self::Wishlist,
        ]
    }

    /// Stable route name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Popular => "Popular",
            Self::Search => "Search",
            Self::SignIn => "SignIn",
            Self::Wishlist => "Wishlist",
        }
    }

    /// Case-insensitive lookup by route name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::all()
            .into_iter()
            .find(|route| route.name().eq_ignore_ascii_case(name.trim()))
    }
}
