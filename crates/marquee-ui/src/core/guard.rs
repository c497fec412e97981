//! Navigation gate evaluated before every route transition.
//!
//! Synchronous and side-effect free: no storage reads, no network.

use crate::core::auth::Session;
use crate::core::route::Route;

/// Outcome of a guard evaluation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    /// Proceed to the requested route.
    Allow,
    /// Navigate to the given route instead.
    Redirect(Route),
}

/// Decide whether `target` may be shown for `session`.
///
/// The sign-in route is always allowed. Every other route requires the
/// authenticated flag plus at least one credential; the flag alone is not proof.
#[must_use]
pub fn evaluate(target: Route, session: &Session) -> GuardDecision {
    if target == Route::SignIn || (session.is_authenticated && session.has_credentials()) {
        GuardDecision::Allow
    } else {
        GuardDecision::Redirect(Route::SignIn)
    }
}
