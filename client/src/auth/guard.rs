//! Route guards
//!
//! Protected routes render only for authenticated users; public routes
//! (login, registration) render only for anonymous ones.

use super::state::AuthState;
use crate::navigation::{Navigator, Route, RouteAccess};

/// What to do with a navigation request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Render,
    ShowLoading,
    Redirect(Route),
}

/// Decide whether `route` may render in the given auth state
pub fn guard(route: Route, state: &AuthState) -> GuardDecision {
    match (route.access(), state) {
        (_, AuthState::Loading) => GuardDecision::ShowLoading,
        (RouteAccess::Protected, AuthState::Authenticated(_)) => GuardDecision::Render,
        (RouteAccess::Protected, AuthState::Unauthenticated) => {
            GuardDecision::Redirect(Route::Login)
        }
        (RouteAccess::Public, AuthState::Authenticated(_)) => {
            GuardDecision::Redirect(Route::Dashboard)
        }
        (RouteAccess::Public, AuthState::Unauthenticated) => GuardDecision::Render,
    }
}

/// Apply the guard, forwarding any redirect to the navigator
///
/// Returns `true` when the route may render.
pub fn enforce(route: Route, state: &AuthState, navigator: &dyn Navigator) -> bool {
    match guard(route, state) {
        GuardDecision::Render => true,
        GuardDecision::ShowLoading => false,
        GuardDecision::Redirect(target) => {
            navigator.redirect(target);
            false
        }
    }
}
