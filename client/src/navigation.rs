//! Routes and the navigation seam
//!
//! The client never changes "pages" itself. Anything that must move the
//! user elsewhere (a failed refresh, a guard redirect) goes through a
//! `Navigator`, which the front-end implements.

use crate::api::AppFlavor;
use std::fmt;
use std::sync::Mutex;
use tracing::info;

/// Application routes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Register,
    Dashboard,
    Activities,
    AddActivity,
    Workouts,
    Diet,
    Water,
    Profile,
}

/// How a route is protected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteAccess {
    /// Only for authenticated users
    Protected,
    /// Only for anonymous users (login, registration)
    Public,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::Register => "/register",
            Route::Dashboard => "/dashboard",
            Route::Activities => "/activities",
            Route::AddActivity => "/add-activity",
            Route::Workouts => "/workouts",
            Route::Diet => "/diet",
            Route::Water => "/water",
            Route::Profile => "/profile",
        }
    }

    /// Resolve a path; the root maps to the dashboard
    pub fn from_path(path: &str) -> Option<Route> {
        let trimmed = path.trim_end_matches('/');
        let route = match trimmed {
            "" => Route::Dashboard,
            "/login" => Route::Login,
            "/register" => Route::Register,
            "/dashboard" => Route::Dashboard,
            "/activities" => Route::Activities,
            "/add-activity" => Route::AddActivity,
            "/workouts" => Route::Workouts,
            "/diet" => Route::Diet,
            "/water" => Route::Water,
            "/profile" => Route::Profile,
            _ => return None,
        };
        Some(route)
    }

    pub fn access(&self) -> RouteAccess {
        match self {
            Route::Login | Route::Register => RouteAccess::Public,
            _ => RouteAccess::Protected,
        }
    }

    /// Whether the flavor has this screen
    pub fn available_in(&self, flavor: AppFlavor) -> bool {
        match self {
            Route::Login | Route::Register | Route::Dashboard => true,
            Route::Activities | Route::AddActivity => flavor == AppFlavor::Skillup,
            Route::Workouts | Route::Diet | Route::Water | Route::Profile => {
                flavor == AppFlavor::Fitness
            }
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Receives redirect requests
pub trait Navigator: Send + Sync {
    fn redirect(&self, route: Route);
}

/// Navigator that remembers every redirect
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    redirects: Mutex<Vec<Route>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn redirects(&self) -> Vec<Route> {
        self.redirects.lock().map(|r| r.clone()).unwrap_or_default()
    }

    pub fn last(&self) -> Option<Route> {
        self.redirects.lock().ok().and_then(|r| r.last().copied())
    }

    /// Position to compare later redirects against
    pub fn mark(&self) -> usize {
        self.redirects.lock().map(|r| r.len()).unwrap_or_default()
    }

    /// Redirects recorded after `mark`
    pub fn since(&self, mark: usize) -> Vec<Route> {
        self.redirects
            .lock()
            .map(|r| r.get(mark..).map(<[Route]>::to_vec).unwrap_or_default())
            .unwrap_or_default()
    }
}

impl Navigator for RecordingNavigator {
    fn redirect(&self, route: Route) {
        info!(route = %route, "Redirect requested");
        if let Ok(mut redirects) = self.redirects.lock() {
            redirects.push(route);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("/", Some(Route::Dashboard))]
    #[case("", Some(Route::Dashboard))]
    #[case("/login", Some(Route::Login))]
    #[case("/activities/", Some(Route::Activities))]
    #[case("/nowhere", None)]
    fn test_from_path(#[case] path: &str, #[case] expected: Option<Route>) {
        assert_eq!(Route::from_path(path), expected);
    }

    #[test]
    fn test_route_access() {
        assert_eq!(Route::Login.access(), RouteAccess::Public);
        assert_eq!(Route::Register.access(), RouteAccess::Public);
        assert_eq!(Route::Water.access(), RouteAccess::Protected);
    }

    #[test]
    fn test_flavor_screens() {
        assert!(Route::Activities.available_in(AppFlavor::Skillup));
        assert!(!Route::Activities.available_in(AppFlavor::Fitness));
        assert!(Route::Diet.available_in(AppFlavor::Fitness));
        assert!(Route::Dashboard.available_in(AppFlavor::Fitness));
    }

    #[test]
    fn test_recording_navigator() {
        let navigator = RecordingNavigator::new();
        navigator.redirect(Route::Login);
        navigator.redirect(Route::Dashboard);
        assert_eq!(navigator.redirects(), vec![Route::Login, Route::Dashboard]);
        assert_eq!(navigator.last(), Some(Route::Dashboard));
    }

    #[test]
    fn test_redirects_since_mark() {
        let navigator = RecordingNavigator::new();
        navigator.redirect(Route::Login);
        let mark = navigator.mark();
        assert!(navigator.since(mark).is_empty());

        navigator.redirect(Route::Dashboard);
        assert_eq!(navigator.since(mark), vec![Route::Dashboard]);
        assert_eq!(navigator.since(10), Vec::<Route>::new());
    }
}
