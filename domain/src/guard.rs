//! Routes and the predicate that protects them.

use gateway::session::SessionStore;
use std::fmt;
use std::str::FromStr;

/// Every view the client can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Home,
    Login,
    Register,
    Dashboard,
    PhysicalData,
    Exercises,
    Recommendations,
    Profile,
}

impl Route {
    pub const ALL: [Route; 8] = [
        Route::Home,
        Route::Login,
        Route::Register,
        Route::Dashboard,
        Route::PhysicalData,
        Route::Exercises,
        Route::Recommendations,
        Route::Profile,
    ];

    /// Views that need a session to render.
    pub fn is_protected(self) -> bool {
        !matches!(self, Route::Home | Route::Login | Route::Register)
    }

    pub fn path(self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Login => "/login",
            Route::Register => "/register",
            Route::Dashboard => "/dashboard",
            Route::PhysicalData => "/physical-data",
            Route::Exercises => "/exercises",
            Route::Recommendations => "/recommendations",
            Route::Profile => "/profile",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl FromStr for Route {
    type Err = String;

    /// Accepts either the path (`/physical-data`) or the bare name (`physical-data`).
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let wanted = value.trim().trim_start_matches('/').to_lowercase();
        Route::ALL
            .into_iter()
            .find(|route| route.path().trim_start_matches('/') == wanted)
            .ok_or_else(|| format!("unknown route: {value}"))
    }
}

/// Decides whether navigation to a protected view may proceed.
#[derive(Clone, Debug)]
pub struct SessionGuard {
    store: SessionStore,
}

impl SessionGuard {
    pub fn new(store: SessionStore) -> Self {
        Self { store }
    }

    /// Reads the store on every call; a 401 elsewhere may have cleared it since the last one.
    pub async fn is_authorized(&self) -> bool {
        self.store.is_authenticated().await
    }

    /// Whether `route` may be shown right now.
    pub async fn allows(&self, route: Route) -> bool {
        !route.is_protected() || self.is_authorized().await
    }
}
