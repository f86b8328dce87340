//! The single coordinator that turns session events into view changes.
//!
//! The gateway only reports that a 401 happened; it never navigates. Registering a
//! [`Navigator`] with the [`events::EventPublisher`] handed to the gateway is what makes
//! an authorization failure anywhere send the user back to the login view.

use crate::guard::{Route, SessionGuard};
use async_trait::async_trait;
use events::{EventHandler, SessionEvent};
use log::*;
use tokio::sync::Mutex;

#[derive(Debug)]
pub struct Navigator {
    guard: SessionGuard,
    current: Mutex<Route>,
}

impl Navigator {
    pub fn new(guard: SessionGuard) -> Self {
        Self {
            guard,
            current: Mutex::new(Route::default()),
        }
    }

    /// Move to `route`, or to the login view if it is protected and no session is held.
    /// Returns the route actually shown.
    pub async fn navigate(&self, route: Route) -> Route {
        let target = if self.guard.allows(route).await {
            route
        } else {
            info!("{route} needs a session, redirecting to {}", Route::Login);
            Route::Login
        };

        self.go(target).await;
        target
    }

    pub async fn current(&self) -> Route {
        *self.current.lock().await
    }

    async fn go(&self, route: Route) {
        let mut current = self.current.lock().await;
        if *current != route {
            debug!("Navigating {} -> {route}", *current);
            *current = route;
        }
    }
}

#[async_trait]
impl EventHandler for Navigator {
    async fn handle(&self, event: &SessionEvent) {
        match event {
            SessionEvent::AuthorizationFailed { path } => {
                warn!("Authorization failed on {path}, returning to {}", Route::Login);
                self.go(Route::Login).await;
            }
            SessionEvent::SignedOut => self.go(Route::Login).await,
            SessionEvent::SignedIn { .. } => self.go(Route::Dashboard).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use entity::users::UserSummary;
    use events::EventPublisher;
    use gateway::http::GatewayClient;
    use gateway::session::SessionStore;
    use mockito::Server;
    use secrecy::SecretString;
    use serde_json::Value;
    use std::sync::Arc;

    async fn signed_in_store() -> SessionStore {
        let store = SessionStore::in_memory();
        store
            .set(
                SecretString::new("jwt-abc".to_string()),
                UserSummary {
                    id: "u1".to_string(),
                    username: "alice".to_string(),
                    email: "alice@example.com".to_string(),
                },
            )
            .await
            .unwrap();
        store
    }

    #[tokio::test]
    async fn protected_route_redirects_without_session() {
        let navigator = Navigator::new(SessionGuard::new(SessionStore::in_memory()));

        assert_eq!(navigator.navigate(Route::Register).await, Route::Register);
        assert_eq!(navigator.navigate(Route::Dashboard).await, Route::Login);
        assert_eq!(navigator.current().await, Route::Login);
    }

    #[tokio::test]
    async fn unauthorized_response_redirects_current_and_queued_navigation() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/auth/profile")
            .with_status(401)
            .with_body(r#"{"msg": "Token has expired"}"#)
            .create_async()
            .await;

        let store = signed_in_store().await;
        let guard = SessionGuard::new(store.clone());
        let navigator = Arc::new(Navigator::new(guard.clone()));
        let events = EventPublisher::new().with_handler(navigator.clone());
        let client = GatewayClient::builder(server.url(), store)
            .with_events(events)
            .build()
            .unwrap();

        assert_eq!(navigator.navigate(Route::Profile).await, Route::Profile);

        let err = client.get::<Value>("/auth/profile").await.unwrap_err();
        assert!(err.is_unauthorized());

        assert!(!guard.is_authorized().await);
        assert_eq!(navigator.current().await, Route::Login);
        assert_eq!(navigator.navigate(Route::Exercises).await, Route::Login);
    }

    #[tokio::test]
    async fn sign_in_and_out_move_between_dashboard_and_login() {
        let navigator = Navigator::new(SessionGuard::new(signed_in_store().await));

        navigator
            .handle(&SessionEvent::SignedIn {
                user_id: "u1".to_string(),
            })
            .await;
        assert_eq!(navigator.current().await, Route::Dashboard);

        navigator.handle(&SessionEvent::SignedOut).await;
        assert_eq!(navigator.current().await, Route::Login);
    }
}
