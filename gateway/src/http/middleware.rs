//! Request and response interceptors.

use async_trait::async_trait;
use events::{EventPublisher, SessionEvent};
use http::Extensions;
use log::*;
use reqwest::header::{HeaderValue, AUTHORIZATION};
use reqwest::{Request, Response, StatusCode};
use reqwest_middleware::{Middleware, Next};
use secrecy::ExposeSecret;

use crate::session::SessionStore;

/// Attaches `Authorization: Bearer <token>` when the session holds a token.
///
/// The store is read on every dispatch, so a login or logout between two requests
/// made through the same client is reflected on the next one.
pub struct SessionAuthMiddleware {
    store: SessionStore,
}

impl SessionAuthMiddleware {
    pub fn new(store: SessionStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Middleware for SessionAuthMiddleware {
    async fn handle(
        &self,
        mut req: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> reqwest_middleware::Result<Response> {
        match self.store.token().await {
            Some(token) => {
                let mut value =
                    HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))
                        .map_err(|e| {
                            warn!("Stored token is not a valid header value");
                            reqwest_middleware::Error::middleware(e)
                        })?;
                value.set_sensitive(true);
                req.headers_mut().insert(AUTHORIZATION, value);
            }
            None => {
                req.headers_mut().remove(AUTHORIZATION);
            }
        }

        next.run(req, extensions).await
    }
}

/// Evicts the session on any 401, whoever issued the request.
///
/// The response itself is passed through untouched so the caller still gets its
/// rejection; the eviction and the published event are side effects.
pub struct AuthorizationFailureMiddleware {
    store: SessionStore,
    events: EventPublisher,
}

impl AuthorizationFailureMiddleware {
    pub fn new(store: SessionStore, events: EventPublisher) -> Self {
        Self { store, events }
    }
}

#[async_trait]
impl Middleware for AuthorizationFailureMiddleware {
    async fn handle(
        &self,
        req: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> reqwest_middleware::Result<Response> {
        let path = req.url().path().to_string();
        let response = next.run(req, extensions).await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            warn!("Authorization failed for {path}, clearing session");
            if let Err(e) = self.store.clear().await {
                error!("Failed to remove persisted session after 401: {e}");
            }
            self.events
                .publish(SessionEvent::AuthorizationFailed { path })
                .await;
        }

        Ok(response)
    }
}
