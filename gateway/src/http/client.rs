//! The gateway client every operation funnels through.

use std::sync::Arc;
use std::time::Duration;

use events::EventPublisher;
use log::*;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::Method;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::middleware::{AuthorizationFailureMiddleware, SessionAuthMiddleware};
use super::response::into_outcome;
use crate::error::Error;
use crate::session::SessionStore;
use crate::Outcome;

/// HTTP client configuration.
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Request timeout. `None` leaves hung requests pending indefinitely.
    pub timeout: Option<Duration>,
    /// User agent string.
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: None,
            user_agent: format!("fitness-gateway/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Builder for the gateway client.
///
/// The session store is injected here and shared with the middleware; the event
/// publisher receives `AuthorizationFailed` whenever a response is a 401.
pub struct GatewayClientBuilder {
    base_url: String,
    store: SessionStore,
    events: EventPublisher,
    config: HttpClientConfig,
}

impl GatewayClientBuilder {
    pub fn new(base_url: impl Into<String>, store: SessionStore) -> Self {
        Self {
            base_url: base_url.into(),
            store,
            events: EventPublisher::new(),
            config: HttpClientConfig::default(),
        }
    }

    /// Set the publisher authorization failures are reported to.
    pub fn with_events(mut self, events: EventPublisher) -> Self {
        self.events = events;
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the user agent string.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Build the configured client.
    pub fn build(self) -> Result<GatewayClient, Error> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let mut builder = reqwest::Client::builder()
            .use_rustls_tls()
            .default_headers(headers)
            .user_agent(self.config.user_agent);
        if let Some(timeout) = self.config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        // The first middleware registered is the outermost one.
        let http = ClientBuilder::new(client)
            .with(AuthorizationFailureMiddleware::new(
                self.store.clone(),
                self.events,
            ))
            .with(SessionAuthMiddleware::new(self.store.clone()))
            .build();

        Ok(GatewayClient {
            http,
            base_url: Arc::from(self.base_url.trim_end_matches('/')),
            store: self.store,
        })
    }
}

/// Dispatches requests against one base endpoint.
///
/// Cheap to clone and safe to use concurrently; the session store is the only
/// state shared between requests.
#[derive(Clone)]
pub struct GatewayClient {
    http: ClientWithMiddleware,
    base_url: Arc<str>,
    store: SessionStore,
}

impl GatewayClient {
    pub fn builder(base_url: impl Into<String>, store: SessionStore) -> GatewayClientBuilder {
        GatewayClientBuilder::new(base_url, store)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The session store this client reads tokens from.
    pub fn session(&self) -> &SessionStore {
        &self.store
    }

    /// Dispatch one request and decode the success body.
    ///
    /// Never retries. A 401 has already cleared the session by the time the
    /// `Unauthorized` error is returned.
    pub async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Outcome<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!("{method} {path}");

        let mut request = self.http.request(method.clone(), &url);
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await.map_err(|e| {
            let err = Error::from(e);
            warn!("{method} {path} failed before a response arrived: {err}");
            err
        })?;

        debug!("{method} {path} -> {}", response.status());
        into_outcome(response).await
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Outcome<T> {
        self.send(Method::GET, path, None).await
    }

    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Outcome<T> {
        self.send(Method::POST, path, Some(serde_json::to_value(body)?))
            .await
    }

    /// POST with no request body, for operations that only trigger server work.
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Outcome<T> {
        self.send(Method::POST, path, None).await
    }

    pub async fn put<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Outcome<T> {
        self.send(Method::PUT, path, Some(serde_json::to_value(body)?))
            .await
    }
}
