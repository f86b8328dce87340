//! HTTP dispatch with session-aware middleware.

mod client;
mod middleware;
mod response;

pub use client::{GatewayClient, GatewayClientBuilder, HttpClientConfig};
pub use middleware::{AuthorizationFailureMiddleware, SessionAuthMiddleware};
pub use reqwest::Method;
