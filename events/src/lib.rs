//! Session event infrastructure for the fitness client.
//!
//! This crate decouples the gateway, which notices session changes while talking to
//! the service, from whoever reacts to them (navigation, UI state, logging).
//!
//! # Architecture
//!
//! - **SessionEvent**: Enum of every session-level change the client can observe
//! - **EventHandler**: Trait for implementing event handlers
//! - **EventPublisher**: Publishes events to registered handlers
//!
//! This crate has no dependencies on internal crates (entity, gateway, etc.),
//! avoiding circular dependencies.

use async_trait::async_trait;
use log::*;
use std::sync::Arc;

/// Session events emitted by the gateway and the auth operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// A login succeeded and the session now holds a token for this user.
    SignedIn { user_id: String },
    /// The user explicitly logged out. The session is already empty.
    SignedOut,
    /// The service answered 401. The session has already been cleared;
    /// `path` is the request that tripped it, for tracing only.
    AuthorizationFailed { path: String },
}

impl SessionEvent {
    pub fn name(&self) -> &'static str {
        match self {
            SessionEvent::SignedIn { .. } => "signed_in",
            SessionEvent::SignedOut => "signed_out",
            SessionEvent::AuthorizationFailed { .. } => "authorization_failed",
        }
    }
}

/// Trait for handling session events.
/// Implementations perform side effects like navigation or cache eviction.
#[async_trait]
pub trait EventHandler: Send + Sync {
    async fn handle(&self, event: &SessionEvent);
}

/// Publishes session events to registered handlers.
/// Handlers are called sequentially in registration order.
#[derive(Clone)]
pub struct EventPublisher {
    handlers: Arc<Vec<Arc<dyn EventHandler>>>,
}

impl EventPublisher {
    pub fn new() -> Self {
        Self {
            handlers: Arc::new(Vec::new()),
        }
    }

    /// Register a new event handler.
    /// Note: This creates a new publisher instance with the additional handler.
    /// Build the publisher fully before handing clones to the gateway.
    pub fn with_handler(mut self, handler: Arc<dyn EventHandler>) -> Self {
        let mut handlers = (*self.handlers).clone();
        handlers.push(handler);
        self.handlers = Arc::new(handlers);
        self
    }

    /// Publish an event to all registered handlers.
    pub async fn publish(&self, event: SessionEvent) {
        debug!(
            "Publishing session event {} to {} handler(s)",
            event.name(),
            self.handlers.len()
        );
        for handler in self.handlers.iter() {
            handler.handle(&event).await;
        }
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }
}

impl Default for EventPublisher {
    fn default() -> Self {
        Self::new()
    }
}
