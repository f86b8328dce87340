//! Operation groups, routing and view aggregation for the fitness client.
//!
//! Views depend on this crate only. The wire models are re-exported from `entity` so
//! callers do not need to depend on it directly, and gateway failures arrive translated
//! into [`error::Error`].
pub use entity::{
    activity_level, exercises, gender, goal, intensity, messages, physical_data, recommendations,
    users, Id,
};

pub mod aggregate;
pub mod auth;
pub mod error;
pub mod exercise;
pub mod guard;
pub mod navigation;
pub mod physical;
pub mod recommendation;
pub mod validation;
pub mod views;

pub use error::Error;

use events::EventPublisher;
use gateway::http::GatewayClient;

/// Fails fast when no session is held, so a protected operation never reaches the wire
/// without a token.
pub(crate) async fn require_session(client: &GatewayClient) -> Result<(), Error> {
    if client.session().is_authenticated().await {
        Ok(())
    } else {
        Err(Error::unauthenticated())
    }
}

/// Every operation group, sharing one gateway client.
#[derive(Clone)]
pub struct Api {
    client: GatewayClient,
    events: EventPublisher,
}

impl Api {
    pub fn new(client: GatewayClient, events: EventPublisher) -> Self {
        Self { client, events }
    }

    pub fn auth(&self) -> auth::Auth {
        auth::Auth::new(self.client.clone(), self.events.clone())
    }

    pub fn physical_data(&self) -> physical::PhysicalDataOps {
        physical::PhysicalDataOps::new(self.client.clone())
    }

    pub fn exercises(&self) -> exercise::ExerciseOps {
        exercise::ExerciseOps::new(self.client.clone())
    }

    pub fn recommendations(&self) -> recommendation::RecommendationOps {
        recommendation::RecommendationOps::new(self.client.clone())
    }

    pub fn client(&self) -> &GatewayClient {
        &self.client
    }
}
