//! Server-computed diet and workout plans.
//!
//! Generating a plan stores it server-side, so the history endpoints return every plan
//! generated so far, newest first.

use crate::error::Error;
use crate::require_session;
use entity::recommendations::{DietRecommendation, WorkoutRecommendation};
use gateway::http::GatewayClient;
use log::*;

#[derive(Clone)]
pub struct RecommendationOps {
    client: GatewayClient,
}

impl RecommendationOps {
    pub fn new(client: GatewayClient) -> Self {
        Self { client }
    }

    /// `POST /recommendations/diet`
    pub async fn generate_diet(&self) -> Result<DietRecommendation, Error> {
        require_session(&self.client).await?;
        info!("Requesting a diet plan");
        Ok(self.client.post_empty("/recommendations/diet").await?)
    }

    /// `POST /recommendations/workout`
    pub async fn generate_workout(&self) -> Result<WorkoutRecommendation, Error> {
        require_session(&self.client).await?;
        info!("Requesting a workout plan");
        Ok(self.client.post_empty("/recommendations/workout").await?)
    }

    /// `GET /recommendations/diet`
    pub async fn diet_history(&self) -> Result<Vec<DietRecommendation>, Error> {
        require_session(&self.client).await?;
        Ok(self.client.get("/recommendations/diet").await?)
    }

    /// `GET /recommendations/workout`
    pub async fn workout_history(&self) -> Result<Vec<WorkoutRecommendation>, Error> {
        require_session(&self.client).await?;
        Ok(self.client.get("/recommendations/workout").await?)
    }
}
