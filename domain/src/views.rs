//! Composite view data, fetched concurrently and delivered whole or not at all.

use crate::aggregate::{all2, all3, CompletionOrder};
use crate::error::Error;
use crate::Api;
use entity::exercises::Exercise;
use entity::physical_data::PhysicalData;
use entity::recommendations::{DietRecommendation, WorkoutRecommendation};
use entity::users::Profile;
use log::*;

/// How many of the newest measurements the dashboard shows.
pub const RECENT_PHYSICAL_DATA: usize = 3;
/// How many of the newest exercises the dashboard shows.
pub const RECENT_EXERCISES: usize = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    pub profile: Profile,
    pub physical_data: Vec<PhysicalData>,
    pub exercises: Vec<Exercise>,
}

impl Dashboard {
    /// Fetches the profile and both histories at once.
    ///
    /// All three requests are in flight together and all three run to completion. If
    /// any fails, the failure that arrived first is returned and nothing else is.
    pub async fn load(api: &Api) -> Result<Self, Error> {
        let auth = api.auth();
        let physical = api.physical_data();
        let exercises = api.exercises();

        let order = CompletionOrder::new();
        let (profile, physical_data, exercises) = tokio::join!(
            order.track(auth.profile()),
            order.track(physical.list()),
            order.track(exercises.list()),
        );

        let (profile, physical_data, exercises) = all3(profile, physical_data, exercises)
            .inspect_err(|e| warn!("Dashboard unavailable: {e}"))?;

        Ok(Self {
            profile,
            physical_data,
            exercises,
        })
    }

    pub fn recent_physical_data(&self) -> &[PhysicalData] {
        let end = self.physical_data.len().min(RECENT_PHYSICAL_DATA);
        &self.physical_data[..end]
    }

    pub fn recent_exercises(&self) -> &[Exercise] {
        let end = self.exercises.len().min(RECENT_EXERCISES);
        &self.exercises[..end]
    }

    pub fn latest_physical_data(&self) -> Option<&PhysicalData> {
        self.physical_data.first()
    }
}

/// Every plan generated so far, newest first.
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationHistory {
    pub diet: Vec<DietRecommendation>,
    pub workout: Vec<WorkoutRecommendation>,
}

impl RecommendationHistory {
    pub async fn load(api: &Api) -> Result<Self, Error> {
        let recommendations = api.recommendations();

        let order = CompletionOrder::new();
        let (diet, workout) = tokio::join!(
            order.track(recommendations.diet_history()),
            order.track(recommendations.workout_history()),
        );

        let (diet, workout) = all2(diet, workout)
            .inspect_err(|e| warn!("Recommendation history unavailable: {e}"))?;

        Ok(Self { diet, workout })
    }

    pub fn latest_diet(&self) -> Option<&DietRecommendation> {
        self.diet.first()
    }

    pub fn latest_workout(&self) -> Option<&WorkoutRecommendation> {
        self.workout.first()
    }
}
