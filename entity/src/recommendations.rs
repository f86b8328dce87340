//! AI generated plans. Their inner structure is owned by the server and kept opaque.

use crate::Id;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DietRecommendation {
    #[serde(rename = "_id")]
    pub id: Id,
    pub user_id: Id,
    pub daily_calories: f64,
    /// Grams.
    pub protein: f64,
    /// Grams.
    pub carbs: f64,
    /// Grams.
    pub fat: f64,
    /// Breakfast, lunch, dinner and snack suggestions.
    pub meal_plan: Value,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct WorkoutRecommendation {
    #[serde(rename = "_id")]
    pub id: Id,
    pub user_id: Id,
    pub workout_plan: Value,
    pub weekly_schedule: Value,
    pub target_calories: f64,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}
