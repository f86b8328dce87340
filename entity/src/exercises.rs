use crate::{intensity::Intensity, Id};
use serde::{Deserialize, Serialize};

/// Body of `POST /exercises`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewExercise {
    pub exercise_type: String,
    /// Minutes.
    pub duration: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calories_burned: Option<u32>,
    /// Metres.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steps: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heart_rate: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intensity: Option<Intensity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// A recorded exercise session, as listed by `GET /exercises`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Exercise {
    #[serde(rename = "_id")]
    pub id: Id,
    pub user_id: Id,
    pub exercise_type: String,
    pub duration: u32,
    #[serde(default)]
    pub calories_burned: Option<u32>,
    /// Metres.
    #[serde(default)]
    pub distance: Option<f64>,
    #[serde(default)]
    pub steps: Option<u32>,
    #[serde(default)]
    pub heart_rate: Option<u32>,
    #[serde(default)]
    pub intensity: Option<Intensity>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub recorded_at: Option<String>,
}
