use crate::Id;
use serde::{Deserialize, Serialize};

/// Body of `POST /physical-data`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewPhysicalData {
    /// Kilograms.
    pub weight: f64,
    /// Percent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_fat: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub muscle_mass: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bmi: Option<f64>,
    /// Centimetres.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub waist: Option<f64>,
}

/// A recorded set of body metrics, as listed by `GET /physical-data`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PhysicalData {
    #[serde(rename = "_id")]
    pub id: Id,
    pub user_id: Id,
    pub weight: f64,
    #[serde(default)]
    pub body_fat: Option<f64>,
    #[serde(default)]
    pub muscle_mass: Option<f64>,
    #[serde(default)]
    pub bmi: Option<f64>,
    #[serde(default)]
    pub waist: Option<f64>,
    #[serde(default)]
    pub recorded_at: Option<String>,
}
