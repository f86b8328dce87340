use crate::{activity_level::ActivityLevel, gender::Gender, goal::Goal, Id};
use serde::{Deserialize, Serialize};

/// Minimal identity returned on login and kept in the session.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct UserSummary {
    pub id: Id,
    pub username: String,
    pub email: String,
}

/// Full profile as returned by `GET /auth/profile`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Profile {
    #[serde(rename = "_id")]
    pub id: Id,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub gender: Option<Gender>,
    #[serde(default)]
    pub birth_date: Option<String>,
    /// Centimetres.
    #[serde(default)]
    pub height: Option<f64>,
    /// Kilograms.
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub activity_level: Option<ActivityLevel>,
    #[serde(default)]
    pub goal: Option<Goal>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Body of `POST /auth/register`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity_level: Option<ActivityLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal: Option<Goal>,
}

/// Body of `POST /auth/login`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub user: UserSummary,
}

/// Body of `PUT /auth/profile`. Only the fields the service lets a user change.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity_level: Option<ActivityLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal: Option<Goal>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self == &ProfileUpdate::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn profile_deserializes_service_document() {
        let profile: Profile = serde_json::from_value(json!({
            "_id": "65f0c0ffee",
            "username": "alice",
            "email": "alice@example.com",
            "gender": "female",
            "height": 168.0,
            "weight": null,
            "activity_level": "high",
            "goal": "lose",
            "created_at": "Sat, 17 Oct 2026 10:00:00 GMT"
        }))
        .unwrap();

        assert_eq!(profile.id, "65f0c0ffee");
        assert_eq!(profile.gender, Some(Gender::Female));
        assert_eq!(profile.weight, None);
        assert_eq!(profile.activity_level, Some(ActivityLevel::High));
        assert_eq!(profile.goal, Some(Goal::Lose));
    }

    #[test]
    fn profile_update_omits_unset_fields() {
        let update = ProfileUpdate {
            weight: Some(71.2),
            ..Default::default()
        };

        assert_eq!(serde_json::to_value(&update).unwrap(), json!({ "weight": 71.2 }));
        assert!(!update.is_empty());
        assert!(ProfileUpdate::default().is_empty());
    }
}
