//! Exercise log: record a workout and list the history.

use crate::error::{Error, ValidationErrorKind};
use crate::require_session;
use crate::validation::{optional_non_negative, optional_text, required, required_text};
use entity::exercises::{Exercise, NewExercise};
use entity::intensity::Intensity;
use entity::messages::MessageResponse;
use gateway::http::GatewayClient;
use log::*;

/// An exercise as entered. Type and duration are mandatory.
#[derive(Debug, Clone, Default)]
pub struct ExerciseForm {
    pub exercise_type: Option<String>,
    /// Minutes.
    pub duration: Option<u32>,
    pub calories_burned: Option<u32>,
    /// Metres.
    pub distance: Option<f64>,
    pub steps: Option<u32>,
    pub heart_rate: Option<u32>,
    pub intensity: Option<Intensity>,
    pub notes: Option<String>,
}

impl ExerciseForm {
    pub fn validate(&self) -> Result<NewExercise, Error> {
        let exercise_type = required_text(self.exercise_type.as_deref(), "exercise_type")?;
        let duration = required(self.duration, "duration")?;
        if duration == 0 {
            return Err(Error::validation(ValidationErrorKind::OutOfRange("duration")));
        }

        Ok(NewExercise {
            exercise_type,
            duration,
            calories_burned: self.calories_burned,
            distance: optional_non_negative(self.distance, "distance")?,
            steps: self.steps,
            heart_rate: self.heart_rate,
            intensity: self.intensity,
            notes: optional_text(self.notes.as_deref()),
        })
    }
}

#[derive(Clone)]
pub struct ExerciseOps {
    client: GatewayClient,
}

impl ExerciseOps {
    pub fn new(client: GatewayClient) -> Self {
        Self { client }
    }

    /// `POST /exercises`
    pub async fn add(&self, form: &ExerciseForm) -> Result<MessageResponse, Error> {
        let exercise = form.validate()?;
        require_session(&self.client).await?;

        debug!(
            "Recording {} minutes of {}",
            exercise.duration, exercise.exercise_type
        );
        Ok(self.client.post("/exercises", &exercise).await?)
    }

    /// `GET /exercises`, newest first.
    pub async fn list(&self) -> Result<Vec<Exercise>, Error> {
        require_session(&self.client).await?;
        Ok(self.client.get("/exercises").await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DomainErrorKind;
    use entity::users::UserSummary;
    use gateway::session::SessionStore;
    use mockito::{Matcher, Server};
    use secrecy::SecretString;
    use serde_json::json;

    async fn signed_in_store() -> SessionStore {
        let store = SessionStore::in_memory();
        store
            .set(
                SecretString::new("jwt-abc".to_string()),
                UserSummary {
                    id: "u1".to_string(),
                    username: "alice".to_string(),
                    email: "alice@example.com".to_string(),
                },
            )
            .await
            .unwrap();
        store
    }

    fn ops_for(url: &str, store: SessionStore) -> ExerciseOps {
        ExerciseOps::new(GatewayClient::builder(url, store).build().unwrap())
    }

    #[tokio::test]
    async fn missing_type_is_rejected_before_dispatch() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/exercises")
            .expect(0)
            .create_async()
            .await;

        let form = ExerciseForm {
            duration: Some(30),
            ..Default::default()
        };
        let err = ops_for(&server.url(), signed_in_store().await)
            .add(&form)
            .await
            .unwrap_err();

        assert_eq!(
            err.error_kind,
            DomainErrorKind::Validation(ValidationErrorKind::MissingField("exercise_type"))
        );
        mock.assert_async().await;
    }

    #[test]
    fn duration_must_be_present_and_positive() {
        let missing = ExerciseForm {
            exercise_type: Some("running".to_string()),
            ..Default::default()
        };
        assert_eq!(
            missing.validate().unwrap_err().error_kind,
            DomainErrorKind::Validation(ValidationErrorKind::MissingField("duration"))
        );

        let zero = ExerciseForm {
            duration: Some(0),
            ..missing
        };
        assert_eq!(
            zero.validate().unwrap_err().error_kind,
            DomainErrorKind::Validation(ValidationErrorKind::OutOfRange("duration"))
        );
    }

    #[tokio::test]
    async fn add_sends_trimmed_type_and_optionals() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/exercises")
            .match_header("authorization", "Bearer jwt-abc")
            .match_body(Matcher::Json(json!({
                "exercise_type": "cycling",
                "duration": 45,
                "distance": 18500.0,
                "intensity": "medium"
            })))
            .with_status(201)
            .with_body(r#"{"message": "recorded"}"#)
            .create_async()
            .await;

        let form = ExerciseForm {
            exercise_type: Some("  cycling ".to_string()),
            duration: Some(45),
            distance: Some(18500.0),
            intensity: Some(Intensity::Medium),
            notes: Some("   ".to_string()),
            ..Default::default()
        };
        ops_for(&server.url(), signed_in_store().await)
            .add(&form)
            .await
            .unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn server_rejection_is_passed_through() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/exercises")
            .with_status(400)
            .with_body(r#"{"error": "missing required fields"}"#)
            .create_async()
            .await;

        let form = ExerciseForm {
            exercise_type: Some("yoga".to_string()),
            duration: Some(20),
            ..Default::default()
        };
        let err = ops_for(&server.url(), signed_in_store().await)
            .add(&form)
            .await
            .unwrap_err();

        assert_eq!(err.user_message(), "missing required fields");
    }
}
