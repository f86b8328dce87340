//! Body metrics: record a measurement and list the history.

use crate::error::Error;
use crate::require_session;
use crate::validation::{optional_positive, positive, required, within};
use entity::messages::MessageResponse;
use entity::physical_data::{NewPhysicalData, PhysicalData};
use gateway::http::GatewayClient;
use log::*;

/// A measurement as entered. Only the weight is mandatory.
#[derive(Debug, Clone, Default)]
pub struct PhysicalDataForm {
    pub weight: Option<f64>,
    pub body_fat: Option<f64>,
    pub muscle_mass: Option<f64>,
    pub bmi: Option<f64>,
    pub waist: Option<f64>,
}

impl PhysicalDataForm {
    pub fn validate(&self) -> Result<NewPhysicalData, Error> {
        let weight = positive(required(self.weight, "weight")?, "weight")?;

        Ok(NewPhysicalData {
            weight,
            body_fat: within(self.body_fat, 0.0, 100.0, "body_fat")?,
            muscle_mass: optional_positive(self.muscle_mass, "muscle_mass")?,
            bmi: optional_positive(self.bmi, "bmi")?,
            waist: optional_positive(self.waist, "waist")?,
        })
    }
}

#[derive(Clone)]
pub struct PhysicalDataOps {
    client: GatewayClient,
}

impl PhysicalDataOps {
    pub fn new(client: GatewayClient) -> Self {
        Self { client }
    }

    /// `POST /physical-data`
    pub async fn add(&self, form: &PhysicalDataForm) -> Result<MessageResponse, Error> {
        let record = form.validate()?;
        require_session(&self.client).await?;

        debug!("Recording physical data, weight {}", record.weight);
        Ok(self.client.post("/physical-data", &record).await?)
    }

    /// `GET /physical-data`, newest first.
    pub async fn list(&self) -> Result<Vec<PhysicalData>, Error> {
        require_session(&self.client).await?;
        Ok(self.client.get("/physical-data").await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{DomainErrorKind, ValidationErrorKind};
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

    fn ops_for(url: &str, store: SessionStore) -> PhysicalDataOps {
        PhysicalDataOps::new(GatewayClient::builder(url, store).build().unwrap())
    }

    #[tokio::test]
    async fn add_weight_only_succeeds_on_created() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/physical-data")
            .match_header("authorization", "Bearer jwt-abc")
            .match_body(Matcher::Json(json!({"weight": 70.5})))
            .with_status(201)
            .with_body(r#"{"message": "recorded"}"#)
            .create_async()
            .await;

        let form = PhysicalDataForm {
            weight: Some(70.5),
            ..Default::default()
        };
        let response = ops_for(&server.url(), signed_in_store().await)
            .add(&form)
            .await
            .unwrap();

        assert_eq!(response.message, "recorded");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn missing_weight_is_rejected_before_dispatch() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/physical-data")
            .expect(0)
            .create_async()
            .await;

        let form = PhysicalDataForm {
            body_fat: Some(18.0),
            ..Default::default()
        };
        let err = ops_for(&server.url(), signed_in_store().await)
            .add(&form)
            .await
            .unwrap_err();

        assert_eq!(
            err.error_kind,
            DomainErrorKind::Validation(ValidationErrorKind::MissingField("weight"))
        );
        mock.assert_async().await;
    }

    #[test]
    fn body_fat_must_be_a_percentage() {
        let form = PhysicalDataForm {
            weight: Some(70.0),
            body_fat: Some(120.0),
            ..Default::default()
        };
        assert_eq!(
            form.validate().unwrap_err().error_kind,
            DomainErrorKind::Validation(ValidationErrorKind::OutOfRange("body_fat"))
        );
    }

    #[tokio::test]
    async fn list_decodes_history() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/physical-data")
            .with_status(200)
            .with_body(
                json!([
                    {"_id": "p2", "user_id": "u1", "weight": 70.1, "bmi": 22.4},
                    {"_id": "p1", "user_id": "u1", "weight": 71.0}
                ])
                .to_string(),
            )
            .create_async()
            .await;

        let records = ops_for(&server.url(), signed_in_store().await)
            .list()
            .await
            .unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "p2");
        assert_eq!(records[0].bmi, Some(22.4));
        assert_eq!(records[1].body_fat, None);
    }
}
