//! Account operations: register, login, logout and the profile.

use crate::error::{Error, ValidationErrorKind};
use crate::require_session;
use crate::validation::{is_valid_email, optional_positive, optional_text, required_text};
use entity::activity_level::ActivityLevel;
use entity::gender::Gender;
use entity::goal::Goal;
use entity::messages::MessageResponse;
use entity::users::{
    LoginRequest, LoginResponse, Profile, ProfileUpdate, RegisterRequest, UserSummary,
};
use events::{EventPublisher, SessionEvent};
use gateway::http::GatewayClient;
use log::*;
use secrecy::SecretString;

/// Registration form as filled in by the user, including the confirmation password.
#[derive(Debug, Clone, Default)]
pub struct RegisterForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub gender: Option<Gender>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
    pub activity_level: Option<ActivityLevel>,
    pub goal: Option<Goal>,
}

impl RegisterForm {
    /// Checks the form and builds the request body.
    pub fn validate(&self) -> Result<RegisterRequest, Error> {
        if self.password != self.confirm_password {
            return Err(Error::validation(ValidationErrorKind::PasswordMismatch));
        }

        let username = required_text(Some(self.username.as_str()), "username")?;
        let email = required_text(Some(self.email.as_str()), "email")?;
        if !is_valid_email(&email) {
            return Err(Error::validation(ValidationErrorKind::InvalidEmail));
        }
        if self.password.is_empty() {
            return Err(Error::validation(ValidationErrorKind::MissingField("password")));
        }

        Ok(RegisterRequest {
            username,
            email,
            password: self.password.clone(),
            gender: self.gender,
            height: optional_positive(self.height, "height")?,
            weight: optional_positive(self.weight, "weight")?,
            activity_level: self.activity_level,
            goal: self.goal,
        })
    }
}

/// Login credentials. The service identifies accounts by email.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn validate(&self) -> Result<LoginRequest, Error> {
        let email = required_text(Some(self.email.as_str()), "email")?;
        if self.password.is_empty() {
            return Err(Error::validation(ValidationErrorKind::MissingField("password")));
        }
        Ok(LoginRequest {
            email,
            password: self.password.clone(),
        })
    }
}

/// The Auth operation group. The only writer of the session besides the gateway's
/// 401 handling.
#[derive(Clone)]
pub struct Auth {
    client: GatewayClient,
    events: EventPublisher,
}

impl Auth {
    pub fn new(client: GatewayClient, events: EventPublisher) -> Self {
        Self { client, events }
    }

    /// `POST /auth/register`. Does not sign the new account in.
    pub async fn register(&self, form: &RegisterForm) -> Result<MessageResponse, Error> {
        let request = form.validate()?;
        info!("Registering account {}", request.username);
        Ok(self.client.post("/auth/register", &request).await?)
    }

    /// `POST /auth/login`, then stores the issued token and user in the session.
    pub async fn login(&self, credentials: &Credentials) -> Result<UserSummary, Error> {
        let request = credentials.validate()?;
        let response: LoginResponse = self.client.post("/auth/login", &request).await?;

        self.client
            .session()
            .set(SecretString::new(response.access_token), response.user.clone())
            .await?;
        info!("Signed in as {}", response.user.username);

        self.events
            .publish(SessionEvent::SignedIn {
                user_id: response.user.id.clone(),
            })
            .await;
        Ok(response.user)
    }

    /// Clears the session locally. The service keeps no server-side session to end.
    pub async fn logout(&self) -> Result<(), Error> {
        let cleared = self.client.session().clear().await;
        info!("Signed out");
        self.events.publish(SessionEvent::SignedOut).await;
        cleared.map_err(Error::from)
    }

    /// `GET /auth/profile`
    pub async fn profile(&self) -> Result<Profile, Error> {
        require_session(&self.client).await?;
        Ok(self.client.get("/auth/profile").await?)
    }

    /// `PUT /auth/profile` with only the fields being changed.
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<MessageResponse, Error> {
        let update = ProfileUpdate {
            username: optional_text(update.username.as_deref()),
            birth_date: optional_text(update.birth_date.as_deref()),
            height: optional_positive(update.height, "height")?,
            weight: optional_positive(update.weight, "weight")?,
            ..update.clone()
        };
        if update.is_empty() {
            return Err(Error::validation(ValidationErrorKind::EmptyUpdate));
        }

        require_session(&self.client).await?;
        Ok(self.client.put("/auth/profile", &update).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DomainErrorKind;
    use gateway::session::SessionStore;
    use mockito::{Matcher, Server};
    use secrecy::ExposeSecret;
    use serde_json::json;

    fn register_form() -> RegisterForm {
        RegisterForm {
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password: "hunter22".to_string(),
            confirm_password: "hunter22".to_string(),
            ..Default::default()
        }
    }

    fn auth_for(url: &str, store: SessionStore) -> Auth {
        let client = GatewayClient::builder(url, store).build().unwrap();
        Auth::new(client, EventPublisher::new())
    }

    #[tokio::test]
    async fn mismatched_passwords_are_rejected_before_any_request() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/auth/register")
            .expect(0)
            .create_async()
            .await;

        let form = RegisterForm {
            confirm_password: "different".to_string(),
            ..register_form()
        };
        let err = auth_for(&server.url(), SessionStore::in_memory())
            .register(&form)
            .await
            .unwrap_err();

        assert_eq!(
            err.error_kind,
            DomainErrorKind::Validation(ValidationErrorKind::PasswordMismatch)
        );
        mock.assert_async().await;
    }

    #[test]
    fn register_requires_username_and_valid_email() {
        let missing_username = RegisterForm {
            username: " ".to_string(),
            ..register_form()
        };
        assert_eq!(
            missing_username.validate().unwrap_err().error_kind,
            DomainErrorKind::Validation(ValidationErrorKind::MissingField("username"))
        );

        let bad_email = RegisterForm {
            email: "not-an-email".to_string(),
            ..register_form()
        };
        assert_eq!(
            bad_email.validate().unwrap_err().error_kind,
            DomainErrorKind::Validation(ValidationErrorKind::InvalidEmail)
        );

        let no_password = RegisterForm {
            password: String::new(),
            confirm_password: String::new(),
            ..register_form()
        };
        assert_eq!(
            no_password.validate().unwrap_err().error_kind,
            DomainErrorKind::Validation(ValidationErrorKind::MissingField("password"))
        );
    }

    #[tokio::test]
    async fn register_sends_optional_fields_and_not_the_confirmation() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/auth/register")
            .match_body(Matcher::Json(json!({
                "username": "alice",
                "email": "alice@example.com",
                "password": "hunter22",
                "goal": "lose",
                "height": 168.0
            })))
            .with_status(201)
            .with_body(r#"{"message": "registered"}"#)
            .create_async()
            .await;

        let form = RegisterForm {
            goal: Some(Goal::Lose),
            height: Some(168.0),
            ..register_form()
        };
        let store = SessionStore::in_memory();
        let response = auth_for(&server.url(), store.clone())
            .register(&form)
            .await
            .unwrap();

        assert_eq!(response.message, "registered");
        assert!(!store.is_authenticated().await);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn login_stores_token_and_user() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/auth/login")
            .match_body(Matcher::Json(json!({
                "email": "alice@example.com",
                "password": "hunter22"
            })))
            .with_status(200)
            .with_body(
                json!({
                    "access_token": "jwt-abc",
                    "user": {"id": "u1", "username": "alice", "email": "alice@example.com"}
                })
                .to_string(),
            )
            .create_async()
            .await;

        let store = SessionStore::in_memory();
        let user = auth_for(&server.url(), store.clone())
            .login(&Credentials {
                email: "alice@example.com".to_string(),
                password: "hunter22".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(user.username, "alice");
        assert_eq!(store.token().await.unwrap().expose_secret(), "jwt-abc");
        assert_eq!(store.get().await.user, Some(user));
    }

    #[tokio::test]
    async fn logout_clears_session_and_is_repeatable() {
        let store = SessionStore::in_memory();
        store
            .set(
                SecretString::new("tok".to_string()),
                UserSummary {
                    id: "u1".to_string(),
                    username: "alice".to_string(),
                    email: "alice@example.com".to_string(),
                },
            )
            .await
            .unwrap();
        let auth = auth_for("http://127.0.0.1:9", store.clone());

        auth.logout().await.unwrap();
        auth.logout().await.unwrap();

        assert!(!store.is_authenticated().await);
    }

    #[tokio::test]
    async fn profile_without_session_fails_fast() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/auth/profile")
            .expect(0)
            .create_async()
            .await;

        let err = auth_for(&server.url(), SessionStore::in_memory())
            .profile()
            .await
            .unwrap_err();

        assert_eq!(err.error_kind, DomainErrorKind::Unauthenticated);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn empty_profile_update_is_rejected_locally() {
        let update = ProfileUpdate {
            username: Some("   ".to_string()),
            ..Default::default()
        };
        let err = auth_for("http://127.0.0.1:9", SessionStore::in_memory())
            .update_profile(&update)
            .await
            .unwrap_err();

        assert_eq!(
            err.error_kind,
            DomainErrorKind::Validation(ValidationErrorKind::EmptyUpdate)
        );
    }
}
