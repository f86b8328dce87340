//! In-process session store backed by a persistence layer.

use std::fmt;
use std::sync::Arc;

use entity::users::UserSummary;
use log::*;
use secrecy::{ExposeSecret, SecretString};
use tokio::sync::RwLock;

use super::{MemoryStorage, Storage, StoredSession};
use crate::error::{Error, ErrorKind, SessionErrorKind};

/// The client-held proof of authentication and the identity it belongs to.
///
/// Both halves are present after a login and both are absent otherwise.
#[derive(Clone, Default)]
pub struct Session {
    pub token: Option<SecretString>,
    pub user: Option<UserSummary>,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("user", &self.user)
            .finish()
    }
}

impl From<StoredSession> for Session {
    fn from(stored: StoredSession) -> Self {
        Session {
            token: Some(SecretString::new(stored.token)),
            user: Some(stored.user),
        }
    }
}

/// Shared handle to the current session.
///
/// Clones share state. Every accessor reads the live value, so holders must not
/// cache what they read: a 401 on any in-flight request can clear it at any time.
#[derive(Clone)]
pub struct SessionStore {
    current: Arc<RwLock<Session>>,
    storage: Arc<dyn Storage>,
}

impl SessionStore {
    /// Restore the session persisted by a previous run.
    ///
    /// A corrupt record is discarded and the store starts empty; any other storage
    /// failure is returned.
    pub async fn load(storage: Arc<dyn Storage>) -> Result<Self, Error> {
        let session = match storage.load().await {
            Ok(Some(stored)) => {
                info!("Restored session for user {}", stored.user.username);
                Session::from(stored)
            }
            Ok(None) => Session::default(),
            Err(e) if e.error_kind == ErrorKind::Session(SessionErrorKind::Corrupt) => {
                warn!("Discarding unreadable session record: {e}");
                storage.remove().await?;
                Session::default()
            }
            Err(e) => return Err(e),
        };

        Ok(Self {
            current: Arc::new(RwLock::new(session)),
            storage,
        })
    }

    /// An empty store that persists nothing.
    pub fn in_memory() -> Self {
        Self {
            current: Arc::new(RwLock::new(Session::default())),
            storage: Arc::new(MemoryStorage::new()),
        }
    }

    /// The current session. No side effects.
    pub async fn get(&self) -> Session {
        self.current.read().await.clone()
    }

    /// The current token, read at call time.
    pub async fn token(&self) -> Option<SecretString> {
        self.current.read().await.token.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.current.read().await.is_authenticated()
    }

    /// Replace the session with a freshly issued token and its user.
    ///
    /// The record is persisted before the in-memory value changes; on a storage
    /// failure the previous session stays in place.
    pub async fn set(&self, token: SecretString, user: UserSummary) -> Result<(), Error> {
        let mut current = self.current.write().await;

        self.storage
            .store(&StoredSession {
                token: token.expose_secret().to_string(),
                user: user.clone(),
            })
            .await?;

        debug!("Session set for user {}", user.username);
        *current = Session {
            token: Some(token),
            user: Some(user),
        };
        Ok(())
    }

    /// Reset the session to the absent state. Calling it on an empty store is fine.
    ///
    /// The in-memory session is always cleared, even when removing the persisted
    /// record fails; that failure is still returned to the caller.
    pub async fn clear(&self) -> Result<(), Error> {
        let mut current = self.current.write().await;
        *current = Session::default();
        debug!("Session cleared");

        self.storage.remove().await
    }
}

impl fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionStore").finish_non_exhaustive()
    }
}
