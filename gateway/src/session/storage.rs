//! Durable session persistence.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use entity::users::UserSummary;
use log::*;
use serde::{Deserialize, Serialize};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::error::{session_error, Error, SessionErrorKind};

/// The persisted form of a session, keyed by the fixed names `token` and `user`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSession {
    pub token: String,
    pub user: UserSummary,
}

/// Trait for persisting the session across process restarts.
///
/// Implementations should:
/// - Treat a missing record as `Ok(None)`, not an error
/// - Make `remove` idempotent
/// - Replace the whole record in `store` so a reader never sees a token from one
///   login paired with the user of another
#[async_trait]
pub trait Storage: Send + Sync {
    /// Load the persisted session, if any.
    async fn load(&self) -> Result<Option<StoredSession>, Error>;

    /// Replace the persisted session.
    async fn store(&self, session: &StoredSession) -> Result<(), Error>;

    /// Delete the persisted session. Succeeds when nothing is stored.
    async fn remove(&self) -> Result<(), Error>;
}

/// Keeps the session in memory only. Nothing survives a restart.
#[derive(Default)]
pub struct MemoryStorage {
    session: Mutex<Option<StoredSession>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: StoredSession) -> Self {
        Self {
            session: Mutex::new(Some(session)),
        }
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn load(&self) -> Result<Option<StoredSession>, Error> {
        Ok(self.session.lock().await.clone())
    }

    async fn store(&self, session: &StoredSession) -> Result<(), Error> {
        *self.session.lock().await = Some(session.clone());
        Ok(())
    }

    async fn remove(&self) -> Result<(), Error> {
        *self.session.lock().await = None;
        Ok(())
    }
}

/// Stores the session as a small JSON document on disk.
///
/// Writes go to a sibling temp file which is then renamed over the target, so a
/// crash mid-write leaves either the old or the new session, never half of one.
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl Storage for FileStorage {
    async fn load(&self) -> Result<Option<StoredSession>, Error> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                warn!("Failed to read session file {}: {e}", self.path.display());
                return Err(Error {
                    source: Some(Box::new(e)),
                    error_kind: crate::ErrorKind::Session(SessionErrorKind::Read),
                });
            }
        };

        serde_json::from_str(&contents).map(Some).map_err(|e| {
            warn!("Session file {} is not a valid session", self.path.display());
            Error {
                source: Some(Box::new(e)),
                error_kind: crate::ErrorKind::Session(SessionErrorKind::Corrupt),
            }
        })
    }

    async fn store(&self, session: &StoredSession) -> Result<(), Error> {
        let contents = serde_json::to_vec_pretty(session)
            .map_err(|_| session_error(SessionErrorKind::Write, "Failed to encode session"))?;

        let temp_path = self.temp_path();
        write_private(&temp_path, &contents)
            .await
            .map_err(|e| write_error(e, &temp_path))?;
        tokio::fs::rename(&temp_path, &self.path)
            .await
            .map_err(|e| write_error(e, &self.path))?;

        debug!("Session persisted to {}", self.path.display());
        Ok(())
    }

    async fn remove(&self) -> Result<(), Error> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {
                debug!("Session file {} removed", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(write_error(e, &self.path)),
        }
    }
}

/// Writes `contents` to `path` readable by the owner only.
async fn write_private(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let mut options = tokio::fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    options.mode(0o600);

    let mut file = options.open(path).await?;
    file.write_all(contents).await?;
    file.sync_all().await?;

    // A stale temp file left by an earlier run keeps its old mode on open.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tokio::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600)).await?;
    }
    Ok(())
}

fn write_error(err: std::io::Error, path: &Path) -> Error {
    warn!("Failed to write session file {}: {err}", path.display());
    Error {
        source: Some(Box::new(err)),
        error_kind: crate::ErrorKind::Session(SessionErrorKind::Write),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    fn stored() -> StoredSession {
        StoredSession {
            token: "jwt-token".to_string(),
            user: UserSummary {
                id: "u1".to_string(),
                username: "alice".to_string(),
                email: "alice@example.com".to_string(),
            },
        }
    }

    fn scratch_file(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "fitness-session-{}-{}.json",
            std::process::id(),
            name
        ))
    }

    #[tokio::test]
    async fn file_storage_round_trips_and_removes() {
        let path = scratch_file("round-trip");
        let storage = FileStorage::new(&path);

        assert_eq!(storage.load().await.unwrap(), None);

        storage.store(&stored()).await.unwrap();
        assert_eq!(storage.load().await.unwrap(), Some(stored()));

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["token"], "jwt-token");
        assert_eq!(raw["user"]["username"], "alice");

        storage.remove().await.unwrap();
        assert_eq!(storage.load().await.unwrap(), None);
        // Removing again is not an error
        storage.remove().await.unwrap();
    }

    #[tokio::test]
    async fn file_storage_reports_corrupt_contents() {
        let path = scratch_file("corrupt");
        std::fs::write(&path, "not json").unwrap();

        let err = FileStorage::new(&path).load().await.unwrap_err();
        assert_eq!(err.error_kind, ErrorKind::Session(SessionErrorKind::Corrupt));

        std::fs::remove_file(&path).unwrap();
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn file_storage_keeps_the_token_private() {
        use std::os::unix::fs::PermissionsExt;

        let path = scratch_file("private");
        // A leftover temp file with a permissive mode must not leak it.
        std::fs::write(format!("{}.tmp", path.display()), "stale").unwrap();
        std::fs::set_permissions(
            format!("{}.tmp", path.display()),
            std::fs::Permissions::from_mode(0o644),
        )
        .unwrap();

        let storage = FileStorage::new(&path);
        storage.store(&stored()).await.unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o077, 0, "session file mode is {mode:o}");
        assert_eq!(storage.load().await.unwrap(), Some(stored()));

        storage.remove().await.unwrap();
    }

    #[test]
    fn temp_path_is_a_sibling() {
        let storage = FileStorage::new("/var/lib/fitness/session.json");
        assert_eq!(
            storage.temp_path(),
            PathBuf::from("/var/lib/fitness/session.json.tmp")
        );
    }

    #[tokio::test]
    async fn memory_storage_remove_is_idempotent() {
        let storage = MemoryStorage::with_session(stored());
        storage.remove().await.unwrap();
        storage.remove().await.unwrap();
        assert_eq!(storage.load().await.unwrap(), None);
    }
}
