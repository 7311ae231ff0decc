//! Persisted credentials (the session restored at startup).

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{AuthError, AuthToken, Identity, PermissionSet, Session};

/// On-disk/in-storage shape of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSession {
    pub token: String,
    pub user: Identity,
    #[serde(default)]
    pub permissions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issued_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl StoredSession {
    pub fn into_session(self) -> Session {
        Session::new(
            self.user,
            PermissionSet::from_granted(&self.permissions),
            AuthToken::new(self.token),
        )
        .with_window(self.issued_at, self.expires_at)
    }
}

impl From<&Session> for StoredSession {
    fn from(session: &Session) -> Self {
        Self {
            token: session.token.as_str().to_string(),
            user: session.identity.clone(),
            permissions: session.permissions.clone().into(),
            issued_at: session.issued_at,
            expires_at: session.expires_at,
        }
    }
}

/// Storage boundary for the persisted session.
pub trait CredentialStore: Send + Sync {
    fn load(&self) -> Result<Option<StoredSession>, AuthError>;

    fn save(&self, session: &StoredSession) -> Result<(), AuthError>;

    fn clear(&self) -> Result<(), AuthError>;

    fn stored_token(&self) -> Result<Option<String>, AuthError> {
        Ok(self.load()?.map(|s| s.token))
    }

    fn stored_user(&self) -> Result<Option<Identity>, AuthError> {
        Ok(self.load()?.map(|s| s.user))
    }
}

/// In-memory credential store for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryCredentialStore {
    slot: Mutex<Option<StoredSession>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: StoredSession) -> Self {
        Self {
            slot: Mutex::new(Some(session)),
        }
    }
}

impl CredentialStore for InMemoryCredentialStore {
    fn load(&self) -> Result<Option<StoredSession>, AuthError> {
        let slot = self.slot.lock().map_err(|_| AuthError::storage("poisoned"))?;
        Ok(slot.clone())
    }

    fn save(&self, session: &StoredSession) -> Result<(), AuthError> {
        let mut slot = self.slot.lock().map_err(|_| AuthError::storage("poisoned"))?;
        *slot = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), AuthError> {
        let mut slot = self.slot.lock().map_err(|_| AuthError::storage("poisoned"))?;
        *slot = None;
        Ok(())
    }
}

/// JSON file credential store. A missing file means "no stored session".
#[derive(Debug, Clone)]
pub struct JsonFileCredentialStore {
    path: PathBuf,
}

impl JsonFileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CredentialStore for JsonFileCredentialStore {
    fn load(&self) -> Result<Option<StoredSession>, AuthError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(AuthError::storage(format!("{}: {e}", self.path.display()))),
        };

        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| AuthError::storage(format!("{}: {e}", self.path.display())))
    }

    fn save(&self, session: &StoredSession) -> Result<(), AuthError> {
        let json = serde_json::to_string_pretty(session)
            .map_err(|e| AuthError::storage(e.to_string()))?;
        std::fs::write(&self.path, json)
            .map_err(|e| AuthError::storage(format!("{}: {e}", self.path.display())))
    }

    fn clear(&self) -> Result<(), AuthError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AuthError::storage(format!("{}: {e}", self.path.display()))),
        }
    }
}
