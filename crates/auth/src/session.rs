use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::claims::{SessionWindowError, validate_session_window};
use crate::{Permission, PermissionSet};

/// Authenticated identity as reported by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub user_id: i64,
    pub name: String,
    /// Role label for display; authorization never looks at it.
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Bearer token issued at login. Never printed in full.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl core::fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("AuthToken(***)")
    }
}

/// An authenticated session: who, what they may do, and how to prove it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub identity: Identity,
    pub permissions: PermissionSet,
    pub token: AuthToken,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issued_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn new(identity: Identity, permissions: PermissionSet, token: AuthToken) -> Self {
        Self {
            identity,
            permissions,
            token,
            issued_at: None,
            expires_at: None,
        }
    }

    pub fn with_window(
        mut self,
        issued_at: Option<DateTime<Utc>>,
        expires_at: Option<DateTime<Utc>>,
    ) -> Self {
        self.issued_at = issued_at;
        self.expires_at = expires_at;
        self
    }

    pub fn validate(&self, now: DateTime<Utc>) -> Result<(), SessionWindowError> {
        validate_session_window(self.issued_at, self.expires_at, now)
    }

    pub fn has(&self, permission: &Permission) -> bool {
        crate::has(&self.permissions, permission)
    }
}

/// Session lifecycle as observed by guards and gates.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    /// Persisted credentials have not been read yet.
    #[default]
    Loading,
    Unauthenticated,
    Authenticated(Session),
}

impl SessionState {
    pub fn is_loading(&self) -> bool {
        matches!(self, SessionState::Loading)
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated(_))
    }

    pub fn session(&self) -> Option<&Session> {
        match self {
            SessionState::Authenticated(session) => Some(session),
            _ => None,
        }
    }

    /// Granted permissions; empty unless authenticated.
    pub fn permissions(&self) -> PermissionSet {
        self.session()
            .map(|s| s.permissions.clone())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{INVENTARIO_AJUSTAR, INVENTARIO_LEER};

    fn session() -> Session {
        Session::new(
            Identity {
                user_id: 7,
                name: "Marta Ruiz".to_string(),
                role: "Bodeguero".to_string(),
                email: None,
            },
            PermissionSet::from_granted(["INVENTARIO_LEER"]),
            AuthToken::new("tok-123"),
        )
    }

    #[test]
    fn token_is_redacted_in_debug() {
        let rendered = format!("{:?}", session());
        assert!(!rendered.contains("tok-123"));
        assert!(rendered.contains("AuthToken(***)"));
    }

    #[test]
    fn state_exposes_permissions_only_when_authenticated() {
        assert!(SessionState::Loading.permissions().is_empty());
        assert!(SessionState::Unauthenticated.permissions().is_empty());

        let state = SessionState::Authenticated(session());
        assert!(state.permissions().contains("INVENTARIO_LEER"));
        assert!(state.session().unwrap().has(&INVENTARIO_LEER));
        assert!(!state.session().unwrap().has(&INVENTARIO_AJUSTAR));
    }
}
