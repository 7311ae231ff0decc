//! Session holder: the single owner of the current [`SessionState`].
//!
//! The store is an explicit object (inject it, share it behind `Arc`), never a
//! process-wide singleton. Every login/register captures a [`LoginTicket`];
//! logout and newer logins advance the generation, so a request that resolves
//! late can never resurrect a session the user already left.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};

use crate::credentials::{CredentialStore, StoredSession};
use crate::service::{AuthService, Credentials, LoginResponse, RegisterRequest};
use crate::{AuthError, AuthToken, Identity, Permission, PermissionSet, Session, SessionState};

/// Proof that a login started in a given session generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub struct LoginTicket {
    generation: u64,
}

impl LoginTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Default)]
struct Inner {
    state: SessionState,
    generation: u64,
}

pub struct SessionStore<C> {
    credentials: C,
    inner: RwLock<Inner>,
}

impl<C: CredentialStore> SessionStore<C> {
    /// New store in the `Loading` state; call [`Self::bootstrap`] next.
    pub fn new(credentials: C) -> Self {
        Self {
            credentials,
            inner: RwLock::new(Inner::default()),
        }
    }

    pub fn credentials(&self) -> &C {
        &self.credentials
    }

    // A poisoned lock still holds a consistent state: every write replaces it whole.
    fn read(&self) -> RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Restore the persisted session, leaving `Loading` in every case.
    ///
    /// Expired or malformed stored sessions are discarded and storage is
    /// cleared. If a login already completed, bootstrap is a no-op.
    pub fn bootstrap(&self, now: DateTime<Utc>) -> Result<(), AuthError> {
        let loaded = self.credentials.load();

        let mut inner = self.write();
        if !inner.state.is_loading() {
            return Ok(());
        }

        let stored = match loaded {
            Ok(stored) => stored,
            Err(e) => {
                tracing::warn!(error = %e, "failed to read stored session");
                inner.state = SessionState::Unauthenticated;
                return Err(e);
            }
        };

        let Some(stored) = stored else {
            tracing::info!("no stored session");
            inner.state = SessionState::Unauthenticated;
            return Ok(());
        };

        let session = stored.into_session();
        let verdict = if session.token.is_empty() {
            Err(AuthError::MissingToken)
        } else {
            session.validate(now).map_err(AuthError::from)
        };

        match verdict {
            Ok(()) => {
                tracing::info!(user_id = session.identity.user_id, "restored stored session");
                inner.state = SessionState::Authenticated(session);
                Ok(())
            }
            Err(e) => {
                tracing::info!(reason = %e, "discarding stored session");
                inner.state = SessionState::Unauthenticated;
                drop(inner);
                self.credentials.clear()
            }
        }
    }

    /// Start a login. Any login still in flight becomes stale.
    pub fn begin_login(&self) -> LoginTicket {
        let mut inner = self.write();
        inner.generation += 1;
        LoginTicket {
            generation: inner.generation,
        }
    }

    /// Install the session from a login response, unless the ticket is stale.
    pub fn complete_login(
        &self,
        ticket: LoginTicket,
        response: LoginResponse,
        now: DateTime<Utc>,
    ) -> Result<Identity, AuthError> {
        if response.token.trim().is_empty() {
            return Err(AuthError::MissingToken);
        }

        let session = Session::new(
            response.identity,
            PermissionSet::from_granted(&response.permissions),
            AuthToken::new(response.token),
        )
        .with_window(response.issued_at, response.expires_at);
        session.validate(now)?;

        let mut inner = self.write();
        if inner.generation != ticket.generation {
            tracing::warn!(
                ticket = ticket.generation,
                current = inner.generation,
                "discarding login that resolved after logout or a newer login"
            );
            return Err(AuthError::StaleLogin);
        }

        self.credentials.save(&StoredSession::from(&session))?;

        let identity = session.identity.clone();
        tracing::info!(
            user_id = identity.user_id,
            permissions = session.permissions.len(),
            "session established"
        );
        inner.state = SessionState::Authenticated(session);
        Ok(identity)
    }

    pub async fn login<S: AuthService>(
        &self,
        service: &S,
        credentials: &Credentials,
    ) -> Result<Identity, AuthError> {
        let ticket = self.begin_login();
        let response = service.login(credentials).await?;
        self.complete_login(ticket, response, Utc::now())
    }

    pub async fn register<S: AuthService>(
        &self,
        service: &S,
        request: &RegisterRequest,
    ) -> Result<Identity, AuthError> {
        let ticket = self.begin_login();
        let response = service.register(request).await?;
        self.complete_login(ticket, response, Utc::now())
    }

    /// Clear the session and persisted credentials; in-flight logins go stale.
    pub fn logout(&self) -> Result<(), AuthError> {
        {
            let mut inner = self.write();
            inner.generation += 1;
            inner.state = SessionState::Unauthenticated;
        }
        tracing::info!("session cleared");
        self.credentials.clear()
    }

    pub fn state(&self) -> SessionState {
        self.read().state.clone()
    }

    pub fn generation(&self) -> u64 {
        self.read().generation
    }

    pub fn is_loading(&self) -> bool {
        self.read().state.is_loading()
    }

    pub fn is_authenticated(&self) -> bool {
        self.read().state.is_authenticated()
    }

    pub fn identity(&self) -> Option<Identity> {
        self.read().state.session().map(|s| s.identity.clone())
    }

    pub fn token(&self) -> Option<AuthToken> {
        self.read().state.session().map(|s| s.token.clone())
    }

    pub fn permissions(&self) -> PermissionSet {
        self.read().state.permissions()
    }

    /// Granted permissions in display order; empty unless authenticated.
    pub fn user_permissions(&self) -> Vec<Permission> {
        self.read()
            .state
            .session()
            .map(|s| s.permissions.sorted())
            .unwrap_or_default()
    }

    pub fn can(&self, permission: impl AsRef<str>) -> bool {
        self.with_permissions(|set| crate::has(set, permission))
    }

    pub fn cannot(&self, permission: impl AsRef<str>) -> bool {
        !self.can(permission)
    }

    pub fn can_any<P: AsRef<str>>(&self, permissions: &[P]) -> bool {
        self.with_permissions(|set| crate::has_any(set, permissions))
    }

    pub fn can_all<P: AsRef<str>>(&self, permissions: &[P]) -> bool {
        self.with_permissions(|set| crate::has_all(set, permissions))
    }

    fn with_permissions<R>(&self, f: impl FnOnce(&PermissionSet) -> R) -> R {
        let inner = self.read();
        match inner.state.session() {
            Some(session) => f(&session.permissions),
            None => f(&PermissionSet::empty()),
        }
    }
}
