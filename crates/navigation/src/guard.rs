//! Route guard: decides whether a page renders, waits, or redirects.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use pymes_auth::{Decision, Requirement, SessionState};

use crate::config::GateConfig;

pub const DENIAL_MESSAGE: &str = "You do not have permission to access this page";

/// Who may reach a route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteAccess {
    /// Reachable without a session (e.g. the login page).
    Anonymous,
    /// Requires a session; the requirement is evaluated on top of that.
    Authenticated(Requirement),
}

/// A guarded page declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    pub path: String,
    pub access: RouteAccess,
    /// Overrides [`GateConfig::default_fallback`] on denial.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect_to: Option<String>,
}

impl Route {
    pub fn anonymous(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            access: RouteAccess::Anonymous,
            redirect_to: None,
        }
    }

    pub fn protected(path: impl Into<String>, requirement: Requirement) -> Self {
        Self {
            path: path.into(),
            access: RouteAccess::Authenticated(requirement),
            redirect_to: None,
        }
    }

    pub fn redirect_to(mut self, path: impl Into<String>) -> Self {
        self.redirect_to = Some(path.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    Error,
}

/// User-facing notice carried along a redirect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationState {
    pub message: String,
    pub kind: NoticeKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Redirect {
    pub to: String,
    /// Replace the current history entry instead of pushing.
    pub replace: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<NavigationState>,
}

impl Redirect {
    pub fn replace(to: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            replace: true,
            state: None,
        }
    }

    pub fn with_state(mut self, state: NavigationState) -> Self {
        self.state = Some(state);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum GuardOutcome {
    /// Session restoration still in flight: show a loading indicator.
    Loading,
    Render,
    Redirect(Redirect),
}

impl GuardOutcome {
    pub fn redirect(&self) -> Option<&Redirect> {
        match self {
            GuardOutcome::Redirect(r) => Some(r),
            _ => None,
        }
    }
}

/// Stateless route guard. Never touches the session; only decides navigation.
#[derive(Debug, Clone, Default)]
pub struct RouteGuard {
    config: GateConfig,
}

impl RouteGuard {
    pub fn new(config: GateConfig) -> Self {
        Self { config }
    }

    /// Decide what happens when `route` is visited at `now`.
    ///
    /// A session whose validity window has closed counts as no session.
    pub fn check(
        &self,
        route: &Route,
        state: &SessionState,
        now: DateTime<Utc>,
    ) -> GuardOutcome {
        let requirement = match &route.access {
            RouteAccess::Anonymous => return GuardOutcome::Render,
            RouteAccess::Authenticated(requirement) => requirement,
        };

        let session = match state {
            SessionState::Loading => return GuardOutcome::Loading,
            SessionState::Unauthenticated => {
                tracing::debug!(path = %route.path, "no session; redirecting to login");
                return GuardOutcome::Redirect(Redirect::replace(&self.config.auth_path));
            }
            SessionState::Authenticated(session) => session,
        };

        if let Err(e) = session.validate(now) {
            tracing::debug!(
                path = %route.path,
                reason = %e,
                "session expired; redirecting to login"
            );
            return GuardOutcome::Redirect(Redirect::replace(&self.config.auth_path));
        }

        // Routes only need a session when they declare nothing more.
        match requirement.evaluate(&session.permissions) {
            Decision::Granted | Decision::Undeclared => GuardOutcome::Render,
            Decision::Denied => {
                let to = route
                    .redirect_to
                    .as_deref()
                    .unwrap_or(&self.config.default_fallback);

                tracing::debug!(
                    path = %route.path,
                    user_id = session.identity.user_id,
                    missing = ?requirement.missing(&session.permissions),
                    redirect = to,
                    "route denied"
                );

                GuardOutcome::Redirect(Redirect::replace(to).with_state(NavigationState {
                    message: DENIAL_MESSAGE.to_string(),
                    kind: NoticeKind::Error,
                }))
            }
        }
    }
}
