use thiserror::Error;

use crate::claims::SessionWindowError;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// A login/register finished after a logout or a newer login.
    #[error("stale login discarded (session generation moved on)")]
    StaleLogin,

    #[error("authentication service failed: {0}")]
    Service(String),

    #[error("credential storage failed: {0}")]
    Storage(String),

    #[error("backend returned an empty token")]
    MissingToken,

    #[error("invalid session: {0}")]
    InvalidSession(#[from] SessionWindowError),
}

impl AuthError {
    pub fn service(msg: impl Into<String>) -> Self {
        Self::Service(msg.into())
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }
}
