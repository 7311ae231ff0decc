use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionWindowError {
    #[error("session has expired")]
    Expired,

    #[error("session not yet valid (issued_at is in the future)")]
    NotYetValid,

    #[error("invalid session time window (expires_at <= issued_at)")]
    InvalidTimeWindow,
}

/// Deterministically validate a session's validity window.
///
/// Both bounds are optional: the backend does not always report them, and a
/// session without an expiry stays valid until logout.
pub fn validate_session_window(
    issued_at: Option<DateTime<Utc>>,
    expires_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> Result<(), SessionWindowError> {
    if let (Some(issued_at), Some(expires_at)) = (issued_at, expires_at) {
        if expires_at <= issued_at {
            return Err(SessionWindowError::InvalidTimeWindow);
        }
    }
    if issued_at.is_some_and(|issued_at| now < issued_at) {
        return Err(SessionWindowError::NotYetValid);
    }
    if expires_at.is_some_and(|expires_at| now >= expires_at) {
        return Err(SessionWindowError::Expired);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    #[test]
    fn open_window_is_valid() {
        assert_eq!(validate_session_window(None, None, Utc::now()), Ok(()));
    }

    #[test]
    fn expiry_is_exclusive() {
        let now = Utc::now();
        assert_eq!(
            validate_session_window(Some(now - Duration::hours(1)), Some(now), now),
            Err(SessionWindowError::Expired)
        );
        assert_eq!(
            validate_session_window(None, Some(now + Duration::seconds(1)), now),
            Ok(())
        );
    }

    #[test]
    fn future_issue_and_inverted_window_rejected() {
        let now = Utc::now();
        assert_eq!(
            validate_session_window(Some(now + Duration::minutes(5)), None, now),
            Err(SessionWindowError::NotYetValid)
        );
        assert_eq!(
            validate_session_window(Some(now), Some(now - Duration::minutes(5)), now),
            Err(SessionWindowError::InvalidTimeWindow)
        );
    }
}
