//! `pymes-auth`: client-side permission model (catalog, evaluation, session).
//!
//! This crate is intentionally decoupled from HTTP, storage engines and
//! rendering. The backend remains the authority; everything here only decides
//! what the UI offers.

pub mod authorize;
pub mod catalog;
pub mod claims;
pub mod credentials;
pub mod error;
pub mod permissions;
pub mod service;
pub mod session;
pub mod set;
pub mod store;

pub use authorize::{Decision, Requirement, has, has_all, has_any, not};
pub use catalog::Module;
pub use claims::{SessionWindowError, validate_session_window};
pub use credentials::{
    CredentialStore, InMemoryCredentialStore, JsonFileCredentialStore, StoredSession,
};
pub use error::AuthError;
pub use permissions::Permission;
pub use service::{AuthService, Credentials, LoginResponse, RegisterRequest};
pub use session::{AuthToken, Identity, Session, SessionState};
pub use set::PermissionSet;
pub use store::{LoginTicket, SessionStore};
