//! Auth domain - session-based login for staff accounts
//!
//! Responsibilities:
//! - Credential lookup (Postgres or in-memory)
//! - Argon2 password verification
//! - Session token issue, validation, logout and expiry

pub mod authenticator;
pub mod credentials;
pub mod errors;
pub mod models;
pub mod password;
pub mod session;

pub use authenticator::{IssuedSession, SessionAuthenticator, SessionInfo};
pub use credentials::{CredentialStore, MemoryCredentialStore, PgCredentialStore};
pub use errors::AuthError;
pub use models::{Role, User};
pub use session::{Session, SessionStore, SessionToken};
