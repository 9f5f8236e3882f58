use thiserror::Error;

/// Authentication errors surfaced by the session authenticator
#[derive(Error, Debug)]
pub enum AuthError {
    /// Bad credentials at login. Never says whether the username exists.
    #[error("Invalid credentials")]
    Unauthorized,

    /// Missing, malformed or expired session token
    #[error("Authentication required")]
    Unauthenticated,

    #[error("Credential store error: {0}")]
    Storage(#[from] anyhow::Error),
}
