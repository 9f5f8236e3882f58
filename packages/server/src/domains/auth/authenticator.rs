use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tracing::{debug, info};

use super::credentials::CredentialStore;
use super::errors::AuthError;
use super::models::Role;
use super::password::{verify_against_dummy, verify_password};
use super::session::{Session, SessionStore, SessionToken};

/// Who a valid session belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionInfo {
    pub username: String,
    pub role: Role,
}

impl From<&Session> for SessionInfo {
    fn from(session: &Session) -> Self {
        Self {
            username: session.username.clone(),
            role: session.role,
        }
    }
}

/// Result of a successful login
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub token: SessionToken,
    pub info: SessionInfo,
    pub ttl: Duration,
}

/// Checks credentials and owns the session table
pub struct SessionAuthenticator {
    credentials: Arc<dyn CredentialStore>,
    sessions: SessionStore,
    ttl: Duration,
}

impl SessionAuthenticator {
    pub fn new(credentials: Arc<dyn CredentialStore>, ttl: Duration) -> Self {
        Self {
            credentials,
            sessions: SessionStore::new(),
            ttl,
        }
    }

    /// Verify credentials and mint a session.
    ///
    /// Unknown usernames and wrong passwords both come back as
    /// [`AuthError::Unauthorized`], after the same amount of hashing work.
    pub async fn login(&self, username: &str, password: &str) -> Result<IssuedSession, AuthError> {
        let user = self.credentials.find_by_username(username).await?;

        let password = password.to_string();
        let verified = tokio::task::spawn_blocking(move || match user {
            Some(user) => verify_password(&password, &user.password_hash).then_some(user),
            None => {
                verify_against_dummy(&password);
                None
            }
        })
        .await
        .map_err(|e| AuthError::Storage(anyhow::anyhow!("password verification task failed: {}", e)))?;

        let Some(user) = verified else {
            debug!(username = %username, "Login rejected");
            return Err(AuthError::Unauthorized);
        };

        let session = Session::new(user.username, user.role, self.ttl);
        let info = SessionInfo::from(&session);
        let token = self.sessions.create_session(session).await;

        info!(username = %info.username, role = %info.role, "Session created");

        Ok(IssuedSession {
            token,
            info,
            ttl: self.ttl,
        })
    }

    /// Resolve a token to its session.
    ///
    /// Missing, unknown and expired tokens are indistinguishable.
    pub async fn validate(&self, token: Option<&str>) -> Result<SessionInfo, AuthError> {
        let token = token.filter(|t| !t.is_empty()).ok_or(AuthError::Unauthenticated)?;

        self.sessions
            .get_session(token)
            .await
            .map(|session| SessionInfo::from(&session))
            .ok_or(AuthError::Unauthenticated)
    }

    /// Invalidate a session. Unknown or already-invalid tokens are a no-op.
    pub async fn logout(&self, token: &str) {
        if self.sessions.delete_session(token).await {
            info!("Session ended");
        }
    }

    /// Drop expired sessions from the table
    pub async fn sweep_expired(&self) -> usize {
        let removed = self.sessions.cleanup_expired().await;
        if removed > 0 {
            debug!(removed, "Expired sessions removed");
        }
        removed
    }
}
