use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tokio::time::Instant;
use uuid::Uuid;

use super::models::Role;

/// Session token (random UUID)
pub type SessionToken = String;

/// Session data stored after a successful login
#[derive(Clone, Debug)]
pub struct Session {
    pub username: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    /// Monotonic deadline; wall-clock jumps never extend or cut a session.
    pub expires_at: Instant,
}

impl Session {
    pub fn new(username: String, role: Role, ttl: Duration) -> Self {
        Self {
            username,
            role,
            created_at: Utc::now(),
            expires_at: Instant::now() + ttl,
        }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// In-memory session store
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<SessionToken, Session>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Create a new session and return the token
    pub async fn create_session(&self, session: Session) -> SessionToken {
        let token = Uuid::new_v4().to_string();
        let mut sessions = self.sessions.write().await;
        sessions.insert(token.clone(), session);
        token
    }

    /// Get session by token. Expired sessions are reported as missing.
    pub async fn get_session(&self, token: &str) -> Option<Session> {
        let sessions = self.sessions.read().await;
        let session = sessions.get(token)?;

        if session.is_expired(Instant::now()) {
            return None;
        }

        Some(session.clone())
    }

    /// Delete session (logout). Unknown tokens are ignored.
    pub async fn delete_session(&self, token: &str) -> bool {
        let mut sessions = self.sessions.write().await;
        sessions.remove(token).is_some()
    }

    /// Clean up expired sessions (run periodically). Returns how many were removed.
    pub async fn cleanup_expired(&self) -> usize {
        let mut sessions = self.sessions.write().await;
        let now = Instant::now();
        let before = sessions.len();

        sessions.retain(|_, session| !session.is_expired(now));

        before - sessions.len()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
