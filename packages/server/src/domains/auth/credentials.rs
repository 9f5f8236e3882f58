use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;

use super::models::{Role, User};
use super::password::hash_password;

/// Read access to account records
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Exact, case-sensitive lookup
    async fn find_by_username(&self, username: &str) -> Result<Option<User>>;
}

/// Postgres-backed credential store (`users` table)
pub struct PgCredentialStore {
    pool: PgPool,
}

impl PgCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CredentialStore for PgCredentialStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        User::find_by_username(username, &self.pool).await
    }
}

/// In-memory credential store
pub struct MemoryCredentialStore {
    users: HashMap<String, User>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self {
            users: HashMap::new(),
        }
    }

    /// Build a store from plaintext credentials, hashing each password.
    pub fn from_accounts<'a>(
        accounts: impl IntoIterator<Item = (&'a str, &'a str, Role)>,
    ) -> Result<Self> {
        let mut store = Self::new();
        for (username, password, role) in accounts {
            store.insert(username, &hash_password(password)?, role);
        }
        Ok(store)
    }

    /// Insert an account with an already-hashed password, replacing any
    /// account of the same name.
    pub fn insert(&mut self, username: &str, password_hash: &str, role: Role) {
        let id = self.users.len() as i64 + 1;
        self.users.insert(
            username.to_string(),
            User {
                id,
                username: username.to_string(),
                password_hash: password_hash.to_string(),
                role,
                created_at: Utc::now(),
            },
        );
    }
}

impl Default for MemoryCredentialStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        Ok(self.users.get(username).cloned())
    }
}
