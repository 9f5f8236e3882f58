//! Persistence behind the roster engine.
//!
//! The engine serializes writes per activity before calling into a store, so
//! implementations only need each call to be atomic on its own.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;

use super::models::{Activity, MembershipRow, Participant};

/// An activity with its participants in join order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityRoster {
    pub activity: Activity,
    pub participants: Vec<Participant>,
}

impl ActivityRoster {
    pub fn contains(&self, email: &str) -> bool {
        self.participants.iter().any(|p| p.email == email)
    }

    pub fn is_full(&self) -> bool {
        self.participants.len() >= self.activity.capacity()
    }
}

#[async_trait]
pub trait RosterStore: Send + Sync {
    /// Every activity with its current participants
    async fn load_catalog(&self) -> Result<Vec<ActivityRoster>>;

    /// Record a membership, creating the student if absent.
    ///
    /// Returns `None` when the membership already exists.
    async fn add_membership(&self, activity_id: i64, email: &str) -> Result<Option<Participant>>;

    /// Remove a membership. Returns `false` when there was none.
    async fn remove_membership(&self, activity_id: i64, email: &str) -> Result<bool>;

    /// Cheap liveness probe
    async fn ping(&self) -> Result<()>;
}

// =============================================================================
// Postgres
// =============================================================================

pub struct PgRosterStore {
    pool: PgPool,
}

impl PgRosterStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RosterStore for PgRosterStore {
    async fn load_catalog(&self) -> Result<Vec<ActivityRoster>> {
        let activities = Activity::find_all(&self.pool).await?;
        let mut by_club: HashMap<i64, Vec<Participant>> = HashMap::new();
        for row in MembershipRow::find_all(&self.pool).await? {
            by_club.entry(row.club_id).or_default().push(Participant {
                email: row.email,
                joined_at: row.joined_at,
            });
        }

        Ok(activities
            .into_iter()
            .map(|activity| ActivityRoster {
                participants: by_club.remove(&activity.id).unwrap_or_default(),
                activity,
            })
            .collect())
    }

    async fn add_membership(&self, activity_id: i64, email: &str) -> Result<Option<Participant>> {
        let mut tx = self.pool.begin().await?;
        let joined_at = MembershipRow::insert(activity_id, email, &mut *tx).await?;
        tx.commit().await?;

        Ok(joined_at.map(|joined_at| Participant {
            email: email.to_string(),
            joined_at,
        }))
    }

    async fn remove_membership(&self, activity_id: i64, email: &str) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM club_memberships cm
            USING students s
            WHERE cm.student_id = s.id
              AND cm.club_id = $1
              AND s.email = $2
            "#,
        )
        .bind(activity_id)
        .bind(email)
        .execute(&self.pool)
        .await
        .context("Failed to delete membership")?;

        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

// =============================================================================
// In-memory
// =============================================================================

#[derive(Default)]
struct MemoryState {
    activities: Vec<Activity>,
    memberships: HashMap<i64, Vec<Participant>>,
    students: HashSet<String>,
}

/// In-memory roster store, used when no database is configured and in tests
#[derive(Default)]
pub struct MemoryRosterStore {
    state: Mutex<MemoryState>,
}

impl MemoryRosterStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an activity with initial participants. Ids are assigned in insertion order.
    pub fn with_activity(
        self,
        name: &str,
        description: &str,
        schedule: &str,
        max_participants: i32,
        participants: &[&str],
    ) -> Self {
        {
            let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
            let id = state.activities.len() as i64 + 1;
            state.activities.push(Activity {
                id,
                name: name.to_string(),
                description: description.to_string(),
                schedule: schedule.to_string(),
                max_participants,
            });
            let now = Utc::now();
            let roster = participants
                .iter()
                .map(|email| Participant {
                    email: email.to_string(),
                    joined_at: now,
                })
                .collect();
            state.memberships.insert(id, roster);
            state
                .students
                .extend(participants.iter().map(|email| email.to_string()));
        }
        self
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, MemoryState>> {
        self.state
            .lock()
            .map_err(|_| anyhow!("memory roster store poisoned"))
    }
}

#[async_trait]
impl RosterStore for MemoryRosterStore {
    async fn load_catalog(&self) -> Result<Vec<ActivityRoster>> {
        let state = self.lock()?;
        Ok(state
            .activities
            .iter()
            .map(|activity| ActivityRoster {
                activity: activity.clone(),
                participants: state
                    .memberships
                    .get(&activity.id)
                    .cloned()
                    .unwrap_or_default(),
            })
            .collect())
    }

    async fn add_membership(&self, activity_id: i64, email: &str) -> Result<Option<Participant>> {
        let mut state = self.lock()?;
        if !state.activities.iter().any(|a| a.id == activity_id) {
            return Err(anyhow!("unknown activity id {}", activity_id));
        }
        state.students.insert(email.to_string());

        let roster = state.memberships.entry(activity_id).or_default();
        if roster.iter().any(|p| p.email == email) {
            return Ok(None);
        }
        let participant = Participant {
            email: email.to_string(),
            joined_at: Utc::now(),
        };
        roster.push(participant.clone());
        Ok(Some(participant))
    }

    async fn remove_membership(&self, activity_id: i64, email: &str) -> Result<bool> {
        let mut state = self.lock()?;
        let Some(roster) = state.memberships.get_mut(&activity_id) else {
            return Ok(false);
        };
        let before = roster.len();
        roster.retain(|p| p.email != email);
        Ok(roster.len() < before)
    }

    async fn ping(&self) -> Result<()> {
        self.lock().map(|_| ())
    }
}
