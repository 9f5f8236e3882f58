use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sqlx::{PgConnection, PgExecutor, PgPool};

/// Activity (club) - fixed at provisioning time
///
/// `max_participants` is the capacity; the schema keeps it non-negative.
#[derive(sqlx::FromRow, Debug, Clone, PartialEq, Eq)]
pub struct Activity {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub schedule: String,
    pub max_participants: i32,
}

impl Activity {
    /// Capacity as a count; negative values (never written by the schema) mean no seats.
    pub fn capacity(&self) -> usize {
        usize::try_from(self.max_participants).unwrap_or(0)
    }

    /// All activities in catalog order
    pub async fn find_all(pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT id, name, description, schedule, max_participants FROM clubs ORDER BY id",
        )
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    /// Insert a new activity (provisioning only)
    pub async fn create<'e>(
        name: &str,
        description: &str,
        schedule: &str,
        max_participants: i32,
        executor: impl PgExecutor<'e>,
    ) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO clubs (name, description, schedule, max_participants)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, description, schedule, max_participants
            "#,
        )
        .bind(name)
        .bind(description)
        .bind(schedule)
        .bind(max_participants)
        .fetch_one(executor)
        .await
        .map_err(Into::into)
    }
}

/// One row of a roster: who joined and when
#[derive(sqlx::FromRow, Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub email: String,
    pub joined_at: DateTime<Utc>,
}

/// Membership row joined with its student's email
#[derive(sqlx::FromRow, Debug, Clone)]
pub struct MembershipRow {
    pub club_id: i64,
    pub email: String,
    pub joined_at: DateTime<Utc>,
}

impl MembershipRow {
    /// Every membership, in join order within each activity
    pub async fn find_all(pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            r#"
            SELECT cm.club_id, s.email, cm.joined_at
            FROM club_memberships cm
            JOIN students s ON s.id = cm.student_id
            ORDER BY cm.club_id, cm.joined_at, cm.id
            "#,
        )
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    /// Upsert the student and add the membership on one connection.
    ///
    /// Returns the join time, or `None` if the student was already a member.
    /// Callers pass a transaction so both statements commit together.
    pub async fn insert(
        club_id: i64,
        email: &str,
        conn: &mut PgConnection,
    ) -> Result<Option<DateTime<Utc>>> {
        let student_id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO students (email) VALUES ($1)
            ON CONFLICT (email) DO UPDATE SET email = EXCLUDED.email
            RETURNING id
            "#,
        )
        .bind(email)
        .fetch_one(&mut *conn)
        .await
        .context("Failed to upsert student")?;

        let joined_at = sqlx::query_scalar::<_, DateTime<Utc>>(
            r#"
            INSERT INTO club_memberships (club_id, student_id)
            VALUES ($1, $2)
            ON CONFLICT (club_id, student_id) DO NOTHING
            RETURNING joined_at
            "#,
        )
        .bind(club_id)
        .bind(student_id)
        .fetch_optional(&mut *conn)
        .await
        .context("Failed to insert membership")?;

        Ok(joined_at)
    }
}
