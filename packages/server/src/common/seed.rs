//! Default catalog and staff accounts for Mergington High School.

use anyhow::{Context, Result};
use sqlx::PgPool;
use tracing::info;

use crate::domains::activities::{Activity, MembershipRow, MemoryRosterStore};
use crate::domains::auth::password::hash_password;
use crate::domains::auth::{MemoryCredentialStore, Role, User};

pub struct SeedActivity {
    pub name: &'static str,
    pub description: &'static str,
    pub schedule: &'static str,
    pub max_participants: i32,
    pub participants: &'static [&'static str],
}

pub const DEFAULT_ACTIVITIES: &[SeedActivity] = &[
    SeedActivity {
        name: "Chess Club",
        description: "Learn strategies and compete in chess tournaments",
        schedule: "Fridays, 3:30 PM - 5:00 PM",
        max_participants: 12,
        participants: &["michael@mergington.edu", "daniel@mergington.edu"],
    },
    SeedActivity {
        name: "Programming Class",
        description: "Learn programming fundamentals and build software projects",
        schedule: "Tuesdays and Thursdays, 3:30 PM - 4:30 PM",
        max_participants: 20,
        participants: &["emma@mergington.edu", "sophia@mergington.edu"],
    },
    SeedActivity {
        name: "Gym Class",
        description: "Physical education and sports activities",
        schedule: "Mondays, Wednesdays, Fridays, 2:00 PM - 3:00 PM",
        max_participants: 30,
        participants: &["john@mergington.edu", "olivia@mergington.edu"],
    },
    SeedActivity {
        name: "Soccer Team",
        description: "Join the school soccer team and compete in matches",
        schedule: "Tuesdays and Thursdays, 4:00 PM - 5:30 PM",
        max_participants: 22,
        participants: &["liam@mergington.edu", "noah@mergington.edu"],
    },
    SeedActivity {
        name: "Basketball Team",
        description: "Practice and play basketball with the school team",
        schedule: "Wednesdays and Fridays, 3:30 PM - 5:00 PM",
        max_participants: 15,
        participants: &["ava@mergington.edu", "mia@mergington.edu"],
    },
    SeedActivity {
        name: "Art Club",
        description: "Explore your creativity through painting and drawing",
        schedule: "Thursdays, 3:30 PM - 5:00 PM",
        max_participants: 15,
        participants: &["amelia@mergington.edu", "harper@mergington.edu"],
    },
    SeedActivity {
        name: "Drama Club",
        description: "Act, direct, and produce plays and performances",
        schedule: "Mondays and Wednesdays, 4:00 PM - 5:30 PM",
        max_participants: 20,
        participants: &["ella@mergington.edu", "scarlett@mergington.edu"],
    },
    SeedActivity {
        name: "Math Club",
        description: "Solve challenging problems and participate in math competitions",
        schedule: "Tuesdays, 3:30 PM - 4:30 PM",
        max_participants: 10,
        participants: &["james@mergington.edu", "benjamin@mergington.edu"],
    },
    SeedActivity {
        name: "Debate Team",
        description: "Develop public speaking and argumentation skills",
        schedule: "Fridays, 4:00 PM - 5:30 PM",
        max_participants: 12,
        participants: &["charlotte@mergington.edu", "henry@mergington.edu"],
    },
];

/// (username, password, role)
pub const DEFAULT_ACCOUNTS: &[(&str, &str, Role)] = &[
    ("admin", "school123", Role::Admin),
    ("principal", "mergington2026", Role::Admin),
    ("teacher1", "teacher123", Role::Teacher),
];

/// In-memory roster store holding the default catalog
pub fn default_roster_store() -> MemoryRosterStore {
    DEFAULT_ACTIVITIES
        .iter()
        .fold(MemoryRosterStore::new(), |store, seed| {
            store.with_activity(
                seed.name,
                seed.description,
                seed.schedule,
                seed.max_participants,
                seed.participants,
            )
        })
}

/// In-memory credential store holding the default accounts
pub fn default_credential_store() -> Result<MemoryCredentialStore> {
    MemoryCredentialStore::from_accounts(DEFAULT_ACCOUNTS.iter().copied())
}

/// Seed an empty database with the default accounts and catalog.
///
/// Everything is written in one transaction, so a failure leaves the database
/// as it was. Returns `false` without writing anything when accounts already
/// exist.
pub async fn seed_database(pool: &PgPool) -> Result<bool> {
    let mut tx = pool.begin().await?;

    if User::count(&mut *tx).await? > 0 {
        info!("Database already seeded");
        return Ok(false);
    }

    for (username, password, role) in DEFAULT_ACCOUNTS {
        User::create(username, &hash_password(password)?, *role, &mut *tx)
            .await
            .with_context(|| format!("Failed to create account {}", username))?;
    }

    for seed in DEFAULT_ACTIVITIES {
        let activity = Activity::create(
            seed.name,
            seed.description,
            seed.schedule,
            seed.max_participants,
            &mut *tx,
        )
        .await
        .with_context(|| format!("Failed to create activity {}", seed.name))?;

        for email in seed.participants {
            MembershipRow::insert(activity.id, email, &mut *tx).await?;
        }
    }

    tx.commit().await.context("Failed to commit seed data")?;

    info!(
        accounts = DEFAULT_ACCOUNTS.len(),
        activities = DEFAULT_ACTIVITIES.len(),
        "Initial data seeded"
    );
    Ok(true)
}
