//! Roster engine - capacity and uniqueness rules for activity membership.
//!
//! The catalog is fixed once loaded, so the name → roster map is never
//! mutated and needs no lock of its own. Each roster sits behind its own
//! mutex: signup/unregister on one activity are serialized, while different
//! activities proceed independently.
//!
//! A write holds its roster lock across exactly one store call. The store is
//! written first and memory updated only after it succeeds, so a failed write
//! leaves no trace. When the store disagrees with memory about a membership,
//! the store wins and memory is brought back in line.

use std::sync::Arc;

use anyhow::Result;
use chrono::Utc;
use indexmap::IndexMap;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use super::data::ActivityData;
use super::errors::RosterError;
use super::models::Participant;
use super::store::{ActivityRoster, RosterStore};

pub struct RosterEngine {
    store: Arc<dyn RosterStore>,
    rosters: IndexMap<String, Arc<Mutex<ActivityRoster>>>,
}

impl RosterEngine {
    /// Load the catalog from the store
    pub async fn load(store: Arc<dyn RosterStore>) -> Result<Self> {
        let rosters = store
            .load_catalog()
            .await?
            .into_iter()
            .map(|roster| (roster.activity.name.clone(), Arc::new(Mutex::new(roster))))
            .collect::<IndexMap<_, _>>();

        info!(activities = rosters.len(), "Roster catalog loaded");

        Ok(Self { store, rosters })
    }

    /// Snapshot of every activity, in catalog order
    pub async fn list_activities(&self) -> IndexMap<String, ActivityData> {
        let mut activities = IndexMap::with_capacity(self.rosters.len());
        for (name, roster) in &self.rosters {
            let roster = roster.lock().await;
            activities.insert(name.clone(), ActivityData::from(&*roster));
        }
        activities
    }

    /// Snapshot of a single activity
    pub async fn get_activity(&self, activity_name: &str) -> Option<ActivityData> {
        let roster = self.rosters.get(activity_name)?;
        let roster = roster.lock().await;
        Some(ActivityData::from(&*roster))
    }

    /// Add a student to an activity
    pub async fn signup(&self, activity_name: &str, email: &str) -> Result<String, RosterError> {
        let roster = self
            .rosters
            .get(activity_name)
            .ok_or(RosterError::NotFound)?;
        let email = normalize_email(email)?;

        let mut roster = roster.lock().await;

        if roster.contains(email) {
            debug!(activity = %activity_name, email = %email, "Signup rejected: already registered");
            return Err(RosterError::AlreadyRegistered);
        }
        if roster.is_full() {
            debug!(activity = %activity_name, email = %email, "Signup rejected: activity full");
            return Err(RosterError::CapacityExceeded);
        }

        let persisted = self
            .store
            .add_membership(roster.activity.id, email)
            .await
            .map_err(|e| {
                error!(activity = %activity_name, email = %email, error = %e, "Failed to persist signup");
                RosterError::Storage(e)
            })?;

        let Some(participant) = persisted else {
            // Already in the store: count the seat here too
            warn!(activity = %activity_name, email = %email, "Membership already in store, resyncing roster");
            roster.participants.push(Participant {
                email: email.to_string(),
                joined_at: Utc::now(),
            });
            return Err(RosterError::AlreadyRegistered);
        };

        roster.participants.push(participant);

        info!(
            activity = %activity_name,
            email = %email,
            participants = roster.participants.len(),
            "Student signed up"
        );

        Ok(format!("Signed up {} for {}", email, activity_name))
    }

    /// Remove a student from an activity
    pub async fn unregister(&self, activity_name: &str, email: &str) -> Result<String, RosterError> {
        let roster = self
            .rosters
            .get(activity_name)
            .ok_or(RosterError::NotFound)?;
        let email = normalize_email(email)?;

        let mut roster = roster.lock().await;

        if !roster.contains(email) {
            debug!(activity = %activity_name, email = %email, "Unregister rejected: not registered");
            return Err(RosterError::NotRegistered);
        }

        let removed = self
            .store
            .remove_membership(roster.activity.id, email)
            .await
            .map_err(|e| {
                error!(activity = %activity_name, email = %email, error = %e, "Failed to persist unregister");
                RosterError::Storage(e)
            })?;

        roster.participants.retain(|p| p.email != email);

        if !removed {
            warn!(activity = %activity_name, email = %email, "Membership missing from store, resyncing roster");
            return Err(RosterError::NotRegistered);
        }

        info!(
            activity = %activity_name,
            email = %email,
            participants = roster.participants.len(),
            "Student unregistered"
        );

        Ok(format!("Unregistered {} from {}", email, activity_name))
    }

    /// Probe the backing store
    pub async fn health(&self) -> Result<()> {
        self.store.ping().await
    }
}

fn normalize_email(email: &str) -> Result<&str, RosterError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(RosterError::InvalidEmail);
    }
    Ok(email)
}
