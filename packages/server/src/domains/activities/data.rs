use serde::Serialize;

use super::store::ActivityRoster;

/// Public view of an activity, keyed by name in listings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivityData {
    pub description: String,
    pub schedule: String,
    pub max_participants: i32,
    /// Emails in join order
    pub participants: Vec<String>,
}

impl From<&ActivityRoster> for ActivityData {
    fn from(roster: &ActivityRoster) -> Self {
        Self {
            description: roster.activity.description.clone(),
            schedule: roster.activity.schedule.clone(),
            max_participants: roster.activity.max_participants,
            participants: roster
                .participants
                .iter()
                .map(|p| p.email.clone())
                .collect(),
        }
    }
}
