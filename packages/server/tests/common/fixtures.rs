//! Test fixtures for building small catalogs.

use clubs_core::domains::activities::MemoryRosterStore;

pub const ADMIN: (&str, &str) = ("admin", "school123");
pub const TEACHER: (&str, &str) = ("teacher1", "teacher123");

/// A single empty "Chess Club" with the given capacity
pub fn chess_club(capacity: i32) -> MemoryRosterStore {
    MemoryRosterStore::new().with_activity(
        "Chess Club",
        "Learn strategies and compete in chess tournaments",
        "Fridays, 3:30 PM - 5:00 PM",
        capacity,
        &[],
    )
}

/// Two activities, one nearly full, for checks that span activities
pub fn two_clubs() -> MemoryRosterStore {
    MemoryRosterStore::new()
        .with_activity(
            "Math Club",
            "Solve challenging problems and participate in math competitions",
            "Tuesdays, 3:30 PM - 4:30 PM",
            3,
            &["james@mergington.edu", "benjamin@mergington.edu"],
        )
        .with_activity(
            "Art Club",
            "Explore your creativity through painting and drawing",
            "Thursdays, 3:30 PM - 5:00 PM",
            15,
            &["amelia@mergington.edu"],
        )
}
