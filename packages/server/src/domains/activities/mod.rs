//! Activities domain - club catalog and membership rosters
//!
//! Architecture:
//!   HTTP route → RosterEngine (per-activity lock) → RosterStore (Postgres or memory)

pub mod data;
pub mod engine;
pub mod errors;
pub mod models;
pub mod store;

pub use data::ActivityData;
pub use engine::RosterEngine;
pub use errors::RosterError;
pub use models::{Activity, MembershipRow, Participant};
pub use store::{ActivityRoster, MemoryRosterStore, PgRosterStore, RosterStore};
