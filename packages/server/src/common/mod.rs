pub mod seed;

pub use seed::{default_credential_store, default_roster_store, seed_database};
