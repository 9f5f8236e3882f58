pub mod activity;

pub use activity::{Activity, MembershipRow, Participant};
