// HTTP routes
pub mod activities;
pub mod auth;
pub mod health;

pub use activities::*;
pub use auth::*;
pub use health::*;
