// Mergington High School - Club Roster API Core
//
// This crate provides the backend API for enrolling students into
// extracurricular activities, gated by staff session authentication.
// Architecture: axum gateway → session authenticator / roster engine → stores.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
