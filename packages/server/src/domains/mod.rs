// Business domains
pub mod activities;
pub mod auth;
