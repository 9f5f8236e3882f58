use thiserror::Error;

/// Roster operation failures. Domain variants leave the roster untouched.
#[derive(Error, Debug)]
pub enum RosterError {
    #[error("Activity not found")]
    NotFound,

    #[error("Student is already signed up")]
    AlreadyRegistered,

    #[error("Activity is full")]
    CapacityExceeded,

    #[error("Student is not signed up for this activity")]
    NotRegistered,

    #[error("Email is required")]
    InvalidEmail,

    #[error("Roster store error: {0}")]
    Storage(#[from] anyhow::Error),
}
