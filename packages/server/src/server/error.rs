//! Translation of domain errors into HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::domains::activities::RosterError;
use crate::domains::auth::AuthError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Roster(#[from] RosterError),

    #[error(transparent)]
    Auth(#[from] AuthError),
}

/// JSON error body: a machine-checkable kind plus human-readable detail
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub kind: &'static str,
    pub detail: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Auth(AuthError::Unauthorized | AuthError::Unauthenticated) => {
                StatusCode::UNAUTHORIZED
            }
            ApiError::Roster(RosterError::NotFound) => StatusCode::NOT_FOUND,
            ApiError::Roster(
                RosterError::AlreadyRegistered
                | RosterError::CapacityExceeded
                | RosterError::NotRegistered
                | RosterError::InvalidEmail,
            ) => StatusCode::BAD_REQUEST,
            ApiError::Roster(RosterError::Storage(_)) | ApiError::Auth(AuthError::Storage(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::Auth(AuthError::Unauthorized) => "unauthorized",
            ApiError::Auth(AuthError::Unauthenticated) => "unauthenticated",
            ApiError::Roster(RosterError::NotFound) => "not_found",
            ApiError::Roster(RosterError::AlreadyRegistered) => "already_registered",
            ApiError::Roster(RosterError::CapacityExceeded) => "capacity_exceeded",
            ApiError::Roster(RosterError::NotRegistered) => "not_registered",
            ApiError::Roster(RosterError::InvalidEmail) => "invalid_email",
            ApiError::Roster(RosterError::Storage(_)) | ApiError::Auth(AuthError::Storage(_)) => {
                "internal"
            }
        }
    }

    fn detail(&self) -> String {
        match self {
            // Storage causes are logged, never returned to the client
            ApiError::Roster(RosterError::Storage(_)) | ApiError::Auth(AuthError::Storage(_)) => {
                "Internal server error".to_string()
            }
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        let body = ErrorBody {
            kind: self.kind(),
            detail: self.detail(),
        };
        (status, Json(body)).into_response()
    }
}
