use axum::{
    extract::{Extension, Path, Query},
    Json,
};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domains::activities::ActivityData;
use crate::server::app::AxumAppState;
use crate::server::error::ApiError;
use crate::server::middleware::AuthUser;

#[derive(Debug, Deserialize)]
pub struct EmailQuery {
    /// Missing is treated like blank so the engine reports it uniformly
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// GET /activities
pub async fn list_activities_handler(
    Extension(state): Extension<AxumAppState>,
) -> Json<IndexMap<String, ActivityData>> {
    Json(state.roster.list_activities().await)
}

/// POST /activities/:activity_name/signup?email=...
pub async fn signup_handler(
    Extension(state): Extension<AxumAppState>,
    Extension(user): Extension<AuthUser>,
    Path(activity_name): Path<String>,
    Query(query): Query<EmailQuery>,
) -> Result<Json<MessageResponse>, ApiError> {
    let message = state.roster.signup(&activity_name, &query.email).await?;
    info!(by = %user.username, activity = %activity_name, "Signup accepted");
    Ok(Json(MessageResponse { message }))
}

/// DELETE /activities/:activity_name/unregister?email=...
pub async fn unregister_handler(
    Extension(state): Extension<AxumAppState>,
    Extension(user): Extension<AuthUser>,
    Path(activity_name): Path<String>,
    Query(query): Query<EmailQuery>,
) -> Result<Json<MessageResponse>, ApiError> {
    let message = state.roster.unregister(&activity_name, &query.email).await?;
    info!(by = %user.username, activity = %activity_name, "Unregister accepted");
    Ok(Json(MessageResponse { message }))
}
