use crate::domains::auth::{AuthError, Role, SessionAuthenticator};
use crate::server::error::ApiError;
use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tracing::debug;

/// Name of the cookie carrying the session token
pub const SESSION_COOKIE: &str = "session_id";

/// Authenticated user information from session
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub username: String,
    pub role: Role,
}

/// Middleware to extract session and populate auth user
///
/// This middleware does NOT block requests - it only extracts auth info.
/// Routes that mutate rosters add [`require_auth`] on top.
pub async fn session_auth_middleware(
    State(authenticator): State<Arc<SessionAuthenticator>>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = extract_session_token(request.headers());

    match authenticator.validate(token.as_deref()).await {
        Ok(info) => {
            debug!(username = %info.username, "Authenticated request");
            request.extensions_mut().insert(AuthUser {
                username: info.username,
                role: info.role,
            });
        }
        Err(_) => debug!("No valid session"),
    }

    next.run(request).await
}

/// Reject requests that carry no valid session
pub async fn require_auth(request: Request, next: Next) -> Result<Response, ApiError> {
    if request.extensions().get::<AuthUser>().is_none() {
        return Err(AuthError::Unauthenticated.into());
    }
    Ok(next.run(request).await)
}

/// Session token from the `session_id` cookie, falling back to a bearer token
pub fn extract_session_token(headers: &HeaderMap) -> Option<String> {
    let from_cookie = headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|cookies| cookies.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == SESSION_COOKIE && !value.is_empty())
        .map(|(_, value)| value.to_string());

    from_cookie.or_else(|| {
        let auth_str = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
        auth_str.strip_prefix("Bearer ").map(str::to_string)
    })
}
