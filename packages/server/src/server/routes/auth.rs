use axum::{
    extract::{Extension, Form},
    http::{header, HeaderMap},
    response::IntoResponse,
    Json,
};
use cookie::{time::Duration, Cookie, SameSite};
use serde::{Deserialize, Serialize};

use crate::domains::auth::Role;
use crate::server::app::AxumAppState;
use crate::server::error::ApiError;
use crate::server::middleware::{extract_session_token, AuthUser, SESSION_COOKIE};

#[derive(Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub username: String,
    pub role: Role,
    /// Same value as the cookie, for clients that send a bearer header instead
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

fn session_cookie(value: String) -> Cookie<'static> {
    let mut cookie = Cookie::new(SESSION_COOKIE, value);
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Lax);
    cookie
}

/// POST /auth/login (form-encoded username, password)
pub async fn login_handler(
    Extension(state): Extension<AxumAppState>,
    Form(form): Form<LoginForm>,
) -> Result<impl IntoResponse, ApiError> {
    let issued = state.auth.login(&form.username, &form.password).await?;

    let mut cookie = session_cookie(issued.token.clone());
    cookie.set_max_age(Duration::seconds(issued.ttl.as_secs() as i64));

    Ok((
        [(header::SET_COOKIE, cookie.to_string())],
        Json(LoginResponse {
            message: "Login successful".to_string(),
            username: issued.info.username,
            role: issued.info.role,
            token: issued.token,
        }),
    ))
}

/// POST /auth/logout
///
/// Always succeeds; logging out without a session is a no-op.
pub async fn logout_handler(
    Extension(state): Extension<AxumAppState>,
    headers: HeaderMap,
) -> impl IntoResponse {
    if let Some(token) = extract_session_token(&headers) {
        state.auth.logout(&token).await;
    }

    let mut cleared = session_cookie(String::new());
    cleared.make_removal();
    (
        [(header::SET_COOKIE, cleared.to_string())],
        Json(LogoutResponse {
            message: "Logout successful".to_string(),
        }),
    )
}

/// GET /auth/status
pub async fn status_handler(user: Option<Extension<AuthUser>>) -> Json<StatusResponse> {
    let response = match user {
        Some(Extension(user)) => StatusResponse {
            authenticated: true,
            username: Some(user.username),
            role: Some(user.role),
        },
        None => StatusResponse {
            authenticated: false,
            username: None,
            role: None,
        },
    };
    Json(response)
}
