//! Application setup and router configuration.

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    middleware,
    response::Redirect,
    routing::{delete, get, post},
    Router,
};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::domains::activities::RosterEngine;
use crate::domains::auth::SessionAuthenticator;
use crate::server::middleware::{require_auth, session_auth_middleware};
use crate::server::routes::{
    health_handler, list_activities_handler, login_handler, logout_handler, signup_handler,
    status_handler, unregister_handler,
};

/// Shared application state
#[derive(Clone)]
pub struct AxumAppState {
    pub roster: Arc<RosterEngine>,
    pub auth: Arc<SessionAuthenticator>,
}

/// Build the Axum application router
pub fn build_app(state: AxumAppState, allowed_origins: &[String]) -> Router {
    // Roster mutations require a valid session
    let protected = Router::new()
        .route("/activities/:activity_name/signup", post(signup_handler))
        .route(
            "/activities/:activity_name/unregister",
            delete(unregister_handler),
        )
        .route_layer(middleware::from_fn(require_auth));

    Router::new()
        .route("/", get(|| async { Redirect::temporary("/static/index.html") }))
        .route("/activities", get(list_activities_handler))
        .route("/auth/login", post(login_handler))
        .route("/auth/logout", post(logout_handler))
        .route("/auth/status", get(status_handler))
        .route("/health", get(health_handler))
        .merge(protected)
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(middleware::from_fn_with_state(
            state.auth.clone(),
            session_auth_middleware,
        ))
        .layer(Extension(state))
        .layer(cors_layer(allowed_origins))
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE]);

    if allowed_origins.is_empty() {
        // Any origin; browsers will not send the session cookie cross-site
        return cors.allow_origin(tower_http::cors::Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    cors.allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
}
