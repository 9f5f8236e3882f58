//! HTTP client for integration testing.
//!
//! Sends requests straight into the router without binding a socket.

use axum::body::Body;
use axum::http::{header, HeaderMap, Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;
use urlencoding::encode;

/// How a request presents its session token
#[derive(Clone, Copy, Debug)]
pub enum Credential<'a> {
    Cookie(&'a str),
    Bearer(&'a str),
}

/// Result of an HTTP call.
#[derive(Debug)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl ApiResponse {
    /// `kind` field of an error body
    pub fn kind(&self) -> &str {
        self.body["kind"].as_str().unwrap_or_default()
    }

    /// `detail` field of an error body
    pub fn detail(&self) -> &str {
        self.body["detail"].as_str().unwrap_or_default()
    }

    pub fn message(&self) -> &str {
        self.body["message"].as_str().unwrap_or_default()
    }

    /// The `session_id` cookie set by this response, if any
    pub fn session_cookie(&self) -> Option<String> {
        self.headers
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .find(|cookie| cookie.starts_with("session_id="))
            .map(str::to_string)
    }
}

#[derive(Clone)]
pub struct ApiClient {
    app: Router,
}

impl ApiClient {
    pub fn new(app: Router) -> Self {
        Self { app }
    }

    /// Send a request and collect status, headers and JSON body.
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        credential: Option<Credential<'_>>,
        form: Option<String>,
    ) -> ApiResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        builder = match credential {
            Some(Credential::Cookie(token)) => {
                builder.header(header::COOKIE, format!("session_id={}", token))
            }
            Some(Credential::Bearer(token)) => {
                builder.header(header::AUTHORIZATION, format!("Bearer {}", token))
            }
            None => builder,
        };
        let request = match form {
            Some(form) => builder
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(form)),
            None => builder.body(Body::empty()),
        }
        .expect("valid request");

        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("readable body");
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        ApiResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn list_activities(&self) -> ApiResponse {
        self.send(Method::GET, "/activities", None, None).await
    }

    pub async fn signup(
        &self,
        activity: &str,
        email: &str,
        credential: Option<Credential<'_>>,
    ) -> ApiResponse {
        let uri = format!(
            "/activities/{}/signup?email={}",
            encode(activity),
            encode(email)
        );
        self.send(Method::POST, &uri, credential, None).await
    }

    pub async fn unregister(
        &self,
        activity: &str,
        email: &str,
        credential: Option<Credential<'_>>,
    ) -> ApiResponse {
        let uri = format!(
            "/activities/{}/unregister?email={}",
            encode(activity),
            encode(email)
        );
        self.send(Method::DELETE, &uri, credential, None).await
    }

    pub async fn login(&self, username: &str, password: &str) -> ApiResponse {
        let form = format!("username={}&password={}", encode(username), encode(password));
        self.send(Method::POST, "/auth/login", None, Some(form)).await
    }

    /// Log in and return the session token, panicking on failure.
    pub async fn login_token(&self, username: &str, password: &str) -> String {
        let response = self.login(username, password).await;
        assert_eq!(response.status, StatusCode::OK, "login failed: {:?}", response.body);
        response.body["token"]
            .as_str()
            .expect("token in login response")
            .to_string()
    }

    pub async fn logout(&self, credential: Option<Credential<'_>>) -> ApiResponse {
        self.send(Method::POST, "/auth/logout", credential, None).await
    }

    pub async fn status(&self, credential: Option<Credential<'_>>) -> ApiResponse {
        self.send(Method::GET, "/auth/status", credential, None).await
    }

    /// Participants of one activity, as returned by `GET /activities`
    pub async fn participants(&self, activity: &str) -> Vec<String> {
        let response = self.list_activities().await;
        response.body[activity]["participants"]
            .as_array()
            .expect("activity present in listing")
            .iter()
            .filter_map(|email| email.as_str().map(str::to_string))
            .collect()
    }
}
