//! Integration tests for authentication.
//!
//! Tests all critical auth paths:
//! - Login success and failure
//! - Status lookup with and without a session
//! - Logout invalidation
//! - Session expiry

mod common;

use std::time::Duration;

use axum::http::StatusCode;
use common::{Credential, TestHarness, ADMIN, SESSION_TTL, TEACHER};
use test_context::test_context;

// ============================================================================
// Login
// ============================================================================

#[test_context(TestHarness)]
#[tokio::test]
async fn test_login_sets_session_cookie(ctx: &TestHarness) {
    let response = ctx.client().login(ADMIN.0, ADMIN.1).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.message(), "Login successful");
    assert_eq!(response.body["username"], "admin");
    assert_eq!(response.body["role"], "admin");

    let token = response.body["token"].as_str().unwrap();
    let cookie = response.session_cookie().expect("session cookie");
    assert!(cookie.starts_with(&format!("session_id={};", token)));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Lax"));
    assert!(cookie.contains("Path=/"));
    assert!(cookie.contains("Max-Age=86400"));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn test_teacher_login_reports_role(ctx: &TestHarness) {
    let response = ctx.client().login(TEACHER.0, TEACHER.1).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["role"], "teacher");
}

#[test_context(TestHarness)]
#[tokio::test]
async fn test_bad_credentials_do_not_reveal_which_check_failed(ctx: &TestHarness) {
    let client = ctx.client();

    let wrong_password = client.login("admin", "wrong").await;
    let unknown_user = client.login("ghost", "school123").await;

    assert_eq!(wrong_password.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_user.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.body, unknown_user.body);
    assert_eq!(wrong_password.kind(), "unauthorized");
    assert_eq!(wrong_password.detail(), "Invalid credentials");
    assert!(wrong_password.session_cookie().is_none());
}

#[test_context(TestHarness)]
#[tokio::test]
async fn test_username_is_case_sensitive(ctx: &TestHarness) {
    let response = ctx.client().login("Admin", "school123").await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn test_each_login_gets_a_fresh_token(ctx: &TestHarness) {
    let client = ctx.client();
    let first = client.login_token(ADMIN.0, ADMIN.1).await;
    let second = client.login_token(ADMIN.0, ADMIN.1).await;
    assert_ne!(first, second);
}

// ============================================================================
// Status
// ============================================================================

#[test_context(TestHarness)]
#[tokio::test]
async fn test_status_without_session(ctx: &TestHarness) {
    let response = ctx.client().status(None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, serde_json::json!({ "authenticated": false }));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn test_status_with_session(ctx: &TestHarness) {
    let client = ctx.client();
    let token = client.login_token(ADMIN.0, ADMIN.1).await;

    for credential in [Credential::Cookie(&token), Credential::Bearer(&token)] {
        let response = client.status(Some(credential)).await;
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body["authenticated"], true);
        assert_eq!(response.body["username"], "admin");
    }
}

// ============================================================================
// Full flows
// ============================================================================

#[test_context(TestHarness)]
#[tokio::test]
async fn test_signup_needs_the_session_token(ctx: &TestHarness) {
    let client = ctx.client();
    let token = client.login_token("admin", "school123").await;

    let without = client.signup("Chess Club", "new@mergington.edu", None).await;
    assert_eq!(without.status, StatusCode::UNAUTHORIZED);

    let with = client
        .signup(
            "Chess Club",
            "new@mergington.edu",
            Some(Credential::Cookie(&token)),
        )
        .await;
    assert_eq!(with.status, StatusCode::OK);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn test_logout_invalidates_token(ctx: &TestHarness) {
    let client = ctx.client();
    let token = client.login_token(ADMIN.0, ADMIN.1).await;

    let logout = client.logout(Some(Credential::Cookie(&token))).await;
    assert_eq!(logout.status, StatusCode::OK);
    assert_eq!(logout.message(), "Logout successful");
    let cleared = logout.session_cookie().expect("cleared cookie");
    assert!(cleared.starts_with("session_id=;"));
    assert!(cleared.contains("Max-Age=0"));

    let reuse = client
        .signup(
            "Chess Club",
            "new@mergington.edu",
            Some(Credential::Cookie(&token)),
        )
        .await;
    assert_eq!(reuse.status, StatusCode::UNAUTHORIZED);

    let status = client.status(Some(Credential::Cookie(&token))).await;
    assert_eq!(status.body["authenticated"], false);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn test_logout_is_idempotent(ctx: &TestHarness) {
    let client = ctx.client();
    let token = client.login_token(ADMIN.0, ADMIN.1).await;

    assert_eq!(
        client.logout(Some(Credential::Bearer(&token))).await.status,
        StatusCode::OK
    );
    assert_eq!(
        client.logout(Some(Credential::Bearer(&token))).await.status,
        StatusCode::OK
    );
    assert_eq!(client.logout(None).await.status, StatusCode::OK);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn test_logout_only_ends_own_session(ctx: &TestHarness) {
    let client = ctx.client();
    let admin = client.login_token(ADMIN.0, ADMIN.1).await;
    let teacher = client.login_token(TEACHER.0, TEACHER.1).await;

    client.logout(Some(Credential::Cookie(&admin))).await;

    let response = client
        .signup(
            "Art Club",
            "new@mergington.edu",
            Some(Credential::Cookie(&teacher)),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test(start_paused = true)]
async fn test_expired_session_is_rejected() {
    let harness = TestHarness::new().await.unwrap();
    let client = harness.client();
    let token = client.login_token(ADMIN.0, ADMIN.1).await;

    tokio::time::advance(SESSION_TTL - Duration::from_secs(1)).await;
    let status = client.status(Some(Credential::Cookie(&token))).await;
    assert_eq!(status.body["authenticated"], true);

    tokio::time::advance(Duration::from_secs(1)).await;
    let response = client
        .signup(
            "Chess Club",
            "late@mergington.edu",
            Some(Credential::Cookie(&token)),
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.kind(), "unauthenticated");
}
