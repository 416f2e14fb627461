//! Integration tests for credential gating, enrollment and the public routes.

#![allow(clippy::unwrap_used)]

use axum::http::{Method, StatusCode};
use serde_json::json;
use shift_planner_integration_tests::{TestApp, request, static_fixture_dir};
use shift_planner_server::services::identity::{IdentityResolver, SigningKey};

// ============================================================================
// Credential Gating Tests
// ============================================================================

#[tokio::test]
async fn test_missing_credential_is_forbidden() {
    let app = TestApp::new();

    for resp in [
        app.get("/", None).await,
        app.post_form("/", None, "day=0&shift=0").await,
        app.delete("/?day=0&shift=0", None).await,
        app.get("/whoami", None).await,
    ] {
        assert_eq!(resp.status, StatusCode::FORBIDDEN);
        assert_eq!(resp.body, "Forbidden");
    }
}

#[tokio::test]
async fn test_garbage_credential_is_forbidden() {
    let app = TestApp::new();

    for credential in ["", "abc", "a.b.c", "e30.e30.e30"] {
        let resp = app.get("/", Some(credential)).await;
        assert_eq!(resp.status, StatusCode::FORBIDDEN, "credential {credential:?}");
        assert_eq!(resp.body, "Forbidden");
    }
}

#[tokio::test]
async fn test_credential_from_another_key_is_forbidden() {
    let app = TestApp::new();
    let other = IdentityResolver::new(SigningKey::new(b"some-other-signing-key".to_vec())).unwrap();
    let credential = other.issue("mallory", "Mallory", "admin", 1).unwrap();

    let resp = app.get("/", Some(&credential)).await;
    assert_eq!(resp.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_rejected_credential_leaves_plan_untouched() {
    let app = TestApp::new();

    let resp = app.post_form("/", Some("not-a-credential"), "day=0&shift=0").await;
    assert_eq!(resp.status, StatusCode::FORBIDDEN);

    let plan = app.get("/", Some(&app.admin(1))).await.json();
    assert_eq!(plan["users"], json!([]));
    assert_eq!(plan["days"][0]["shifts"][0], json!({"used": false, "userid": 0}));
}

// ============================================================================
// Whoami Tests
// ============================================================================

#[tokio::test]
async fn test_whoami_returns_identity() {
    let app = TestApp::new();
    let credential = app.credential("ada", "Ada Lovelace", "admin", 42);

    let resp = app.get("/whoami", Some(&credential)).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(
        resp.json(),
        json!({"user": "ada", "name": "Ada Lovelace", "level": 1, "userid": 42})
    );
}

// ============================================================================
// Enrollment Tests
// ============================================================================

#[tokio::test]
async fn test_enrollment_disabled_by_default() {
    let app = TestApp::new();

    let resp = app
        .post_form("/token", None, "usr=a&nam=A&lvl=1&uid=1")
        .await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_enrolled_credential_is_accepted() {
    let app = TestApp::with_config(|config| config.enrollment_enabled = true);

    let resp = app
        .post_form("/token", None, "usr=jsmith&nam=John+Smith&lvl=0&uid=7")
        .await;
    assert_eq!(resp.status, StatusCode::OK);
    let credential = resp.body;
    assert_eq!(credential.split('.').count(), 3);

    let resp = app.get("/whoami", Some(&credential)).await;
    assert_eq!(
        resp.json(),
        json!({"user": "jsmith", "name": "John Smith", "level": 0, "userid": 7})
    );

    let resp = app.post_form("/", Some(&credential), "day=0&shift=0").await;
    assert_eq!(resp.status, StatusCode::OK);
}

#[tokio::test]
async fn test_enrollment_parameter_errors() {
    let app = TestApp::with_config(|config| config.enrollment_enabled = true);

    let cases = [
        ("", "not enough parameters"),
        ("usr=a&nam=A&lvl=1", "not enough parameters"),
        ("usr=&nam=A&lvl=1&uid=1", "not enough parameters"),
        ("usr=a&nam=A&lvl=1&uid=one", "uid must be an integer"),
        ("usr=a&nam=A&lvl=1&uid=-1", "uid must be 0 or higher"),
        ("usr=a&nam=A&lvl=admin&uid=1", "lvl must be an integer"),
        ("usr=a&nam=A&lvl=2&uid=1", "level must be 0 or 1"),
    ];

    for (form, expected) in cases {
        let resp = app.post_form("/token", None, form).await;
        assert_eq!(resp.status, StatusCode::BAD_REQUEST, "form {form:?}");
        assert_eq!(resp.body, expected, "form {form:?}");
    }
}

// ============================================================================
// Public Route Tests
// ============================================================================

#[tokio::test]
async fn test_health_needs_no_credential() {
    let app = TestApp::new();

    let resp = app.get("/health", None).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body, "ok");
}

#[tokio::test]
async fn test_static_files_served_when_configured() {
    let app = TestApp::with_config(|config| config.static_dir = Some(static_fixture_dir()));

    let resp = app.get("/html/index.html", None).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("Shift Planner"));

    let unconfigured = TestApp::new();
    let resp = unconfigured.get("/html/index.html", None).await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
}

// ============================================================================
// Request ID Tests
// ============================================================================

#[tokio::test]
async fn test_request_id_generated() {
    let app = TestApp::new();

    let resp = app.get("/health", None).await;
    let id = resp.headers.get("x-request-id").unwrap().to_str().unwrap();
    assert_eq!(id.len(), 36);
}

#[tokio::test]
async fn test_request_id_propagated() {
    let app = TestApp::new();
    let mut req = request(Method::GET, "/health", None, None);
    req.headers_mut()
        .insert("x-request-id", "upstream-123".parse().unwrap());

    let resp = app.send(req).await;
    assert_eq!(
        resp.headers.get("x-request-id").unwrap(),
        "upstream-123"
    );
}

#[tokio::test]
async fn test_malformed_request_id_replaced() {
    let app = TestApp::new();
    let mut req = request(Method::GET, "/health", None, None);
    req.headers_mut()
        .insert("x-request-id", "not an id; drop table".parse().unwrap());

    let resp = app.send(req).await;
    let id = resp.headers.get("x-request-id").unwrap().to_str().unwrap();
    assert_ne!(id, "not an id; drop table");
    assert_eq!(id.len(), 36);
}
