//! Integration tests for Shift Planner.
//!
//! Tests drive the full axum router in-process (middleware included) through
//! `tower::ServiceExt::oneshot`, so no server or network is needed.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p shift-planner-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `shifts_api` - Allocation, listing and deletion by role
//! - `credentials_api` - Credential gating, enrollment and `/whoami`

use std::path::PathBuf;

use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Method, Request, StatusCode, header},
};
use serde_json::Value;
use shift_planner_server::{
    AppState, ServerConfig, app,
    middleware::CREDENTIAL_HEADER,
    services::identity::{IdentityResolver, SigningKey},
};
use tower::ServiceExt;

/// Signing key shared by every test app.
pub const TEST_SIGNING_KEY: &[u8] = b"integration-test-signing-key-0123456789";

/// An in-process application plus a resolver holding the same key.
#[derive(Clone)]
pub struct TestApp {
    router: Router,
    resolver: IdentityResolver,
}

impl TestApp {
    /// App with default configuration (enrollment off, no static dir).
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(|_| {})
    }

    /// App with configuration adjusted by `configure`.
    ///
    /// # Panics
    ///
    /// Panics if the state cannot be built.
    #[must_use]
    pub fn with_config(configure: impl FnOnce(&mut ServerConfig)) -> Self {
        let mut config = ServerConfig::with_signing_key(SigningKey::new(TEST_SIGNING_KEY.to_vec()));
        configure(&mut config);

        let resolver =
            IdentityResolver::new(config.signing_key.clone()).expect("test key is not empty");
        let state = AppState::new(config).expect("Failed to create application state");

        Self {
            router: app(state),
            resolver,
        }
    }

    /// Mint a credential signed with the app's key.
    ///
    /// # Panics
    ///
    /// Panics if any field is invalid.
    #[must_use]
    pub fn credential(&self, handle: &str, name: &str, role: &str, id: i64) -> String {
        self.resolver
            .issue(handle, name, role, id)
            .expect("Failed to issue test credential")
    }

    /// Worker credential with a generated handle and name.
    #[must_use]
    pub fn worker(&self, id: i64) -> String {
        self.credential(&format!("worker{id}"), &format!("Worker {id}"), "worker", id)
    }

    /// Admin credential with a generated handle and name.
    #[must_use]
    pub fn admin(&self, id: i64) -> String {
        self.credential(&format!("admin{id}"), &format!("Admin {id}"), "admin", id)
    }

    /// Send a request through the full middleware stack.
    ///
    /// # Panics
    ///
    /// Panics if the router fails or the body is not UTF-8.
    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read response body");
        let body = String::from_utf8(bytes.to_vec()).expect("response body is not UTF-8");

        TestResponse {
            status,
            headers,
            body,
        }
    }

    /// `GET uri`, optionally with a credential.
    pub async fn get(&self, uri: &str, credential: Option<&str>) -> TestResponse {
        self.send(request(Method::GET, uri, credential, None)).await
    }

    /// `POST uri` with a urlencoded form body.
    pub async fn post_form(&self, uri: &str, credential: Option<&str>, form: &str) -> TestResponse {
        self.send(request(Method::POST, uri, credential, Some(form)))
            .await
    }

    /// `DELETE uri`, optionally with a credential.
    pub async fn delete(&self, uri: &str, credential: Option<&str>) -> TestResponse {
        self.send(request(Method::DELETE, uri, credential, None))
            .await
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

/// A fully buffered response.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    /// Parse the body as JSON.
    ///
    /// # Panics
    ///
    /// Panics if the body is not JSON.
    #[must_use]
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body)
            .unwrap_or_else(|e| panic!("body is not JSON ({e}): {}", self.body))
    }
}

/// Build a request with an optional credential and form body.
///
/// # Panics
///
/// Panics if `uri` is invalid.
#[must_use]
pub fn request(
    method: Method,
    uri: &str,
    credential: Option<&str>,
    form: Option<&str>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(credential) = credential {
        builder = builder.header(CREDENTIAL_HEADER, credential);
    }
    let body = match form {
        Some(form) => {
            builder = builder.header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
            Body::from(form.to_owned())
        }
        None => Body::empty(),
    };
    builder.body(body).expect("Failed to build request")
}

/// Directory of static fixtures served under `/html` in tests.
#[must_use]
pub fn static_fixture_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures/html")
}
