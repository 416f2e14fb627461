//! Request ID middleware for log correlation.
//!
//! An upstream `x-request-id` is trusted only when it looks like an ID: at
//! most [`MAX_REQUEST_ID_LEN`] characters of `[A-Za-z0-9._:-]`. Anything else
//! (empty, oversized, spaces, control bytes) is replaced by a fresh UUID v4
//! so a caller cannot smuggle arbitrary text into logs or Sentry tags.

use axum::{
    extract::Request,
    http::{HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};
use tracing::Span;
use uuid::Uuid;

/// The HTTP header name for request IDs.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Longest upstream request ID that is kept as-is.
pub const MAX_REQUEST_ID_LEN: usize = 128;

/// Middleware that ensures every request has a well-formed request ID.
///
/// Must run inside `TraceLayer` so `Span::current()` is the request span.
pub async fn request_id_middleware(request: Request, next: Next) -> Response {
    let request_id = resolve_request_id(request.headers());

    Span::current().record("request_id", &request_id);
    sentry::configure_scope(|scope| {
        scope.set_tag("request_id", &request_id);
    });

    let mut response = next.run(request).await;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}

/// The upstream ID when acceptable, otherwise a new UUID v4.
fn resolve_request_id(headers: &HeaderMap) -> String {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|h| h.to_str().ok())
        .filter(|id| is_acceptable(id))
        .map_or_else(|| Uuid::new_v4().to_string(), String::from)
}

fn is_acceptable(id: &str) -> bool {
    !id.is_empty()
        && id.len() <= MAX_REQUEST_ID_LEN
        && id
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.' | b':'))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn headers_with(id: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(REQUEST_ID_HEADER, HeaderValue::from_str(id).unwrap());
        headers
    }

    #[test]
    fn test_keeps_well_formed_upstream_id() {
        for id in ["upstream-123", "7f3c2a9e-0d4b-4c1e-9a77-3e2f1b6c8d10", "lb:edge_01.42"] {
            assert_eq!(resolve_request_id(&headers_with(id)), id);
        }
    }

    #[test]
    fn test_replaces_malformed_upstream_id() {
        let oversized = "a".repeat(MAX_REQUEST_ID_LEN + 1);
        for id in ["", "has space", "semi;colon", "quote\"d", oversized.as_str()] {
            let resolved = resolve_request_id(&headers_with(id));
            assert_ne!(resolved, id);
            assert!(Uuid::parse_str(&resolved).is_ok(), "{id:?} -> {resolved}");
        }
    }

    #[test]
    fn test_generates_id_when_absent() {
        let resolved = resolve_request_id(&HeaderMap::new());
        assert!(Uuid::parse_str(&resolved).is_ok());
    }

    #[test]
    fn test_max_length_id_is_kept() {
        let id = "b".repeat(MAX_REQUEST_ID_LEN);
        assert_eq!(resolve_request_id(&headers_with(&id)), id);
    }
}
