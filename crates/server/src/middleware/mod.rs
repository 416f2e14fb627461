//! HTTP middleware stack for the server.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, transactions)
//! 2. `TraceLayer` (request tracing)
//! 3. Request ID (add unique ID to each request)
//! 4. Timeout
//!
//! Credential checks are an extractor ([`RequireIdentity`]) rather than a
//! layer so public routes need no exemption list.

pub mod auth;
pub mod request_id;

pub use auth::{CREDENTIAL_HEADER, RequireIdentity};
pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
