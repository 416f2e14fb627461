//! Credential extractor.
//!
//! Every planner route takes [`RequireIdentity`]; a request without a valid
//! `Auth-Token` is answered with `403 Forbidden` before any handler code runs.

use axum::{extract::FromRequestParts, http::request::Parts};
use shift_planner_core::Identity;
use tracing::Span;

use crate::error::{AppError, set_sentry_user};
use crate::state::AppState;

/// Header carrying the caller's credential.
pub const CREDENTIAL_HEADER: &str = "auth-token";

/// Extractor that requires a verified credential.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(RequireIdentity(caller): RequireIdentity) -> String {
///     format!("Hello, {}!", caller.display_name)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct RequireIdentity(pub Identity);

impl FromRequestParts<AppState> for RequireIdentity {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let credential = parts
            .headers
            .get(CREDENTIAL_HEADER)
            .and_then(|value| value.to_str().ok())
            .filter(|value| !value.is_empty())
            .ok_or(AppError::Forbidden)?;

        let identity = state.resolver().resolve(credential)?;

        Span::current().record("user_id", identity.id.as_i64());
        set_sentry_user(&identity);

        Ok(Self(identity))
    }
}
