//! Unified error handling for the server.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use shift_planner_core::{AllocationError, Identity};
use thiserror::Error;

use crate::services::identity::{AuthError, IssueError};

/// Application-level error type.
///
/// Client errors render their bare message as the response body.
#[derive(Debug, Error)]
pub enum AppError {
    /// The engine refused the operation.
    #[error(transparent)]
    Allocation(#[from] AllocationError),

    /// Credential could not be resolved.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Credential could not be issued.
    #[error(transparent)]
    Issue(#[from] IssueError),

    /// Bad request from client.
    #[error("{0}")]
    BadRequest(String),

    /// Caller may not perform this action.
    #[error("Forbidden")]
    Forbidden,

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Allocation(_)
            | Self::BadRequest(_)
            | Self::Issue(IssueError::InvalidField { .. }) => StatusCode::BAD_REQUEST,
            Self::Auth(AuthError::MalformedCredential) | Self::Forbidden => StatusCode::FORBIDDEN,
            Self::Auth(AuthError::MissingSecret)
            | Self::Issue(_)
            | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "Request rejected");
        }

        // Don't expose internal error details to clients
        let message = match &self {
            _ if status.is_server_error() => "Internal server error".to_string(),
            Self::Auth(_) | Self::Forbidden => "Forbidden".to_string(),
            _ => self.to_string(),
        };

        (status, message).into_response()
    }
}

/// Result type alias for handlers.
pub type Result<T, E = AppError> = std::result::Result<T, E>;

/// Set the Sentry user context from a resolved identity.
pub fn set_sentry_user(identity: &Identity) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(identity.id.to_string()),
            username: Some(identity.handle.clone()),
            ..Default::default()
        }));
    });
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn get_status(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::BadRequest("day must be numeric".to_string());
        assert_eq!(err.to_string(), "day must be numeric");

        let err = AppError::from(AllocationError::SlotTaken);
        assert_eq!(err.to_string(), "shift unavailable");
    }

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(
            get_status(AllocationError::WeeklyLimitExceeded.into()),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::BadRequest("test".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AuthError::MalformedCredential.into()),
            StatusCode::FORBIDDEN
        );
        assert_eq!(get_status(AppError::Forbidden), StatusCode::FORBIDDEN);
        assert_eq!(
            get_status(AuthError::MissingSecret.into()),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            get_status(AppError::Internal("test".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_issue_field_error_is_client_error() {
        let err = IssueError::InvalidField {
            field: "id",
            reason: "must be 0 or higher".to_string(),
        };
        assert_eq!(get_status(err.into()), StatusCode::BAD_REQUEST);
        assert_eq!(
            get_status(IssueError::MissingSecret.into()),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
