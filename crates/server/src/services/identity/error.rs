//! Identity error types.

use thiserror::Error;

/// Errors that can occur while resolving a credential.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Credential is structurally invalid, signed with another key or
    /// algorithm, or carries claims that do not decode to their fields.
    #[error("malformed credential")]
    MalformedCredential,

    /// No usable signing secret was configured. Fatal at boot.
    #[error("signing secret is not configured")]
    MissingSecret,
}

/// Errors that can occur while minting a credential.
#[derive(Debug, Error)]
pub enum IssueError {
    /// A field is outside its domain (negative id, unknown role, empty text).
    #[error("invalid {field}: {reason}")]
    InvalidField {
        /// Name of the offending field.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// Claims could not be encoded.
    #[error("credential encoding failed: {0}")]
    Encoding(#[from] serde_json::Error),

    /// Signing key rejected by the MAC.
    #[error("signing secret is not configured")]
    MissingSecret,
}

impl IssueError {
    pub(super) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field,
            reason: reason.into(),
        }
    }
}
