//! Credential commands.
//!
//! # Usage
//!
//! ```bash
//! planner-cli token issue -u ada -n "Ada Lovelace" -r admin -i 1
//! planner-cli token inspect "$TOKEN"
//! ```
//!
//! # Environment Variables
//!
//! - `PLANNER_SIGNING_KEY` - Base64 signing key (falls back to `SIGNKEY17`)

use shift_planner_core::Identity;
use shift_planner_server::config::{ConfigError, signing_key_from_env};
use shift_planner_server::services::identity::{AuthError, IdentityResolver, IssueError};
use thiserror::Error;

/// Errors that can occur during credential commands.
#[derive(Debug, Error)]
pub enum TokenError {
    /// Signing key could not be loaded.
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// Credential did not verify.
    #[error("Credential rejected: {0}")]
    Auth(#[from] AuthError),

    /// Credential could not be minted.
    #[error("Could not issue credential: {0}")]
    Issue(#[from] IssueError),

    /// Identity could not be rendered.
    #[error("Could not render identity: {0}")]
    Render(#[from] serde_json::Error),
}

fn resolver() -> Result<IdentityResolver, TokenError> {
    // Load .env file if present (ignore errors if not found)
    let _ = dotenvy::dotenv();

    let key = signing_key_from_env()?;
    Ok(IdentityResolver::new(key)?)
}

/// Mint a credential and print it to stdout.
///
/// # Errors
///
/// Returns an error if the signing key is missing or a field is invalid.
#[allow(clippy::print_stdout)] // The credential is the command's output
pub fn issue(handle: &str, name: &str, role: &str, id: i64) -> Result<(), TokenError> {
    let credential = resolver()?.issue(handle, name, role, id)?;

    tracing::info!("Issued credential for {} (id {}, role {})", handle, id, role);
    println!("{credential}");

    Ok(())
}

/// Verify a credential and print the identity it carries as JSON.
///
/// # Errors
///
/// Returns an error if the signing key is missing or the credential does not
/// verify.
#[allow(clippy::print_stdout)] // The identity is the command's output
pub fn inspect(credential: &str) -> Result<(), TokenError> {
    let identity = resolver()?.resolve(credential)?;

    println!("{}", render(&identity)?);

    Ok(())
}

fn render(identity: &Identity) -> Result<String, TokenError> {
    Ok(serde_json::to_string_pretty(identity)?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use shift_planner_core::{Role, UserId};

    #[test]
    fn test_render_uses_wire_field_names() {
        let identity = Identity::new("ada", "Ada Lovelace", Role::Admin, UserId::new(1));
        let rendered: serde_json::Value = serde_json::from_str(&render(&identity).unwrap()).unwrap();

        assert_eq!(
            rendered,
            serde_json::json!({"user": "ada", "name": "Ada Lovelace", "level": 1, "userid": 1})
        );
    }

    #[test]
    fn test_config_error_message_passes_through() {
        let err = TokenError::from(ConfigError::MissingEnvVar("PLANNER_SIGNING_KEY".to_string()));
        assert_eq!(
            err.to_string(),
            "Missing environment variable: PLANNER_SIGNING_KEY"
        );
    }
}
