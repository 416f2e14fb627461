//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `PLANNER_SIGNING_KEY` - Base64 (standard alphabet) credential signing key.
//!   `SIGNKEY17` is read when it is unset.
//!
//! ## Optional
//! - `PLANNER_HOST` - Bind address (default: 0.0.0.0)
//! - `PLANNER_PORT` - Listen port (default: 8080)
//! - `PLANNER_REQUEST_TIMEOUT_SECS` - Per-request timeout (default: 10)
//! - `PLANNER_ENROLLMENT_ENABLED` - Mount `POST /token` (default: false)
//! - `PLANNER_STATIC_DIR` - Directory served under `/html`
//! - `PLANNER_LOG_JSON` - Emit JSON logs when set
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Traces sample rate (default: 0.0)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::services::identity::SigningKey;

/// Primary signing key variable.
pub const SIGNING_KEY_VAR: &str = "PLANNER_SIGNING_KEY";

/// Legacy signing key variable, read when [`SIGNING_KEY_VAR`] is unset.
pub const LEGACY_SIGNING_KEY_VAR: &str = "SIGNKEY17";

/// Keys shorter than this still work but are logged as weak.
const RECOMMENDED_KEY_LENGTH: usize = 32;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Credential signing key
    pub signing_key: SigningKey,
    /// Upper bound on a single request
    pub request_timeout: Duration,
    /// Whether `POST /token` is mounted
    pub enrollment_enabled: bool,
    /// Static asset directory served under `/html`
    pub static_dir: Option<PathBuf>,
    /// JSON log output
    pub log_json: bool,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "development", "production")
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate (0.0 to 1.0)
    pub sentry_sample_rate: f32,
    /// Sentry traces sample rate (0.0 to 1.0)
    pub sentry_traces_sample_rate: f32,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the signing key is missing or unusable, or if
    /// an optional variable is set to a value that does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let signing_key = signing_key_from_env()?;
        let host = get_env_or_default("PLANNER_HOST", "0.0.0.0")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("PLANNER_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("PLANNER_PORT", "8080")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("PLANNER_PORT".to_string(), e.to_string()))?;
        let timeout_secs = get_env_or_default("PLANNER_REQUEST_TIMEOUT_SECS", "10")
            .parse::<u64>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("PLANNER_REQUEST_TIMEOUT_SECS".to_string(), e.to_string())
            })?;
        let enrollment_enabled = get_optional_env("PLANNER_ENROLLMENT_ENABLED")
            .map(|v| parse_flag("PLANNER_ENROLLMENT_ENABLED", &v))
            .transpose()?
            .unwrap_or(false);
        let static_dir = get_optional_env("PLANNER_STATIC_DIR").map(PathBuf::from);
        let log_json = get_optional_env("PLANNER_LOG_JSON").is_some();
        let sentry_dsn = get_optional_env("SENTRY_DSN");
        let sentry_environment = get_optional_env("SENTRY_ENVIRONMENT");
        let sentry_sample_rate = get_optional_env("SENTRY_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);
        let sentry_traces_sample_rate = get_optional_env("SENTRY_TRACES_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(0.0);

        Ok(Self {
            host,
            port,
            signing_key,
            request_timeout: Duration::from_secs(timeout_secs),
            enrollment_enabled,
            static_dir,
            log_json,
            sentry_dsn,
            sentry_environment,
            sentry_sample_rate,
            sentry_traces_sample_rate,
        })
    }

    /// Configuration for in-process use (tests, tools) with defaults for
    /// everything but the key.
    #[must_use]
    pub fn with_signing_key(signing_key: SigningKey) -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 0,
            signing_key,
            request_timeout: Duration::from_secs(10),
            enrollment_enabled: false,
            static_dir: None,
            log_json: false,
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
        }
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Read the signing key from `PLANNER_SIGNING_KEY`, falling back to
/// `SIGNKEY17`.
///
/// # Errors
///
/// Returns `ConfigError::MissingEnvVar` if neither variable is set,
/// `ConfigError::InvalidEnvVar` if the value is not base64, and
/// `ConfigError::InsecureSecret` if it decodes to zero bytes.
pub fn signing_key_from_env() -> Result<SigningKey, ConfigError> {
    if let Some(value) = get_optional_env(SIGNING_KEY_VAR) {
        return parse_signing_key(SIGNING_KEY_VAR, &value);
    }
    if let Some(value) = get_optional_env(LEGACY_SIGNING_KEY_VAR) {
        return parse_signing_key(LEGACY_SIGNING_KEY_VAR, &value);
    }
    Err(ConfigError::MissingEnvVar(SIGNING_KEY_VAR.to_string()))
}

// =============================================================================
// Helper functions
// =============================================================================

/// Decode and check a base64 signing key taken from `var_name`.
fn parse_signing_key(var_name: &str, value: &str) -> Result<SigningKey, ConfigError> {
    let key = SigningKey::from_base64(value)
        .map_err(|e| ConfigError::InvalidEnvVar(var_name.to_string(), e.to_string()))?;
    if key.is_empty() {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            "decodes to an empty key".to_string(),
        ));
    }
    if key.len() < RECOMMENDED_KEY_LENGTH {
        tracing::warn!(
            var = var_name,
            length = key.len(),
            "Signing key is shorter than {RECOMMENDED_KEY_LENGTH} bytes"
        );
    }
    Ok(key)
}

/// Parse a boolean flag. Accepts `1/0`, `true/false`, `yes/no`, `on/off`.
fn parse_flag(var_name: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(ConfigError::InvalidEnvVar(
            var_name.to_string(),
            format!("expected a boolean, got '{other}'"),
        )),
    }
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_signing_key_valid() {
        let key = parse_signing_key("TEST_VAR", "cGxhbm5lci10ZXN0LXNpZ25pbmcta2V5LTAxMjM0NTY3ODk=").unwrap();
        assert_eq!(key.len(), b"planner-test-signing-key-0123456789".len());
    }

    #[test]
    fn test_parse_signing_key_trims_whitespace() {
        assert!(parse_signing_key("TEST_VAR", "  c2hvcnQ=\n").is_ok());
    }

    #[test]
    fn test_parse_signing_key_not_base64() {
        let err = parse_signing_key("TEST_VAR", "not base64!").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref var, _) if var == "TEST_VAR"));
    }

    #[test]
    fn test_parse_signing_key_empty() {
        let err = parse_signing_key("TEST_VAR", "").unwrap_err();
        assert!(matches!(err, ConfigError::InsecureSecret(_, _)));
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("F", "true").unwrap());
        assert!(parse_flag("F", "1").unwrap());
        assert!(parse_flag("F", "YES").unwrap());
        assert!(!parse_flag("F", "off").unwrap());
        assert!(!parse_flag("F", "").unwrap());
        assert!(parse_flag("F", "maybe").is_err());
    }

    #[test]
    fn test_debug_redacts_signing_key() {
        let key = SigningKey::new(b"super-private-signing-material".to_vec());
        let config = ServerConfig::with_signing_key(key);
        let debug = format!("{config:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("super-private"));
    }

    #[test]
    fn test_socket_addr() {
        let mut config = ServerConfig::with_signing_key(SigningKey::new(vec![1; 32]));
        config.port = 8080;
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:8080");
    }
}
