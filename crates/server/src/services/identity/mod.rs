//! Identity service.
//!
//! Resolves `Auth-Token` credentials into typed [`Identity`] values and mints
//! new credentials for the enrollment path.
//!
//! # Credential format
//!
//! A credential is a compact JWS: `header.payload.signature`, each segment
//! base64url without padding. The header must name `HS256`; the signature is
//! HMAC-SHA256 over `header.payload` with the server's signing key. The
//! payload carries exactly the four identity claims:
//!
//! | Claim | Type | Field |
//! |-------|------|-------|
//! | `usr` | string | handle |
//! | `nam` | string | display name |
//! | `lvl` | `0` or `1` | role (worker, admin) |
//! | `uid` | integer >= 0 | user id |
//!
//! Claims decode straight into their types. A string-typed `lvl` or `uid` is
//! a malformed credential, not something to coerce.
//!
//! The registered time claims `exp`, `nbf` and `iat` (seconds since the Unix
//! epoch) are optional. When present they are enforced: a credential past its
//! `exp`, before its `nbf`, or issued in the future is rejected.

mod error;

pub use error::{AuthError, IssueError};

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use base64::Engine;
use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretSlice};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use sha2::Sha256;

use shift_planner_core::{Identity, Role, UserId};

type HmacSha256 = Hmac<Sha256>;

/// The only accepted signing algorithm.
const ALGORITHM: &str = "HS256";

/// Shared secret used to sign and verify credentials.
///
/// Cheap to clone; the key bytes live once behind an `Arc` and are zeroized
/// on drop. `Debug` never prints them.
#[derive(Clone)]
pub struct SigningKey(Arc<SecretSlice<u8>>);

impl SigningKey {
    /// Wrap raw key bytes.
    #[must_use]
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(Arc::new(SecretSlice::from(bytes)))
    }

    /// Decode a standard (padded) base64 key.
    ///
    /// # Errors
    ///
    /// Returns an error if `encoded` is not valid base64.
    pub fn from_base64(encoded: &str) -> Result<Self, base64::DecodeError> {
        STANDARD.decode(encoded.trim()).map(Self::new)
    }

    /// Key length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.expose_secret().len()
    }

    /// Whether the key has no bytes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.expose_secret().is_empty()
    }
}

impl std::fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("SigningKey").field(&"[REDACTED]").finish()
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Header {
    alg: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    typ: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    usr: String,
    nam: String,
    lvl: Role,
    uid: UserId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    exp: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    nbf: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    iat: Option<i64>,
}

impl Claims {
    /// Check the time claims against `now` (Unix seconds).
    fn check_times(&self, now: i64) -> Result<(), AuthError> {
        if self.exp.is_some_and(|exp| now > exp) {
            return Err(malformed("credential expired"));
        }
        if self.nbf.is_some_and(|nbf| now < nbf) {
            return Err(malformed("credential not yet valid"));
        }
        if self.iat.is_some_and(|iat| now < iat) {
            return Err(malformed("credential issued in the future"));
        }
        Ok(())
    }
}

/// Turns credentials into identities and back.
///
/// Resolution depends only on the credential, the key and the clock; the
/// resolver holds no other state.
#[derive(Debug, Clone)]
pub struct IdentityResolver {
    key: SigningKey,
}

impl IdentityResolver {
    /// Create a resolver bound to `key`.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingSecret` if the key is empty.
    pub fn new(key: SigningKey) -> Result<Self, AuthError> {
        if key.is_empty() {
            return Err(AuthError::MissingSecret);
        }
        Ok(Self { key })
    }

    fn mac(&self) -> Result<HmacSha256, hmac::digest::InvalidLength> {
        HmacSha256::new_from_slice(self.key.0.expose_secret())
    }

    /// Verify `credential` and decode the identity it carries.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MalformedCredential` if the credential does not
    /// have three base64url segments, names an algorithm other than `HS256`,
    /// fails signature verification, carries claims that do not decode
    /// (including a negative `uid`), or is outside its `exp`/`nbf` window.
    pub fn resolve(&self, credential: &str) -> Result<Identity, AuthError> {
        self.resolve_at(credential, unix_now())
    }

    fn resolve_at(&self, credential: &str, now: i64) -> Result<Identity, AuthError> {
        let mut segments = credential.trim().split('.');
        let (Some(header_segment), Some(payload_segment), Some(signature_segment), None) = (
            segments.next(),
            segments.next(),
            segments.next(),
            segments.next(),
        ) else {
            return Err(malformed("expected three segments"));
        };

        let header: Header = decode_segment(header_segment)?;
        if header.alg != ALGORITHM {
            return Err(malformed("unexpected signing algorithm"));
        }

        let signature = URL_SAFE_NO_PAD
            .decode(signature_segment)
            .map_err(|_| malformed("signature is not base64url"))?;
        let mut mac = self.mac().map_err(|_| AuthError::MissingSecret)?;
        mac.update(header_segment.as_bytes());
        mac.update(b".");
        mac.update(payload_segment.as_bytes());
        // Constant-time comparison
        mac.verify_slice(&signature)
            .map_err(|_| malformed("signature mismatch"))?;

        let claims: Claims = decode_segment(payload_segment)?;
        if !claims.uid.is_valid() {
            return Err(malformed("negative uid"));
        }
        claims.check_times(now)?;

        Ok(Identity::new(claims.usr, claims.nam, claims.lvl, claims.uid))
    }

    /// Mint a credential binding the four identity fields.
    ///
    /// `role` accepts a role name (`worker`, `admin`) or its level (`0`, `1`).
    ///
    /// # Errors
    ///
    /// Returns `IssueError::InvalidField` if the handle or display name is
    /// empty, `id` is negative, or `role` names no role.
    pub fn issue(
        &self,
        handle: &str,
        display_name: &str,
        role: &str,
        id: i64,
    ) -> Result<String, IssueError> {
        if handle.is_empty() {
            return Err(IssueError::invalid("handle", "must not be empty"));
        }
        if display_name.is_empty() {
            return Err(IssueError::invalid("display name", "must not be empty"));
        }
        let id = UserId::new(id);
        if !id.is_valid() {
            return Err(IssueError::invalid("id", "must be 0 or higher"));
        }
        let role: Role = role
            .parse()
            .map_err(|e: shift_planner_core::RoleError| IssueError::invalid("role", e.to_string()))?;

        let header = encode_segment(&Header {
            alg: ALGORITHM.to_string(),
            typ: Some("JWT".to_string()),
        })?;
        let payload = encode_segment(&Claims {
            usr: handle.to_owned(),
            nam: display_name.to_owned(),
            lvl: role,
            uid: id,
            exp: None,
            nbf: None,
            iat: None,
        })?;
        let signing_input = format!("{header}.{payload}");

        let mut mac = self.mac().map_err(|_| IssueError::MissingSecret)?;
        mac.update(signing_input.as_bytes());
        let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

        tracing::debug!(user_id = %id, %role, "credential issued");
        Ok(format!("{signing_input}.{signature}"))
    }
}

/// Current time in Unix seconds. A clock before the epoch reads as 0.
fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| i64::try_from(elapsed.as_secs()).unwrap_or(i64::MAX))
}

fn malformed(reason: &'static str) -> AuthError {
    tracing::debug!(reason, "credential rejected");
    AuthError::MalformedCredential
}

fn decode_segment<T: DeserializeOwned>(segment: &str) -> Result<T, AuthError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|_| malformed("segment is not base64url"))?;
    serde_json::from_slice(&bytes).map_err(|_| malformed("segment does not decode"))
}

fn encode_segment<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    Ok(URL_SAFE_NO_PAD.encode(serde_json::to_vec(value)?))
}
