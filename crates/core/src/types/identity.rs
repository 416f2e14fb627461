//! Resolved caller identity.

use serde::{Deserialize, Serialize};

use super::{Role, UserId};

/// A caller as established from a verified credential.
///
/// Identities are produced fresh for every request. The planner keeps a copy
/// in its roster while the user holds at least one shift, which is why the
/// serialized field names follow the roster document (`user`, `name`,
/// `level`, `userid`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Login handle (e.g. `jsmith`).
    #[serde(rename = "user")]
    pub handle: String,
    /// Friendly name (e.g. `John Smith`).
    #[serde(rename = "name")]
    pub display_name: String,
    /// Permission level.
    #[serde(rename = "level")]
    pub role: Role,
    /// Unique user id.
    #[serde(rename = "userid")]
    pub id: UserId,
}

impl Identity {
    /// Create a new identity.
    #[must_use]
    pub fn new(
        handle: impl Into<String>,
        display_name: impl Into<String>,
        role: Role,
        id: UserId,
    ) -> Self {
        Self {
            handle: handle.into(),
            display_name: display_name.into(),
            role,
            id,
        }
    }

    /// Whether the caller holds the admin role.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}
