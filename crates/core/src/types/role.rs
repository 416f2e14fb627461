//! Caller roles.

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Role`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RoleError {
    /// Numeric level outside the known range.
    #[error("level must be 0 or 1 (got {0})")]
    UnknownLevel(i64),
    /// Text that names no role.
    #[error("invalid role: {0}")]
    UnknownName(String),
}

/// Permission level of a caller.
///
/// On the wire (credential claims and JSON documents) a role is its numeric
/// level: `0` for workers and `1` for admins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum Role {
    /// May only query, take, and release their own shifts.
    #[default]
    Worker,
    /// May read the whole plan and release anyone's shift, but never takes shifts.
    Admin,
}

impl Role {
    /// Numeric level used on the wire.
    #[must_use]
    pub const fn level(self) -> i64 {
        match self {
            Self::Worker => 0,
            Self::Admin => 1,
        }
    }

    /// Whether this role is allowed to act on other users' shifts.
    #[must_use]
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl TryFrom<i64> for Role {
    type Error = RoleError;

    fn try_from(level: i64) -> Result<Self, Self::Error> {
        match level {
            0 => Ok(Self::Worker),
            1 => Ok(Self::Admin),
            other => Err(RoleError::UnknownLevel(other)),
        }
    }
}

impl From<Role> for i64 {
    fn from(role: Role) -> Self {
        role.level()
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Worker => write!(f, "worker"),
            Self::Admin => write!(f, "admin"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = RoleError;

    /// Accepts the role name or its numeric level.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "worker" | "0" => Ok(Self::Worker),
            "admin" | "1" => Ok(Self::Admin),
            other => other.parse::<i64>().map_or_else(
                |_| Err(RoleError::UnknownName(other.to_owned())),
                |level| Err(RoleError::UnknownLevel(level)),
            ),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parses_names_and_levels() {
        assert_eq!("worker".parse::<Role>().unwrap(), Role::Worker);
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!("0".parse::<Role>().unwrap(), Role::Worker);
        assert_eq!("1".parse::<Role>().unwrap(), Role::Admin);
    }

    #[test]
    fn test_role_rejects_unknown_input() {
        assert_eq!("2".parse::<Role>(), Err(RoleError::UnknownLevel(2)));
        assert_eq!(
            "boss".parse::<Role>(),
            Err(RoleError::UnknownName("boss".to_string()))
        );
    }

    #[test]
    fn test_role_serializes_as_level() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "1");
        assert_eq!(serde_json::from_str::<Role>("0").unwrap(), Role::Worker);
        assert!(serde_json::from_str::<Role>("5").is_err());
        assert!(serde_json::from_str::<Role>("\"1\"").is_err());
    }

    #[test]
    fn test_role_display_matches_from_str() {
        for role in [Role::Worker, Role::Admin] {
            assert_eq!(role.to_string().parse::<Role>().unwrap(), role);
        }
    }
}
