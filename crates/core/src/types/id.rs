//! Newtype IDs for type-safe entity references.
//!
//! Use the `define_id!` macro to create type-safe ID wrappers that prevent
//! accidentally mixing IDs with day or shift indices.

/// Macro to define a type-safe ID wrapper.
///
/// Creates a newtype wrapper around `i64` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`, `Default`
/// - Conversion methods: `new()`, `as_i64()`
/// - `From<i64>` and `Into<i64>` implementations
///
/// # Example
///
/// ```rust
/// # use shift_planner_core::define_id;
/// define_id!(WorkerId);
/// define_id!(TeamId);
///
/// let worker_id = WorkerId::new(1);
/// let team_id = TeamId::new(1);
///
/// // These are different types, so this won't compile:
/// // let _: WorkerId = team_id;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            Default,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Create a new ID from an i64 value.
            #[must_use]
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            /// Get the underlying i64 value.
            #[must_use]
            pub const fn as_i64(&self) -> i64 {
                self.0
            }

            /// Whether the ID is in the issuable range (zero or higher).
            #[must_use]
            pub const fn is_valid(&self) -> bool {
                self.0 >= 0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id!(UserId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_roundtrips_through_i64() {
        let id = UserId::from(42);
        assert_eq!(i64::from(id), 42);
        assert_eq!(id.as_i64(), 42);
    }

    #[test]
    fn test_user_id_validity() {
        assert!(UserId::new(0).is_valid());
        assert!(UserId::new(7).is_valid());
        assert!(!UserId::new(-1).is_valid());
    }

    #[test]
    fn test_user_id_serializes_as_bare_number() {
        let json = serde_json::to_string(&UserId::new(12)).unwrap_or_default();
        assert_eq!(json, "12");
    }
}
