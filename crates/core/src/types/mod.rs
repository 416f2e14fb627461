//! Core types for Shift Planner.
//!
//! This module provides type-safe wrappers for the identity model.

pub mod id;
pub mod identity;
pub mod role;

pub use id::*;
pub use identity::Identity;
pub use role::{Role, RoleError};
