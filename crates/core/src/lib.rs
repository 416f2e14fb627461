//! Shift Planner Core - allocation engine and shared types.
//!
//! This crate provides the pieces every Shift Planner component agrees on:
//! - `server` - HTTP service that resolves credentials and drives the engine
//! - `cli` - Operator tools for minting and inspecting credentials
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no locking,
//! no credential handling. The engine trusts the user id it is given;
//! deciding who may act on which id is the caller's job.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, roles, and the resolved caller identity
//! - [`planner`] - The weekly grid, roster, and capacity-checked operations

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod planner;
pub mod types;

pub use planner::{AllocationError, UserShiftList, WorkingPlan};
pub use types::*;
