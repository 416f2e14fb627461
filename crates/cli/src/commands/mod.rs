//! CLI command implementations.

pub mod token;
