//! Shift Planner server library.
//!
//! HTTP surface over the allocation engine in `shift-planner-core`. Exposed
//! as a library so the CLI can share credential handling and integration
//! tests can drive the router in-process.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod state;

pub use config::ServerConfig;
pub use error::AppError;
pub use routes::app;
pub use state::AppState;
