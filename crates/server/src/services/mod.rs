//! Server-side services.

pub mod identity;
