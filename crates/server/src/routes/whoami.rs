//! Identity echo, for checking a credential by hand.

use axum::Json;
use shift_planner_core::Identity;

use crate::middleware::RequireIdentity;

/// Return the caller's resolved identity.
pub async fn whoami(RequireIdentity(caller): RequireIdentity) -> Json<Identity> {
    Json(caller)
}
