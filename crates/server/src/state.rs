//! Application state shared across handlers.

use std::sync::{Arc, Mutex, MutexGuard};

use shift_planner_core::WorkingPlan;

use crate::config::ServerConfig;
use crate::error::AppError;
use crate::services::identity::{AuthError, IdentityResolver};

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. The plan sits behind one coarse lock; each
/// handler takes it once for its whole read-modify-write.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    resolver: IdentityResolver,
    plan: Mutex<WorkingPlan>,
}

impl AppState {
    /// Create a new application state with an empty plan.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingSecret` if the configured key is empty.
    pub fn new(config: ServerConfig) -> Result<Self, AuthError> {
        let resolver = IdentityResolver::new(config.signing_key.clone())?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                resolver,
                plan: Mutex::new(WorkingPlan::new()),
            }),
        })
    }

    /// Get a reference to the server configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    /// Get a reference to the identity resolver.
    #[must_use]
    pub fn resolver(&self) -> &IdentityResolver {
        &self.inner.resolver
    }

    /// Lock the working plan.
    ///
    /// Do not hold the guard across an `.await`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Internal` if a previous holder panicked.
    pub fn plan(&self) -> Result<MutexGuard<'_, WorkingPlan>, AppError> {
        self.inner
            .plan
            .lock()
            .map_err(|_| AppError::Internal("working plan lock poisoned".to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::services::identity::SigningKey;

    #[test]
    fn test_empty_key_is_rejected() {
        let config = ServerConfig::with_signing_key(SigningKey::new(Vec::new()));
        assert!(matches!(AppState::new(config), Err(AuthError::MissingSecret)));
    }

    #[test]
    fn test_clones_share_the_plan() {
        let config = ServerConfig::with_signing_key(SigningKey::new(vec![7; 32]));
        let state = AppState::new(config).unwrap();
        let other = state.clone();

        let ada = shift_planner_core::Identity::new(
            "ada",
            "Ada",
            shift_planner_core::Role::Worker,
            shift_planner_core::UserId::new(1),
        );
        state.plan().unwrap().allocate(&ada, 0, 0).unwrap();

        assert!(other.plan().unwrap().has_user(ada.id));
    }
}
