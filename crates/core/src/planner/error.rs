//! Allocation error types.

use thiserror::Error;

/// Errors returned by [`WorkingPlan`](super::WorkingPlan) operations.
///
/// All variants are deterministic validation outcomes; retrying the same
/// call against the same plan yields the same error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AllocationError {
    /// Day index outside the week.
    #[error("invalid day")]
    InvalidDay,

    /// Shift index outside the day.
    #[error("invalid shift")]
    InvalidShift,

    /// User already holds the daily maximum on that day.
    #[error("max shifts per day reached")]
    DailyLimitExceeded,

    /// User already holds the weekly maximum.
    #[error("max shifts per week reached")]
    WeeklyLimitExceeded,

    /// Target slot is occupied.
    #[error("shift unavailable")]
    SlotTaken,

    /// Target slot is empty or held by another user.
    #[error("user does not own the shift")]
    NotOwner,
}
