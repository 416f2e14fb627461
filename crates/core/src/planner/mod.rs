//! Weekly shift allocation engine.
//!
//! The [`WorkingPlan`] is the whole engine state: a fixed 7x3 [`WeekGrid`]
//! and the [`Roster`] of users currently holding at least one shift.
//!
//! # Capacity rules
//!
//! - A user may hold at most [`MAX_SHIFTS_PER_USER_PER_DAY`] shift per day.
//! - A user may hold at most [`MAX_SHIFTS_PER_USER_PER_WEEK`] shifts per week.
//! - A slot holds at most one user.
//!
//! # Concurrency
//!
//! Capacity checks read several slots before writing one, so a plan shared
//! between threads must be guarded as a whole (one lock per mutation).
//! Nothing in this module locks.

mod error;
mod grid;
mod plan;
mod roster;

pub use error::AllocationError;
pub use grid::{DAYS_PER_WEEK, Day, SHIFTS_PER_DAY, Slot, SlotPosition, WeekGrid};
pub use plan::{
    MAX_SHIFTS_PER_USER_PER_DAY, MAX_SHIFTS_PER_USER_PER_WEEK, UserShiftList, WorkingPlan,
};
pub use roster::Roster;
