//! The working plan: grid plus roster, and the operations on them.

use serde::Serialize;

use super::grid::{self, Slot, SlotPosition, WeekGrid};
use super::{AllocationError, Roster};
use crate::{Identity, UserId};

/// Maximum shifts a user may hold on a single day.
pub const MAX_SHIFTS_PER_USER_PER_DAY: usize = 1;

/// Maximum shifts a user may hold across the week.
pub const MAX_SHIFTS_PER_USER_PER_WEEK: usize = 5;

/// Shifts held by one user, in grid order.
///
/// Serializes as `{"userid": N, "shifts": [{"day": D, "shift": S}, ...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserShiftList {
    #[serde(rename = "userid")]
    pub user_id: UserId,
    pub shifts: Vec<SlotPosition>,
}

/// Entire allocation state: who holds which slot, and who holds any.
///
/// Created empty; lives as long as the process. Serializes as
/// `{"users": [...], "days": [...]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WorkingPlan {
    users: Roster,
    days: WeekGrid,
}

impl WorkingPlan {
    /// Create an empty plan.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Users holding at least one shift.
    #[must_use]
    pub const fn roster(&self) -> &Roster {
        &self.users
    }

    /// The grid.
    #[must_use]
    pub const fn grid(&self) -> &WeekGrid {
        &self.days
    }

    /// The slot at `(day, shift)`.
    ///
    /// # Errors
    ///
    /// [`InvalidDay`](AllocationError::InvalidDay) or
    /// [`InvalidShift`](AllocationError::InvalidShift) for out-of-range indices.
    pub fn slot(&self, day: i64, shift: i64) -> Result<&Slot, AllocationError> {
        let position = SlotPosition::new(day, shift)?;
        self.days
            .slot(position)
            .ok_or(AllocationError::InvalidShift)
    }

    /// Whether `id` is on the roster.
    #[must_use]
    pub fn has_user(&self, id: UserId) -> bool {
        self.users.contains(id)
    }

    /// Number of occupied slots held by `id` across the week.
    #[must_use]
    pub fn user_shift_count(&self, id: UserId) -> usize {
        self.days.positions_held_by(id).count()
    }

    /// Number of occupied slots held by `id` on `day`.
    ///
    /// # Errors
    ///
    /// Returns [`AllocationError::InvalidDay`] if `day` is not in `0..7`.
    pub fn shift_count_for_day(&self, id: UserId, day: i64) -> Result<usize, AllocationError> {
        let index = grid::day_index(day)?;
        self.days
            .day(index)
            .map(|d| d.count_held_by(id))
            .ok_or(AllocationError::InvalidDay)
    }

    /// Shifts held by `id`, day ascending then shift ascending.
    #[must_use]
    pub fn user_shifts(&self, id: UserId) -> UserShiftList {
        UserShiftList {
            user_id: id,
            shifts: self.days.positions_held_by(id).collect(),
        }
    }

    /// Give the slot at `(day, shift)` to `id`.
    ///
    /// Only the grid changes; pair with [`insert_user`](Self::insert_user),
    /// or use [`allocate`](Self::allocate) which does both.
    ///
    /// # Errors
    ///
    /// Checked in this order, first failure wins:
    /// [`InvalidDay`](AllocationError::InvalidDay),
    /// [`InvalidShift`](AllocationError::InvalidShift),
    /// [`DailyLimitExceeded`](AllocationError::DailyLimitExceeded),
    /// [`WeeklyLimitExceeded`](AllocationError::WeeklyLimitExceeded),
    /// [`SlotTaken`](AllocationError::SlotTaken).
    pub fn insert_shift(&mut self, id: UserId, day: i64, shift: i64) -> Result<(), AllocationError> {
        let position = SlotPosition::new(day, shift)?;

        let held_today = self
            .days
            .day(position.day())
            .map_or(0, |d| d.count_held_by(id));
        if held_today >= MAX_SHIFTS_PER_USER_PER_DAY {
            return Err(AllocationError::DailyLimitExceeded);
        }
        if self.user_shift_count(id) >= MAX_SHIFTS_PER_USER_PER_WEEK {
            return Err(AllocationError::WeeklyLimitExceeded);
        }

        let slot = self
            .days
            .slot_mut(position)
            .ok_or(AllocationError::InvalidShift)?;
        if slot.is_occupied() {
            return Err(AllocationError::SlotTaken);
        }
        slot.occupy(id);
        Ok(())
    }

    /// Take the slot at `(day, shift)` away from `id`.
    ///
    /// Drops `id` from the roster once it holds no slot.
    ///
    /// # Errors
    ///
    /// [`InvalidDay`](AllocationError::InvalidDay) and
    /// [`InvalidShift`](AllocationError::InvalidShift) as for
    /// [`insert_shift`](Self::insert_shift);
    /// [`NotOwner`](AllocationError::NotOwner) if the slot is empty or held
    /// by someone else. The plan is unchanged on error.
    pub fn delete_shift(&mut self, id: UserId, day: i64, shift: i64) -> Result<(), AllocationError> {
        let position = SlotPosition::new(day, shift)?;

        let slot = self
            .days
            .slot_mut(position)
            .ok_or(AllocationError::InvalidShift)?;
        if !slot.is_held_by(id) {
            return Err(AllocationError::NotOwner);
        }
        slot.clear();

        if self.user_shift_count(id) == 0 {
            self.users.remove(id);
        }
        Ok(())
    }

    /// Add `identity` to the roster unless its id is already there.
    pub fn insert_user(&mut self, identity: &Identity) {
        self.users.insert(identity);
    }

    /// Give the slot at `(day, shift)` to `identity` and record it on the roster.
    ///
    /// # Errors
    ///
    /// Same as [`insert_shift`](Self::insert_shift); the roster is untouched
    /// on error.
    pub fn allocate(
        &mut self,
        identity: &Identity,
        day: i64,
        shift: i64,
    ) -> Result<(), AllocationError> {
        self.insert_shift(identity.id, day, shift)?;
        self.insert_user(identity);
        Ok(())
    }
}
