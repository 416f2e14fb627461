//! The fixed weekly grid of slots.

use serde::Serialize;

use super::AllocationError;
use crate::UserId;

/// Number of shifts in a day.
pub const SHIFTS_PER_DAY: usize = 3;

/// Number of days in the grid (index 0 is the first day of the week).
pub const DAYS_PER_WEEK: usize = 7;

/// A validated `(day, shift)` coordinate inside the grid.
///
/// Serializes as `{"day": D, "shift": S}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct SlotPosition {
    day: usize,
    shift: usize,
}

impl SlotPosition {
    /// Validate raw indices into a position.
    ///
    /// The day is checked before the shift, so an out-of-range day is
    /// reported as such whatever the shift value.
    ///
    /// # Errors
    ///
    /// Returns [`AllocationError::InvalidDay`] if `day` is not in `0..7` and
    /// [`AllocationError::InvalidShift`] if `shift` is not in `0..3`.
    pub fn new(day: i64, shift: i64) -> Result<Self, AllocationError> {
        let day = day_index(day)?;
        let shift = usize::try_from(shift)
            .ok()
            .filter(|s| *s < SHIFTS_PER_DAY)
            .ok_or(AllocationError::InvalidShift)?;
        Ok(Self { day, shift })
    }

    /// Day index (`0..7`).
    #[must_use]
    pub const fn day(&self) -> usize {
        self.day
    }

    /// Shift index within the day (`0..3`).
    #[must_use]
    pub const fn shift(&self) -> usize {
        self.shift
    }
}

/// Validate a raw day index.
pub(super) fn day_index(day: i64) -> Result<usize, AllocationError> {
    usize::try_from(day)
        .ok()
        .filter(|d| *d < DAYS_PER_WEEK)
        .ok_or(AllocationError::InvalidDay)
}

/// One shift slot.
///
/// An empty slot carries owner `0`; read the owner through [`Slot::owner`],
/// which hides that placeholder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Slot {
    #[serde(rename = "used")]
    occupied: bool,
    #[serde(rename = "userid")]
    owner_id: UserId,
}

impl Slot {
    /// Whether someone holds this slot.
    #[must_use]
    pub const fn is_occupied(&self) -> bool {
        self.occupied
    }

    /// The holder of this slot, if any.
    #[must_use]
    pub const fn owner(&self) -> Option<UserId> {
        if self.occupied {
            Some(self.owner_id)
        } else {
            None
        }
    }

    /// Whether `id` holds this slot.
    #[must_use]
    pub fn is_held_by(&self, id: UserId) -> bool {
        self.owner() == Some(id)
    }

    pub(super) const fn occupy(&mut self, id: UserId) {
        self.occupied = true;
        self.owner_id = id;
    }

    pub(super) const fn clear(&mut self) {
        self.occupied = false;
        self.owner_id = UserId::new(0);
    }
}

/// One day of the grid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Day {
    shifts: [Slot; SHIFTS_PER_DAY],
}

impl Day {
    /// Slots of the day in shift order.
    #[must_use]
    pub const fn slots(&self) -> &[Slot; SHIFTS_PER_DAY] {
        &self.shifts
    }

    /// Number of slots in this day held by `id`.
    #[must_use]
    pub fn count_held_by(&self, id: UserId) -> usize {
        self.shifts.iter().filter(|slot| slot.is_held_by(id)).count()
    }
}

/// The 7x3 matrix of slots for one scheduling week.
///
/// Serializes as a bare array of days.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct WeekGrid {
    days: [Day; DAYS_PER_WEEK],
}

impl WeekGrid {
    /// Days of the week in order.
    #[must_use]
    pub const fn days(&self) -> &[Day; DAYS_PER_WEEK] {
        &self.days
    }

    /// The day at `index`, if in range.
    #[must_use]
    pub fn day(&self, index: usize) -> Option<&Day> {
        self.days.get(index)
    }

    /// The slot at a validated position.
    #[must_use]
    pub fn slot(&self, position: SlotPosition) -> Option<&Slot> {
        self.day(position.day)?.shifts.get(position.shift)
    }

    pub(super) fn slot_mut(&mut self, position: SlotPosition) -> Option<&mut Slot> {
        self.days.get_mut(position.day)?.shifts.get_mut(position.shift)
    }

    /// Every slot paired with its position, day ascending then shift ascending.
    pub fn iter(&self) -> impl Iterator<Item = (SlotPosition, &Slot)> + '_ {
        self.days.iter().enumerate().flat_map(|(day, d)| {
            d.shifts
                .iter()
                .enumerate()
                .map(move |(shift, slot)| (SlotPosition { day, shift }, slot))
        })
    }

    /// Positions held by `id` in grid order.
    pub fn positions_held_by(&self, id: UserId) -> impl Iterator<Item = SlotPosition> + '_ {
        self.iter()
            .filter(move |(_, slot)| slot.is_held_by(id))
            .map(|(position, _)| position)
    }
}
