//! Users currently holding shifts.

use serde::Serialize;

use crate::{Identity, UserId};

/// Denormalized list of users who hold at least one slot, keyed by id.
///
/// Order carries no meaning. Serializes as a bare array of identities.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Roster {
    entries: Vec<Identity>,
}

impl Roster {
    /// Whether `id` has an entry.
    #[must_use]
    pub fn contains(&self, id: UserId) -> bool {
        self.entries.iter().any(|entry| entry.id == id)
    }

    /// The entry for `id`, if any.
    #[must_use]
    pub fn get(&self, id: UserId) -> Option<&Identity> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    /// Add an entry unless one with the same id exists.
    ///
    /// Returns `true` if the entry was added.
    pub(super) fn insert(&mut self, identity: &Identity) -> bool {
        if self.contains(identity.id) {
            return false;
        }
        self.entries.push(identity.clone());
        true
    }

    /// Remove the entry for `id`, returning it.
    pub(super) fn remove(&mut self, id: UserId) -> Option<Identity> {
        let index = self.entries.iter().position(|entry| entry.id == id)?;
        Some(self.entries.swap_remove(index))
    }

    /// All entries.
    pub fn iter(&self) -> impl Iterator<Item = &Identity> {
        self.entries.iter()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the roster is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
