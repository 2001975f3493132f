//! [`SlotRegistry`]: the authoritative set of currently booked slots.
//!
//! Conflict detection here is exact-match: two slots collide only when date,
//! start and end are all equal. Partially overlapping slots on the same day
//! are accepted even though [`TimeSlot::overlaps`] reports them as
//! overlapping.

use std::collections::BTreeSet;

use crate::{Error, Result, slot::TimeSlot};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlotRegistry {
  slots: BTreeSet<TimeSlot>,
}

impl SlotRegistry {
  pub fn new() -> Self { Self::default() }

  /// Build a registry from `slots`, returning it together with every slot
  /// that appeared more than once.
  pub fn from_slots<I>(slots: I) -> (Self, Vec<TimeSlot>)
  where
    I: IntoIterator<Item = TimeSlot>,
  {
    let mut registry = Self::new();
    let duplicates = registry.reload(slots);
    (registry, duplicates)
  }

  /// Insert `slot` unless an exactly equal slot is already booked. Returns
  /// whether it was inserted.
  pub fn add(&mut self, slot: TimeSlot) -> bool { self.slots.insert(slot) }

  /// Remove an exactly equal slot.
  ///
  /// Removing a slot that is not booked is a contract violation and returns
  /// [`Error::SlotNotRegistered`].
  pub fn remove(&mut self, slot: &TimeSlot) -> Result<()> {
    if self.slots.remove(slot) {
      Ok(())
    } else {
      Err(Error::SlotNotRegistered(*slot))
    }
  }

  /// Clear and re-insert from the roster's current slots. Slots that could
  /// not be inserted because an equal one was already present are returned.
  pub fn reload<I>(&mut self, slots: I) -> Vec<TimeSlot>
  where
    I: IntoIterator<Item = TimeSlot>,
  {
    self.slots.clear();
    let mut duplicates = Vec::new();
    for slot in slots {
      if !self.slots.insert(slot) {
        duplicates.push(slot);
      }
    }
    tracing::debug!(
      booked = self.slots.len(),
      duplicates = duplicates.len(),
      "slot registry reloaded"
    );
    duplicates
  }

  pub fn contains(&self, slot: &TimeSlot) -> bool { self.slots.contains(slot) }

  pub fn len(&self) -> usize { self.slots.len() }

  pub fn is_empty(&self) -> bool { self.slots.is_empty() }

  /// Booked slots in (date, start, end) order.
  pub fn iter(&self) -> impl Iterator<Item = &TimeSlot> { self.slots.iter() }
}
