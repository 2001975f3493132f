//! The booking record a roster holds for each person.
//!
//! Name, phone and email are plain strings here; their field-level validation
//! belongs to the input layer. The recurrence flag is derived from the tags
//! once, when the record is built.

use uuid::Uuid;

use crate::{slot::TimeSlot, timesheet::PersonTimesheet};

/// Tag that marks a booking as repeating weekly. Matched case-insensitively.
pub const RECURRING_TAG: &str = "recurring";

/// Whether a past booking is dropped or re-anchored by the rollover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Recurrence {
  /// Deleted once its slot is past.
  #[default]
  OneOff,
  /// Moved forward to the next weekly occurrence once its slot is past.
  Weekly,
}

impl Recurrence {
  pub fn from_tags<S: AsRef<str>>(tags: &[S]) -> Self {
    if tags
      .iter()
      .any(|t| t.as_ref().to_lowercase() == RECURRING_TAG)
    {
      Self::Weekly
    } else {
      Self::OneOff
    }
  }

  pub fn is_weekly(&self) -> bool { matches!(self, Self::Weekly) }
}

/// A person together with the slot they have booked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
  pub person_id: Uuid,
  pub name:      String,
  pub phone:     Option<String>,
  pub email:     Option<String>,
  pub slot:      TimeSlot,
  /// Weekly availability, independent of the booked slot.
  pub timesheet: Option<PersonTimesheet>,
  tags:          Vec<String>,
  recurrence:    Recurrence,
}

impl Person {
  /// A new, untagged one-off booking with a fresh id.
  pub fn new(name: impl Into<String>, slot: TimeSlot) -> Self {
    Self::with_tags(Uuid::new_v4(), name, slot, Vec::new())
  }

  /// Build a record with an explicit id and tag set. The recurrence flag is
  /// computed from `tags` here and nowhere else.
  pub fn with_tags(
    person_id: Uuid,
    name: impl Into<String>,
    slot: TimeSlot,
    tags: Vec<String>,
  ) -> Self {
    Self {
      person_id,
      name: name.into(),
      phone: None,
      email: None,
      recurrence: Recurrence::from_tags(&tags),
      tags,
      slot,
      timesheet: None,
    }
  }

  pub fn tags(&self) -> &[String] { &self.tags }

  /// Replace the tag set and recompute the recurrence flag.
  pub fn set_tags(&mut self, tags: Vec<String>) {
    self.recurrence = Recurrence::from_tags(&tags);
    self.tags = tags;
  }

  pub fn has_tag(&self, tag: &str) -> bool {
    let tag = tag.to_lowercase();
    self.tags.iter().any(|t| t.to_lowercase() == tag)
  }

  pub fn recurrence(&self) -> Recurrence { self.recurrence }

  /// A copy of this record booked into `slot`.
  pub fn rebooked(&self, slot: TimeSlot) -> Self {
    Self { slot, ..self.clone() }
  }
}
