//! Which persons a listing shows, and in what order.

use crate::{person::Person, slot::TimeSlot};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ViewFilter {
  #[default]
  All,
  /// Persons carrying this tag (case-insensitive).
  Tagged(String),
  /// Persons whose slot overlaps this one, touching endpoints included.
  Overlapping(TimeSlot),
}

impl ViewFilter {
  pub fn matches(&self, person: &Person) -> bool {
    match self {
      Self::All => true,
      Self::Tagged(tag) => person.has_tag(tag),
      Self::Overlapping(slot) => person.slot.overlaps(slot),
    }
  }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewOrder {
  /// Roster order.
  #[default]
  Insertion,
  /// By slot: date, then start, then end.
  BySlot,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RosterView {
  pub filter: ViewFilter,
  pub order:  ViewOrder,
}

impl RosterView {
  /// Everyone, sorted by slot. This is what the rollover leaves behind.
  pub fn all_by_slot() -> Self {
    Self {
      filter: ViewFilter::All,
      order:  ViewOrder::BySlot,
    }
  }

  pub fn apply<'a>(&self, persons: &'a [Person]) -> Vec<&'a Person> {
    let mut shown: Vec<_> =
      persons.iter().filter(|p| self.filter.matches(p)).collect();
    if self.order == ViewOrder::BySlot {
      shown.sort_by_key(|p| p.slot);
    }
    shown
  }
}

#[cfg(test)]
mod tests {
  use uuid::Uuid;

  use super::*;

  fn person(name: &str, slot: &str, tags: &[&str]) -> Person {
    Person::with_tags(
      Uuid::new_v4(),
      name,
      TimeSlot::parse(slot).unwrap(),
      tags.iter().map(|t| t.to_string()).collect(),
    )
  }

  fn names(shown: Vec<&Person>) -> Vec<&str> {
    shown.into_iter().map(|p| p.name.as_str()).collect()
  }

  #[test]
  fn default_view_is_everyone_in_roster_order() {
    let persons = vec![
      person("B", "2025-10-13 1000-1100", &[]),
      person("A", "2025-10-12 1000-1100", &[]),
    ];
    assert_eq!(names(RosterView::default().apply(&persons)), ["B", "A"]);
  }

  #[test]
  fn by_slot_sorts_stably() {
    let persons = vec![
      person("late", "2025-10-13 1000-1100", &[]),
      person("long", "2025-10-12 1000-1200", &[]),
      person("short", "2025-10-12 1000-1100", &[]),
    ];
    assert_eq!(names(RosterView::all_by_slot().apply(&persons)), [
      "short", "long", "late"
    ]);
  }

  #[test]
  fn filters_by_tag_and_overlap() {
    let persons = vec![
      person("A", "2025-10-12 1000-1100", &["Recurring"]),
      person("B", "2025-10-12 1100-1200", &[]),
      person("C", "2025-10-12 1300-1400", &["vip"]),
    ];

    let tagged = RosterView {
      filter: ViewFilter::Tagged("recurring".into()),
      order:  ViewOrder::Insertion,
    };
    assert_eq!(names(tagged.apply(&persons)), ["A"]);

    let overlapping = RosterView {
      filter: ViewFilter::Overlapping(TimeSlot::parse("2025-10-12 1030-1100").unwrap()),
      order:  ViewOrder::BySlot,
    };
    assert_eq!(names(overlapping.apply(&persons)), ["A", "B"]);
  }
}
