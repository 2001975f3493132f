//! The [`Roster`] trait and its in-memory implementation.
//!
//! A roster is the list of booked persons. The [`Scheduler`](crate::Scheduler)
//! pairs one with a [`SlotRegistry`](crate::registry::SlotRegistry); the roster
//! itself knows nothing about slot conflicts.

use uuid::Uuid;

use crate::{Error, Result, person::Person};

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Storage for person records, addressed by `person_id`.
pub trait Roster {
  /// All persons, in roster order.
  fn persons(&self) -> &[Person];

  fn get(&self, id: Uuid) -> Option<&Person> {
    self.persons().iter().find(|p| p.person_id == id)
  }

  /// Append `person`. Fails with [`Error::DuplicatePerson`] if the id is
  /// taken.
  fn insert(&mut self, person: Person) -> Result<()>;

  /// Remove and return the person with `id`, if present.
  fn remove(&mut self, id: Uuid) -> Option<Person>;

  /// Replace the person with `id` in place. Fails with
  /// [`Error::PersonNotFound`] if there is none.
  fn replace(&mut self, id: Uuid, person: Person) -> Result<()>;
}

// ─── AddressBook ─────────────────────────────────────────────────────────────

/// A `Vec`-backed roster that keeps insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressBook {
  persons: Vec<Person>,
}

impl AddressBook {
  pub fn new() -> Self { Self::default() }

  /// Build from `persons`, rejecting repeated ids.
  pub fn from_persons(persons: Vec<Person>) -> Result<Self> {
    let mut book = Self::new();
    for person in persons {
      book.insert(person)?;
    }
    Ok(book)
  }

  pub fn len(&self) -> usize { self.persons.len() }

  pub fn is_empty(&self) -> bool { self.persons.is_empty() }

  fn position(&self, id: Uuid) -> Option<usize> {
    self.persons.iter().position(|p| p.person_id == id)
  }
}

impl Roster for AddressBook {
  fn persons(&self) -> &[Person] { &self.persons }

  fn insert(&mut self, person: Person) -> Result<()> {
    if self.position(person.person_id).is_some() {
      return Err(Error::DuplicatePerson(person.person_id));
    }
    self.persons.push(person);
    Ok(())
  }

  fn remove(&mut self, id: Uuid) -> Option<Person> {
    self.position(id).map(|i| self.persons.remove(i))
  }

  fn replace(&mut self, id: Uuid, person: Person) -> Result<()> {
    let i = self.position(id).ok_or(Error::PersonNotFound(id))?;
    self.persons[i] = person;
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::slot::TimeSlot;

  fn person(name: &str, slot: &str) -> Person {
    Person::new(name, TimeSlot::parse(slot).unwrap())
  }

  #[test]
  fn insert_get_remove() {
    let mut book = AddressBook::new();
    let alice = person("Alice", "2025-10-12 1000-1100");
    let id = alice.person_id;

    book.insert(alice.clone()).unwrap();
    assert_eq!(book.get(id), Some(&alice));
    assert!(matches!(book.insert(alice), Err(Error::DuplicatePerson(x)) if x == id));

    assert!(book.remove(id).is_some());
    assert!(book.remove(id).is_none());
    assert!(book.is_empty());
  }

  #[test]
  fn replace_keeps_position() {
    let a = person("Alice", "2025-10-12 1000-1100");
    let b = person("Bob", "2025-10-12 1200-1300");
    let mut book = AddressBook::from_persons(vec![a.clone(), b.clone()]).unwrap();

    let mut renamed = a.clone();
    renamed.name = "Alicia".into();
    book.replace(a.person_id, renamed).unwrap();
    assert_eq!(book.persons()[0].name, "Alicia");
    assert_eq!(book.persons()[1].name, "Bob");

    let stranger = Uuid::new_v4();
    assert!(matches!(
      book.replace(stranger, b),
      Err(Error::PersonNotFound(x)) if x == stranger
    ));
  }
}
