//! [`Scheduler`] holds the roster and its slot registry, mutated together.
//!
//! Every change to a booked slot goes through [`Scheduler::set_person`] (or
//! the other mutators here), which keeps the registry equal to the set of
//! slots the roster holds. The two halves are never exposed for separate
//! mutation, so a half-applied change cannot be observed between calls.
//!
//! There is no internal locking. Callers that share a `Scheduler` between
//! threads must wrap the whole value in a single mutex or actor.

use uuid::Uuid;

use crate::{
  Error, Result,
  person::Person,
  registry::SlotRegistry,
  roster::{AddressBook, Roster},
  slot::TimeSlot,
  view::RosterView,
};

pub struct Scheduler<R: Roster = AddressBook> {
  pub(crate) roster:   R,
  pub(crate) registry: SlotRegistry,
  pub(crate) view:     RosterView,
}

impl<R: Roster> Scheduler<R> {
  /// Take ownership of `roster` and register every slot it holds.
  ///
  /// Fails with [`Error::DuplicateSlot`] if two persons hold the same slot.
  pub fn new(roster: R) -> Result<Self> {
    let registry = registry_for(&roster)?;
    Ok(Self {
      roster,
      registry,
      view: RosterView::default(),
    })
  }

  /// Replace the whole roster and re-sync the registry. On error the current
  /// state is kept.
  pub fn reset(&mut self, roster: R) -> Result<()> {
    self.registry = registry_for(&roster)?;
    self.roster = roster;
    self.view = RosterView::default();
    tracing::info!(
      persons = self.roster.persons().len(),
      "roster reset; slot registry re-synced"
    );
    Ok(())
  }

  pub fn roster(&self) -> &R { &self.roster }

  pub fn registry(&self) -> &SlotRegistry { &self.registry }

  pub fn into_roster(self) -> R { self.roster }

  pub fn person(&self, id: Uuid) -> Option<&Person> { self.roster.get(id) }

  // ── Registry surface ──────────────────────────────────────────────────────

  /// Reserve `slot` without attaching it to a person. Returns whether it was
  /// free.
  pub fn add_slot(&mut self, slot: TimeSlot) -> bool { self.registry.add(slot) }

  /// Release a reservation made with [`add_slot`](Self::add_slot).
  pub fn remove_slot(&mut self, slot: &TimeSlot) -> Result<()> {
    self.registry.remove(slot)
  }

  /// Rebuild the registry from the roster, dropping stray reservations.
  pub fn reload(&mut self) -> Result<()> {
    self.registry = registry_for(&self.roster)?;
    Ok(())
  }

  // ── Person mutations ──────────────────────────────────────────────────────

  /// Book `person` into the roster. Fails with [`Error::SlotConflict`] if
  /// their slot is already taken.
  pub fn add_person(&mut self, person: Person) -> Result<()> {
    if self.roster.get(person.person_id).is_some() {
      return Err(Error::DuplicatePerson(person.person_id));
    }
    let slot = person.slot;
    if !self.registry.add(slot) {
      return Err(Error::SlotConflict(slot));
    }
    if let Err(e) = self.roster.insert(person) {
      self.registry.remove(&slot)?;
      return Err(e);
    }
    tracing::debug!(%slot, "person booked");
    Ok(())
  }

  /// Remove a person and release their slot.
  pub fn delete_person(&mut self, id: Uuid) -> Result<Person> {
    let slot = self
      .roster
      .get(id)
      .map(|p| p.slot)
      .ok_or(Error::PersonNotFound(id))?;
    self.registry.remove(&slot)?;
    let person = self.roster.remove(id).ok_or(Error::PersonNotFound(id))?;
    tracing::debug!(%slot, "person deleted; slot released");
    Ok(person)
  }

  /// Replace the person with `id` by `edited`.
  ///
  /// When the slot changes, the old slot is released and the new one
  /// reserved. If the new slot is taken the old reservation is restored, the
  /// roster is left untouched and [`Error::SlotConflict`] is returned.
  pub fn set_person(&mut self, id: Uuid, edited: Person) -> Result<()> {
    let old = self
      .roster
      .get(id)
      .map(|p| p.slot)
      .ok_or(Error::PersonNotFound(id))?;
    if edited.person_id != id && self.roster.get(edited.person_id).is_some() {
      return Err(Error::DuplicatePerson(edited.person_id));
    }

    let new = edited.slot;
    self.rebook(&old, &new)?;
    if let Err(e) = self.roster.replace(id, edited) {
      self.undo_rebook(&old, &new);
      return Err(e);
    }
    Ok(())
  }

  /// Move the person with `id` into `slot`, keeping everything else.
  pub fn set_person_slot(&mut self, id: Uuid, slot: TimeSlot) -> Result<()> {
    let edited = self
      .roster
      .get(id)
      .map(|p| p.rebooked(slot))
      .ok_or(Error::PersonNotFound(id))?;
    self.set_person(id, edited)
  }

  // ── View ──────────────────────────────────────────────────────────────────

  pub fn view(&self) -> &RosterView { &self.view }

  pub fn set_view(&mut self, view: RosterView) { self.view = view; }

  /// The persons the current view shows, in view order.
  pub fn visible(&self) -> Vec<&Person> { self.view.apply(self.roster.persons()) }

  // ── Internals ─────────────────────────────────────────────────────────────

  fn rebook(&mut self, old: &TimeSlot, new: &TimeSlot) -> Result<()> {
    if old == new {
      return Ok(());
    }
    self.registry.remove(old)?;
    if !self.registry.add(*new) {
      self.registry.add(*old);
      tracing::debug!(%old, %new, "slot taken; previous booking restored");
      return Err(Error::SlotConflict(*new));
    }
    Ok(())
  }

  fn undo_rebook(&mut self, old: &TimeSlot, new: &TimeSlot) {
    if old == new {
      return;
    }
    let restored = self.registry.remove(new).is_ok() && self.registry.add(*old);
    debug_assert!(restored, "registry out of sync while undoing {old} -> {new}");
  }
}

fn registry_for<R: Roster>(roster: &R) -> Result<SlotRegistry> {
  let (registry, duplicates) =
    SlotRegistry::from_slots(roster.persons().iter().map(|p| p.slot));
  if let Some(slot) = duplicates.first() {
    tracing::warn!(%slot, count = duplicates.len(), "roster holds duplicate bookings");
    return Err(Error::DuplicateSlot(*slot));
  }
  Ok(registry)
}
