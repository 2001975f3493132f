//! The "clear past" rollover: reconcile bookings against the current moment.
//!
//! Past one-off bookings are deleted. Past weekly bookings are moved to their
//! next occurrence at or after `now`; when that slot is already taken the
//! person is left as they were and reported as a conflict.

use std::fmt;

use chrono::NaiveDateTime;
use uuid::Uuid;

use crate::{
  Error, ErrorClass, Result,
  clock::Clock,
  person::{Person, Recurrence},
  roster::Roster,
  scheduler::Scheduler,
  slot::TimeSlot,
  view::RosterView,
};

// ─── Plan ────────────────────────────────────────────────────────────────────

/// What a rollover will do, computed from a snapshot of the roster before any
/// mutation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RolloverPlan {
  deletions: Vec<Uuid>,
  updates:   Vec<(Uuid, TimeSlot)>,
}

impl RolloverPlan {
  pub fn from_snapshot(persons: &[Person], now: NaiveDateTime) -> Self {
    let mut plan = Self::default();
    for person in persons.iter().filter(|p| p.slot.is_past(now)) {
      match person.recurrence() {
        Recurrence::Weekly => plan
          .updates
          .push((person.person_id, person.slot.next_occurrence(now))),
        Recurrence::OneOff => plan.deletions.push(person.person_id),
      }
    }
    plan
  }

  pub fn deletions(&self) -> &[Uuid] { &self.deletions }

  /// `(person, target slot)` pairs.
  pub fn updates(&self) -> &[(Uuid, TimeSlot)] { &self.updates }

  pub fn is_empty(&self) -> bool {
    self.deletions.is_empty() && self.updates.is_empty()
  }
}

// ─── Result ──────────────────────────────────────────────────────────────────

/// Names of the persons each rollover step touched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RolloverReport {
  pub deleted:    Vec<String>,
  pub updated:    Vec<String>,
  pub conflicted: Vec<String>,
}

impl RolloverReport {
  pub fn is_empty(&self) -> bool {
    self.deleted.is_empty() && self.updated.is_empty() && self.conflicted.is_empty()
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RolloverOutcome {
  /// Nothing was past.
  NoChanges,
  Applied(RolloverReport),
}

impl RolloverOutcome {
  pub fn report(&self) -> Option<&RolloverReport> {
    match self {
      Self::NoChanges => None,
      Self::Applied(report) => Some(report),
    }
  }
}

impl fmt::Display for RolloverOutcome {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let report = match self {
      Self::NoChanges => {
        return f.write_str("No past timeslots found to clear or update.");
      }
      Self::Applied(report) => report,
    };

    f.write_str("ClearPast command successful.")?;
    let sections = [
      ("Deleted", "past contact(s)", &report.deleted),
      ("Updated", "recurring contact(s)", &report.updated),
      (
        "Could not update",
        "recurring contact(s) due to conflicts",
        &report.conflicted,
      ),
    ];
    for (verb, what, names) in sections {
      if !names.is_empty() {
        write!(f, "\n{verb} {} {what}: {}", names.len(), names.join(", "))?;
      }
    }
    Ok(())
  }
}

// ─── Engine ──────────────────────────────────────────────────────────────────

impl<R: Roster> Scheduler<R> {
  /// Run the rollover against `now`.
  ///
  /// Deletions are applied before updates. Conflicts are reported in the
  /// outcome, never returned as errors; any other error is a broken
  /// roster/registry contract and aborts the pass.
  pub fn clear_past(&mut self, now: NaiveDateTime) -> Result<RolloverOutcome> {
    let plan = RolloverPlan::from_snapshot(self.roster.persons(), now);
    let mut report = RolloverReport::default();

    for &id in plan.deletions() {
      let person = self.delete_person(id)?;
      report.deleted.push(person.name);
    }

    for &(id, target) in plan.updates() {
      let name = self
        .person(id)
        .map(|p| p.name.clone())
        .ok_or(Error::PersonNotFound(id))?;
      match self.set_person_slot(id, target) {
        Ok(()) => report.updated.push(name),
        Err(e) if e.class() == ErrorClass::Conflict => {
          tracing::warn!(error = %e, person = %name, "recurring booking not moved");
          report.conflicted.push(name);
        }
        Err(e) => return Err(e),
      }
    }

    if report.is_empty() {
      return Ok(RolloverOutcome::NoChanges);
    }

    self.view = RosterView::all_by_slot();
    tracing::info!(
      deleted = report.deleted.len(),
      updated = report.updated.len(),
      conflicted = report.conflicted.len(),
      "past bookings cleared"
    );
    Ok(RolloverOutcome::Applied(report))
  }
}

/// Run the rollover with "now" taken from `clock`.
pub fn run_clear_past<R: Roster>(
  scheduler: &mut Scheduler<R>,
  clock: &dyn Clock,
) -> Result<RolloverOutcome> {
  scheduler.clear_past(clock.now())
}
