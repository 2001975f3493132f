//! Error types for `slotbook-core`.

use chrono::{NaiveDate, NaiveDateTime};
use thiserror::Error;
use uuid::Uuid;

use crate::slot::TimeSlot;

#[derive(Debug, Error)]
pub enum Error {
  // ── Format ──────────────────────────────────────────────────────────────
  #[error("invalid time slot {input:?}: {reason}")]
  InvalidTimeSlot { input: String, reason: &'static str },

  #[error("invalid timesheet encoding: {0}")]
  InvalidTimesheet(String),

  // ── Conflict ────────────────────────────────────────────────────────────
  #[error("time slot {0} conflicts with an existing booking")]
  SlotConflict(TimeSlot),

  // ── Bounds ──────────────────────────────────────────────────────────────
  #[error("time slot {0} is not registered")]
  SlotNotRegistered(TimeSlot),

  #[error("{time} lies outside the week starting {week_start}")]
  OutOfWeek {
    time:       NaiveDateTime,
    week_start: NaiveDate,
  },

  #[error("bin index {index} out of range for mask of size {size}")]
  BinOutOfRange { index: usize, size: usize },

  #[error("invalid bin range {from}..{to} for mask of size {size}")]
  InvalidRange { from: usize, to: usize, size: usize },

  #[error("mask size must be {expected}, got {actual}")]
  MaskSize { expected: usize, actual: usize },

  // ── Roster ──────────────────────────────────────────────────────────────
  #[error("person not found: {0}")]
  PersonNotFound(Uuid),

  #[error("person already exists: {0}")]
  DuplicatePerson(Uuid),

  #[error("roster holds more than one booking for {0}")]
  DuplicateSlot(TimeSlot),
}

/// Broad family of an [`Error`], used by callers to decide whether a failure
/// is the user's input, a booking collision, or a contract violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
  /// Malformed slot or timesheet text. Never recovered internally.
  Format,
  /// Exact-match booking collision. Recoverable per item.
  Conflict,
  /// Index, range or registry contract violation; a caller bug.
  Bounds,
  /// Person lookup or identity failure.
  Roster,
}

impl Error {
  pub fn class(&self) -> ErrorClass {
    match self {
      Self::InvalidTimeSlot { .. } | Self::InvalidTimesheet(_) => {
        ErrorClass::Format
      }
      Self::SlotConflict(_) => ErrorClass::Conflict,
      Self::SlotNotRegistered(_)
      | Self::OutOfWeek { .. }
      | Self::BinOutOfRange { .. }
      | Self::InvalidRange { .. }
      | Self::MaskSize { .. } => ErrorClass::Bounds,
      Self::PersonNotFound(_)
      | Self::DuplicatePerson(_)
      | Self::DuplicateSlot(_) => ErrorClass::Roster,
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
