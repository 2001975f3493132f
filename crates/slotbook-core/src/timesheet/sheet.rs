//! [`PersonTimesheet`]: one person's availability for one week.
//!
//! Encoded for storage as `<week start>|<binary mask>`, for example
//! `2025-10-13|000011110000…` with exactly [`BINS_PER_WEEK`] mask characters.

use chrono::{NaiveDate, NaiveDateTime};
use uuid::Uuid;

use super::{AvailabilityMask, BINS_PER_WEEK, WeekIndex};
use crate::{Error, Result};

/// A change requested by an input surface (e.g. a clicked grid cell). The
/// timesheet applies it and reports the resulting state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimesheetEvent {
  ToggleBin(usize),
  MarkAvailable {
    start: NaiveDateTime,
    end:   NaiveDateTime,
  },
  MarkUnavailable {
    start: NaiveDateTime,
    end:   NaiveDateTime,
  },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonTimesheet {
  person_id: Uuid,
  week:      WeekIndex,
  mask:      AvailabilityMask,
}

impl PersonTimesheet {
  /// An all-unavailable timesheet.
  pub fn new(person_id: Uuid, week: WeekIndex) -> Self {
    Self {
      person_id,
      week,
      mask: AvailabilityMask::new(BINS_PER_WEEK),
    }
  }

  /// Wrap an existing mask, which must have exactly [`BINS_PER_WEEK`] bins.
  pub fn with_mask(
    person_id: Uuid,
    week: WeekIndex,
    mask: AvailabilityMask,
  ) -> Result<Self> {
    if mask.size() != BINS_PER_WEEK {
      return Err(Error::MaskSize {
        expected: BINS_PER_WEEK,
        actual:   mask.size(),
      });
    }
    Ok(Self {
      person_id,
      week,
      mask,
    })
  }

  pub fn from_binary(
    person_id: Uuid,
    week_start: NaiveDate,
    binary: &str,
  ) -> Result<Self> {
    let mask = AvailabilityMask::from_binary_string(binary)?;
    Self::with_mask(person_id, WeekIndex::new(week_start), mask)
  }

  pub fn to_binary(&self) -> String { self.mask.to_binary_string() }

  pub fn person_id(&self) -> Uuid { self.person_id }

  pub fn week(&self) -> WeekIndex { self.week }

  pub fn week_start(&self) -> NaiveDate { self.week.week_start() }

  pub fn mask(&self) -> &AvailabilityMask { &self.mask }

  /// Mark `[start, end)` available.
  pub fn mark_available(&mut self, start: NaiveDateTime, end: NaiveDateTime) -> Result<()> {
    let (from, to) = self.bins(start, end)?;
    self.mask.set_range(from, to, true)
  }

  /// Mark `[start, end)` unavailable.
  pub fn mark_unavailable(
    &mut self,
    start: NaiveDateTime,
    end: NaiveDateTime,
  ) -> Result<()> {
    let (from, to) = self.bins(start, end)?;
    self.mask.set_range(from, to, false)
  }

  /// True iff every bin in the translated range is available. A trailing bin
  /// that `end` only partly covers is not checked.
  pub fn is_available(&self, start: NaiveDateTime, end: NaiveDateTime) -> Result<bool> {
    let (from, to) = self.bins(start, end)?;
    self.mask.all_set(from, to)
  }

  /// Apply `event`, returning the availability the affected bins now hold.
  pub fn apply(&mut self, event: TimesheetEvent) -> Result<bool> {
    match event {
      TimesheetEvent::ToggleBin(bin) => self.mask.toggle(bin),
      TimesheetEvent::MarkAvailable { start, end } => {
        self.mark_available(start, end).map(|()| true)
      }
      TimesheetEvent::MarkUnavailable { start, end } => {
        self.mark_unavailable(start, end).map(|()| false)
      }
    }
  }

  /// `<week start>|<binary mask>`.
  pub fn encode(&self) -> String {
    format!("{}|{}", self.week.week_start().format("%Y-%m-%d"), self.to_binary())
  }

  /// Inverse of [`encode`](Self::encode). The text is split on the first `|`.
  pub fn decode(person_id: Uuid, encoded: &str) -> Result<Self> {
    let (date, binary) = encoded.split_once('|').ok_or_else(|| {
      Error::InvalidTimesheet(format!("missing `|` separator in {encoded:?}"))
    })?;
    let week_start = NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|e| {
      Error::InvalidTimesheet(format!("bad week start {date:?}: {e}"))
    })?;
    Self::from_binary(person_id, week_start, binary)
  }

  fn bins(&self, start: NaiveDateTime, end: NaiveDateTime) -> Result<(usize, usize)> {
    Ok((self.week.to_index(start)?, self.week.to_bound(end)?))
  }
}
