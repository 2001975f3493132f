//! [`WeekIndex`] maps instants in one Monday-anchored week to bin indices.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};

use crate::{Error, Result};

pub const MINUTES_PER_BIN: i64 = 30;
pub const BINS_PER_DAY: usize = (24 * 60) / MINUTES_PER_BIN as usize;
pub const DAYS_PER_WEEK: usize = 7;
pub const BINS_PER_WEEK: usize = BINS_PER_DAY * DAYS_PER_WEEK;

/// One calendar week, starting Monday 00:00, split into [`BINS_PER_WEEK`]
/// bins of [`MINUTES_PER_BIN`] minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WeekIndex {
  week_start: NaiveDate,
}

impl WeekIndex {
  /// The week containing `day`; any weekday is rolled back to its Monday.
  pub fn new(day: NaiveDate) -> Self {
    let offset = day.weekday().num_days_from_monday();
    Self {
      week_start: day - TimeDelta::days(i64::from(offset)),
    }
  }

  pub fn week_start(&self) -> NaiveDate { self.week_start }

  pub fn start_of_week(&self) -> NaiveDateTime {
    self.week_start.and_time(NaiveTime::MIN)
  }

  /// Exclusive end: the following Monday at 00:00.
  pub fn end_of_week(&self) -> NaiveDateTime {
    self.start_of_week() + TimeDelta::days(DAYS_PER_WEEK as i64)
  }

  pub fn contains(&self, time: NaiveDateTime) -> bool {
    self.start_of_week() <= time && time < self.end_of_week()
  }

  /// The bin containing `time`.
  pub fn to_index(&self, time: NaiveDateTime) -> Result<usize> {
    if !self.contains(time) {
      return Err(self.out_of_week(time));
    }
    Ok(self.bins_since_start(time))
  }

  /// Like [`to_index`](Self::to_index), but for the exclusive end of a range:
  /// the end of the week itself maps to [`BINS_PER_WEEK`].
  pub fn to_bound(&self, time: NaiveDateTime) -> Result<usize> {
    if time == self.end_of_week() {
      return Ok(BINS_PER_WEEK);
    }
    self.to_index(time)
  }

  /// The instant at which `bin` begins.
  pub fn to_time(&self, bin: usize) -> Result<NaiveDateTime> {
    if bin >= BINS_PER_WEEK {
      return Err(Error::BinOutOfRange {
        index: bin,
        size:  BINS_PER_WEEK,
      });
    }
    Ok(self.start_of_week() + TimeDelta::minutes(bin as i64 * MINUTES_PER_BIN))
  }

  fn bins_since_start(&self, time: NaiveDateTime) -> usize {
    ((time - self.start_of_week()).num_minutes() / MINUTES_PER_BIN) as usize
  }

  fn out_of_week(&self, time: NaiveDateTime) -> Error {
    Error::OutOfWeek {
      time,
      week_start: self.week_start,
    }
  }
}
