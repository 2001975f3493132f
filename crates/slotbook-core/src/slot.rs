//! [`TimeSlot`]: the validated appointment interval every booking carries.
//!
//! A slot is a calendar date plus a same-day start and end time, written as
//! `YYYY-MM-DD HHMM-HHMM` (e.g. `2025-10-12 1600-1800`). Slots are immutable;
//! rescheduling a person replaces their slot with a new value.

use std::{fmt, str::FromStr};

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Shortest bookable slot, in minutes.
pub const MIN_DURATION_MINUTES: i64 = 30;

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H%M";

/// A booked (date, start, end) interval.
///
/// Field order matters: the derived `Ord` compares by date, then start, then
/// end.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct TimeSlot {
  date:  NaiveDate,
  start: NaiveTime,
  end:   NaiveTime,
}

impl TimeSlot {
  /// Build a slot from its parts, enforcing `start < end` and the minimum
  /// duration.
  pub fn new(date: NaiveDate, start: NaiveTime, end: NaiveTime) -> Result<Self> {
    check_times(start, end).map_err(|reason| Error::InvalidTimeSlot {
      input: format!(
        "{} {}-{}",
        date.format(DATE_FORMAT),
        start.format(TIME_FORMAT),
        end.format(TIME_FORMAT)
      ),
      reason,
    })?;
    Ok(Self { date, start, end })
  }

  /// Parse the `YYYY-MM-DD HHMM-HHMM` text form. Surrounding whitespace is
  /// ignored.
  pub fn parse(input: &str) -> Result<Self> {
    let invalid = |reason| Error::InvalidTimeSlot {
      input: input.to_owned(),
      reason,
    };

    let (date, times) = input
      .trim()
      .split_once(' ')
      .ok_or_else(|| invalid("expected `YYYY-MM-DD HHMM-HHMM`"))?;
    if times.contains(' ') {
      return Err(invalid("expected `YYYY-MM-DD HHMM-HHMM`"));
    }

    let date =
      parse_date(date).ok_or_else(|| invalid("date must be YYYY-MM-DD"))?;

    let (start, end) = times
      .split_once('-')
      .ok_or_else(|| invalid("times must be written HHMM-HHMM"))?;
    let start =
      parse_hhmm(start).ok_or_else(|| invalid("start time must be 24-hour HHMM"))?;
    let end =
      parse_hhmm(end).ok_or_else(|| invalid("end time must be 24-hour HHMM"))?;

    check_times(start, end).map_err(invalid)?;
    Ok(Self { date, start, end })
  }

  pub fn date(&self) -> NaiveDate { self.date }

  pub fn start_time(&self) -> NaiveTime { self.start }

  pub fn end_time(&self) -> NaiveTime { self.end }

  /// The start as a full date-time.
  pub fn start(&self) -> NaiveDateTime { self.date.and_time(self.start) }

  /// The end as a full date-time.
  pub fn end(&self) -> NaiveDateTime { self.date.and_time(self.end) }

  pub fn duration(&self) -> TimeDelta { self.end - self.start }

  /// True iff the slot ended strictly before `now`. A slot ending exactly at
  /// `now` is not past.
  pub fn is_past(&self, now: NaiveDateTime) -> bool { self.end() < now }

  /// The first weekly repetition of this slot whose start is at or after
  /// `now`. Returns `self` unchanged when it already starts at or after `now`.
  pub fn next_occurrence(&self, now: NaiveDateTime) -> TimeSlot {
    let start = self.start();
    if start >= now {
      return *self;
    }

    let week = TimeDelta::weeks(1);
    let mut next = start + TimeDelta::weeks((now - start).num_days() / 7);
    while next < now {
      next += week;
    }

    // Whole weeks keep the time of day, so the end stays on the same date.
    let end = next + self.duration();
    TimeSlot {
      date:  next.date(),
      start: next.time(),
      end:   end.time(),
    }
  }

  /// Interval overlap on the same date. Touching endpoints count as
  /// overlapping; slots on different dates never overlap.
  pub fn overlaps(&self, other: &TimeSlot) -> bool {
    if self.date != other.date {
      return false;
    }
    !(self.end < other.start || self.start > other.end)
  }
}

fn check_times(start: NaiveTime, end: NaiveTime) -> Result<(), &'static str> {
  if [start, end]
    .iter()
    .any(|t| t.second() != 0 || t.nanosecond() != 0)
  {
    return Err("times must be whole minutes");
  }
  if start >= end {
    return Err("start time must be before end time");
  }
  if (end - start).num_minutes() < MIN_DURATION_MINUTES {
    return Err("slot must last at least 30 minutes");
  }
  Ok(())
}

fn parse_date(s: &str) -> Option<NaiveDate> {
  let b = s.as_bytes();
  let shape_ok = b.len() == 10
    && b[4] == b'-'
    && b[7] == b'-'
    && b
      .iter()
      .enumerate()
      .all(|(i, c)| i == 4 || i == 7 || c.is_ascii_digit());
  if !shape_ok {
    return None;
  }
  NaiveDate::parse_from_str(s, DATE_FORMAT).ok()
}

fn parse_hhmm(s: &str) -> Option<NaiveTime> {
  if s.len() != 4 || !s.bytes().all(|c| c.is_ascii_digit()) {
    return None;
  }
  let hour = s[..2].parse().ok()?;
  let minute = s[2..].parse().ok()?;
  NaiveTime::from_hms_opt(hour, minute, 0)
}

impl fmt::Display for TimeSlot {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "{} {:02}{:02}-{:02}{:02}",
      self.date.format(DATE_FORMAT),
      self.start.hour(),
      self.start.minute(),
      self.end.hour(),
      self.end.minute()
    )
  }
}

impl FromStr for TimeSlot {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> { Self::parse(s) }
}

impl TryFrom<String> for TimeSlot {
  type Error = Error;

  fn try_from(s: String) -> Result<Self> { Self::parse(&s) }
}

impl From<TimeSlot> for String {
  fn from(slot: TimeSlot) -> Self { slot.to_string() }
}

#[cfg(test)]
mod tests {
  use chrono::{Datelike, NaiveDate};

  use super::*;

  fn slot(s: &str) -> TimeSlot { TimeSlot::parse(s).unwrap() }

  fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
      .unwrap()
      .and_hms_opt(h, min, 0)
      .unwrap()
  }

  // ── Parsing ───────────────────────────────────────────────────────────────

  #[test]
  fn parses_canonical_form() {
    let s = slot("2025-10-12 1600-1800");
    assert_eq!(s.date(), NaiveDate::from_ymd_opt(2025, 10, 12).unwrap());
    assert_eq!(s.start_time(), NaiveTime::from_hms_opt(16, 0, 0).unwrap());
    assert_eq!(s.end_time(), NaiveTime::from_hms_opt(18, 0, 0).unwrap());
  }

  #[test]
  fn display_round_trips() {
    for text in [
      "2025-10-12 1600-1800",
      "2020-01-01 0000-0030",
      "1999-12-31 2300-2359",
      "2024-02-29 0905-1130",
    ] {
      assert_eq!(slot(text).to_string(), text);
    }
  }

  #[test]
  fn surrounding_whitespace_is_ignored() {
    assert_eq!(slot("  2025-10-12 1600-1800 ").to_string(), "2025-10-12 1600-1800");
  }

  #[test]
  fn thirty_minutes_is_the_shortest_valid_slot() {
    assert!(TimeSlot::parse("2025-10-12 1600-1630").is_ok());
    assert!(TimeSlot::parse("2025-10-12 1600-1629").is_err());
  }

  #[test]
  fn start_must_precede_end() {
    assert!(TimeSlot::parse("2025-10-12 1600-1600").is_err());
    assert!(TimeSlot::parse("2025-10-12 1800-1600").is_err());
  }

  #[test]
  fn rejects_malformed_text() {
    for bad in [
      "",
      "2025-10-12",
      "2025-10-12 1600",
      "2025-10-12 16:00-18:00",
      "2025-10-12 1600-1800 extra",
      "2025-10-12  1600-1800",
      "2025-1-12 1600-1800",
      "12-10-2025 1600-1800",
      "2025-02-30 1600-1800",
      "2025-10-12 2400-2430",
      "2025-10-12 1660-1800",
      "2025-10-12 160-1800",
      "2025-10-12 1600-1800-1900",
    ] {
      let err = TimeSlot::parse(bad).unwrap_err();
      assert!(
        matches!(err, Error::InvalidTimeSlot { .. }),
        "{bad:?} should be rejected"
      );
    }
  }

  #[test]
  fn new_enforces_the_same_rules_as_parse() {
    let date = NaiveDate::from_ymd_opt(2025, 10, 12).unwrap();
    let t = |h, m| NaiveTime::from_hms_opt(h, m, 0).unwrap();
    assert!(TimeSlot::new(date, t(9, 0), t(9, 30)).is_ok());
    assert!(TimeSlot::new(date, t(9, 0), t(9, 29)).is_err());
    assert!(TimeSlot::new(date, t(9, 0), t(9, 0)).is_err());
  }

  #[test]
  fn new_rejects_times_with_seconds() {
    let date = NaiveDate::from_ymd_opt(2025, 10, 12).unwrap();
    let end = NaiveTime::from_hms_opt(10, 0, 0).unwrap();
    let with_secs = NaiveTime::from_hms_opt(9, 0, 30).unwrap();
    let with_nanos = NaiveTime::from_hms_nano_opt(9, 0, 0, 1).unwrap();

    for start in [with_secs, with_nanos] {
      assert!(matches!(
        TimeSlot::new(date, start, end),
        Err(Error::InvalidTimeSlot { reason: "times must be whole minutes", .. })
      ));
    }

    // Whatever `new` accepts survives the text form unchanged.
    let whole = TimeSlot::new(date, NaiveTime::from_hms_opt(9, 0, 0).unwrap(), end).unwrap();
    assert_eq!(whole, slot("2025-10-12 0900-1000"));
    assert_eq!(TimeSlot::parse(&whole.to_string()).unwrap(), whole);
  }

  // ── Past / rollforward ────────────────────────────────────────────────────

  #[test]
  fn slot_ending_exactly_now_is_not_past() {
    let s = slot("2025-10-12 1600-1800");
    assert!(!s.is_past(at(2025, 10, 12, 18, 0)));
    assert!(s.is_past(at(2025, 10, 12, 18, 1)));
    assert!(!s.is_past(at(2025, 10, 12, 17, 0)));
  }

  #[test]
  fn next_occurrence_is_weekly_and_keeps_duration() {
    // 2020-01-05 is a Sunday; the next Sunday after 2025-10-22 is the 26th.
    let s = slot("2020-01-05 1200-1300");
    let next = s.next_occurrence(at(2025, 10, 22, 16, 0));
    assert_eq!(next.to_string(), "2025-10-26 1200-1300");
    assert_eq!(next.duration(), s.duration());
  }

  #[test]
  fn next_occurrence_lands_at_or_after_now() {
    let s = slot("2021-03-01 0900-1000");
    for now in [
      at(2021, 3, 1, 9, 1),
      at(2021, 3, 8, 9, 0),
      at(2023, 7, 19, 23, 59),
      at(2030, 1, 1, 0, 0),
    ] {
      let next = s.next_occurrence(now);
      assert!(next.start() >= now);
      assert!(next.start() - now < TimeDelta::weeks(1));
      assert_eq!(next.date().weekday(), s.date().weekday());
    }
  }

  #[test]
  fn start_equal_to_now_is_already_current() {
    let s = slot("2021-03-08 0900-1000");
    assert_eq!(s.next_occurrence(at(2021, 3, 8, 9, 0)), s);
  }

  #[test]
  fn next_occurrence_is_identity_for_future_slots() {
    let s = slot("2030-06-01 1000-1100");
    assert_eq!(s.next_occurrence(at(2025, 1, 1, 0, 0)), s);
  }

  // ── Overlap / ordering ────────────────────────────────────────────────────

  #[test]
  fn overlap_includes_touching_endpoints() {
    let a = slot("2025-10-12 1000-1100");
    let touching = slot("2025-10-12 1100-1200");
    let inside = slot("2025-10-12 1015-1045");
    let apart = slot("2025-10-12 1130-1230");
    let other_day = slot("2025-10-13 1000-1100");

    assert!(a.overlaps(&touching));
    assert!(a.overlaps(&inside));
    assert!(!a.overlaps(&apart));
    assert!(!a.overlaps(&other_day));
  }

  #[test]
  fn overlap_is_symmetric() {
    let slots = [
      slot("2025-10-12 1000-1100"),
      slot("2025-10-12 1100-1200"),
      slot("2025-10-12 0930-1030"),
      slot("2025-10-12 1130-1230"),
      slot("2025-10-13 1000-1100"),
    ];
    for a in &slots {
      for b in &slots {
        assert_eq!(a.overlaps(b), b.overlaps(a), "{a} vs {b}");
      }
    }
  }

  #[test]
  fn orders_by_date_then_start_then_end() {
    let mut slots = vec![
      slot("2025-10-13 0800-0900"),
      slot("2025-10-12 1000-1200"),
      slot("2025-10-12 1000-1100"),
      slot("2025-10-12 0900-1000"),
    ];
    slots.sort();
    let text: Vec<_> = slots.iter().map(ToString::to_string).collect();
    assert_eq!(text, [
      "2025-10-12 0900-1000",
      "2025-10-12 1000-1100",
      "2025-10-12 1000-1200",
      "2025-10-13 0800-0900",
    ]);
  }

  #[test]
  fn serialises_as_text() {
    let s = slot("2025-10-12 1600-1800");
    let json = serde_json::to_string(&s).unwrap();
    assert_eq!(json, "\"2025-10-12 1600-1800\"");
    let back: TimeSlot = serde_json::from_str(&json).unwrap();
    assert_eq!(back, s);
    assert!(serde_json::from_str::<TimeSlot>("\"2025-10-12 1600-1610\"").is_err());
  }
}
