//! Plain-text rendering for the terminal.

use std::fmt::Write as _;

use chrono::{Datelike, TimeDelta};
use slotbook_core::{
  person::Person,
  timesheet::{BINS_PER_DAY, DAYS_PER_WEEK, PersonTimesheet},
};

/// `<slot>  <name> [tags]  <phone> <email>  (<id>)`
pub fn person_line(person: &Person) -> String {
  let mut line = format!("{}  {}", person.slot, person.name);
  if !person.tags().is_empty() {
    let _ = write!(line, " [{}]", person.tags().join(", "));
  }
  for contact in [&person.phone, &person.email].into_iter().flatten() {
    let _ = write!(line, "  {contact}");
  }
  let _ = write!(line, "  ({})", person.person_id);
  line
}

/// One row per day, one column per 30-minute bin: `#` available, `.` not.
pub fn timesheet_grid(sheet: &PersonTimesheet) -> String {
  let mut out = " ".repeat(16);
  for hour in 0..24 {
    let _ = write!(out, "{hour:<2}");
  }
  out.push('\n');

  let mut bins = sheet.mask().iter();
  for day in 0..DAYS_PER_WEEK {
    let date = sheet.week_start() + TimeDelta::days(day as i64);
    let _ = write!(out, "{} {}  ", date.weekday(), date.format("%Y-%m-%d"));
    for available in bins.by_ref().take(BINS_PER_DAY) {
      out.push(if available { '#' } else { '.' });
    }
    out.push('\n');
  }
  let _ = writeln!(
    out,
    "{} of {} bins available",
    sheet.mask().cardinality(),
    sheet.mask().size()
  );
  out
}
