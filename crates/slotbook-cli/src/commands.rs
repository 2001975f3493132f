//! Subcommand handlers. Each one works against an already-loaded
//! [`Scheduler`] and reports whether the roster needs saving.

use std::fmt::Write as _;

use anyhow::{Context, Result, anyhow, bail};
use chrono::{NaiveDate, NaiveDateTime};
use slotbook_core::{
  Scheduler,
  clock::{Clock, FixedClock, SystemClock},
  person::Person,
  rollover::{RolloverOutcome, run_clear_past},
  roster::Roster,
  timesheet::{PersonTimesheet, TimesheetEvent, WeekIndex},
  view::{RosterView, ViewFilter, ViewOrder},
};
use uuid::Uuid;

use crate::{Command, TimesheetCommand, render};

/// What a command printed, and whether it changed the roster.
#[derive(Debug, Default)]
pub struct Output {
  pub text:  String,
  pub dirty: bool,
}

impl Output {
  fn read(text: String) -> Self { Self { text, dirty: false } }

  fn changed(text: String) -> Self { Self { text, dirty: true } }
}

pub fn run(scheduler: &mut Scheduler, command: Command) -> Result<Output> {
  match command {
    Command::Add {
      name,
      slot,
      phone,
      email,
      tags,
    } => {
      let mut person = Person::with_tags(Uuid::new_v4(), name, slot, tags);
      person.phone = phone;
      person.email = email;
      let line = render::person_line(&person);
      scheduler
        .add_person(person)
        .with_context(|| format!("could not book {slot}"))?;
      Ok(Output::changed(format!("New person added: {line}\n")))
    }

    Command::List {
      tag,
      overlapping,
      sorted,
    } => {
      let filter = match (tag, overlapping) {
        (Some(tag), _) => ViewFilter::Tagged(tag),
        (None, Some(slot)) => ViewFilter::Overlapping(slot),
        (None, None) => ViewFilter::All,
      };
      let order = if sorted {
        ViewOrder::BySlot
      } else {
        ViewOrder::Insertion
      };
      scheduler.set_view(RosterView { filter, order });

      let mut text = String::new();
      let shown = scheduler.visible();
      for person in &shown {
        writeln!(text, "{}", render::person_line(person))?;
      }
      writeln!(text, "{} person(s) listed", shown.len())?;
      Ok(Output::read(text))
    }

    Command::Delete { who } => {
      let id = resolve(scheduler, &who)?;
      let person = scheduler.delete_person(id)?;
      Ok(Output::changed(format!(
        "Deleted person: {}\n",
        render::person_line(&person)
      )))
    }

    Command::Reschedule { who, slot } => {
      let id = resolve(scheduler, &who)?;
      scheduler
        .set_person_slot(id, slot)
        .with_context(|| format!("could not move {who} to {slot}"))?;
      let person = scheduler
        .person(id)
        .ok_or_else(|| anyhow!("{who} vanished while rescheduling"))?;
      Ok(Output::changed(format!(
        "Rescheduled: {}\n",
        render::person_line(person)
      )))
    }

    Command::ClearPast { now } => {
      let outcome = match now {
        Some(now) => run_clear_past(scheduler, &FixedClock(now))?,
        None => run_clear_past(scheduler, &SystemClock)?,
      };
      let dirty = matches!(outcome, RolloverOutcome::Applied(_));
      Ok(Output {
        text: format!("{outcome}\n"),
        dirty,
      })
    }

    Command::Timesheet(cmd) => timesheet(scheduler, cmd),
  }
}

// ─── Timesheets ───────────────────────────────────────────────────────────────

fn timesheet(scheduler: &mut Scheduler, cmd: TimesheetCommand) -> Result<Output> {
  match cmd {
    TimesheetCommand::Show { who, week } => {
      let id = resolve(scheduler, &who)?;
      let person = scheduler
        .person(id)
        .ok_or_else(|| anyhow!("no person {id}"))?;
      let day = week
        .or_else(|| person.timesheet.as_ref().map(|s| s.week_start()))
        .unwrap_or_else(|| SystemClock.now().date());
      let sheet = sheet_for(person, day);
      Ok(Output::read(format!(
        "{}\n{}",
        person.name,
        render::timesheet_grid(&sheet)
      )))
    }

    TimesheetCommand::Mark {
      who,
      from,
      to,
      unavailable,
    } => {
      let event = if unavailable {
        TimesheetEvent::MarkUnavailable { start: from, end: to }
      } else {
        TimesheetEvent::MarkAvailable { start: from, end: to }
      };
      let (name, _) = edit_timesheet(scheduler, &who, from.date(), event)?;
      let state = if unavailable { "unavailable" } else { "available" };
      Ok(Output::changed(format!(
        "{name} marked {state} from {from} to {to}\n"
      )))
    }

    TimesheetCommand::Toggle { who, bin } => {
      let id = resolve(scheduler, &who)?;
      let day = scheduler
        .person(id)
        .and_then(|p| p.timesheet.as_ref())
        .map(|s| s.week_start())
        .unwrap_or_else(|| SystemClock.now().date());
      let (name, sheet) =
        edit_timesheet(scheduler, &who, day, TimesheetEvent::ToggleBin(bin))?;
      let at = sheet.week().to_time(bin)?;
      let state = if sheet.mask().get(bin)? {
        "available"
      } else {
        "unavailable"
      };
      Ok(Output::changed(format!(
        "{name}: {} is now {state}\n",
        at.format("%a %Y-%m-%d %H:%M")
      )))
    }
  }
}

/// The person's stored sheet if it covers the week of `day`, otherwise a
/// fresh, fully unavailable one for that week.
fn sheet_for(person: &Person, day: NaiveDate) -> PersonTimesheet {
  let week = WeekIndex::new(day);
  match &person.timesheet {
    Some(sheet) if sheet.week() == week => sheet.clone(),
    _ => PersonTimesheet::new(person.person_id, week),
  }
}

/// Apply `event` to the sheet for the week of `day` and store it on the
/// person, replacing any sheet for another week.
fn edit_timesheet(
  scheduler: &mut Scheduler,
  who: &str,
  day: NaiveDate,
  event: TimesheetEvent,
) -> Result<(String, PersonTimesheet)> {
  let id = resolve(scheduler, who)?;
  let mut edited = scheduler
    .person(id)
    .cloned()
    .ok_or_else(|| anyhow!("no person {id}"))?;

  let mut sheet = sheet_for(&edited, day);
  sheet.apply(event)?;
  edited.timesheet = Some(sheet.clone());

  let name = edited.name.clone();
  scheduler.set_person(id, edited)?;
  Ok((name, sheet))
}

// ─── Argument helpers ─────────────────────────────────────────────────────────

/// Find a person by id, or by exact case-insensitive name.
pub fn resolve(scheduler: &Scheduler, who: &str) -> Result<Uuid> {
  if let Ok(id) = Uuid::parse_str(who) {
    return scheduler
      .person(id)
      .map(|p| p.person_id)
      .ok_or_else(|| anyhow!("no person with id {id}"));
  }

  let mut matches = scheduler
    .roster()
    .persons()
    .iter()
    .filter(|p| p.name.eq_ignore_ascii_case(who));
  match (matches.next(), matches.next()) {
    (Some(p), None) => Ok(p.person_id),
    (None, _) => bail!("no person named {who:?}"),
    (Some(_), Some(_)) => bail!("more than one person is named {who:?}; use the id"),
  }
}

/// `YYYY-MM-DD HH:MM`, optionally with seconds or a `T` separator.
pub fn parse_datetime(s: &str) -> Result<NaiveDateTime, String> {
  const FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
  ];
  FORMATS
    .iter()
    .find_map(|f| NaiveDateTime::parse_from_str(s.trim(), f).ok())
    .ok_or_else(|| format!("expected YYYY-MM-DD HH:MM, got {s:?}"))
}
