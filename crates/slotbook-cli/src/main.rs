//! `slotbook`: command-line front end for the slotbook roster.
//!
//! # Usage
//!
//! ```
//! slotbook add "Alice Tan" "2025-10-12 1600-1800" --tag recurring
//! slotbook list --sorted
//! slotbook clear-past
//! slotbook timesheet mark alice "2025-10-13 09:00" "2025-10-13 12:00"
//! ```

mod commands;
mod render;
mod settings;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use slotbook_core::{Scheduler, slot::TimeSlot};
use slotbook_store_json::JsonStore;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::settings::Settings;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "slotbook", version, about = "Contact bookings with weekly rollover")]
struct Args {
  /// Path to the TOML configuration file.
  #[arg(short, long, value_name = "FILE", default_value = "slotbook.toml")]
  config: PathBuf,

  /// Roster file; overrides `data_path` from the config.
  #[arg(long, value_name = "FILE", env = "SLOTBOOK_DATA")]
  data: Option<PathBuf>,

  /// Log at debug level unless RUST_LOG says otherwise.
  #[arg(short, long)]
  verbose: bool,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
  /// Book a new person into a free slot.
  Add {
    name:  String,
    /// `YYYY-MM-DD HHMM-HHMM`
    slot:  TimeSlot,
    #[arg(long)]
    phone: Option<String>,
    #[arg(long)]
    email: Option<String>,
    /// Repeatable. `recurring` makes the booking weekly.
    #[arg(short, long = "tag")]
    tags:  Vec<String>,
  },

  /// Show the roster.
  List {
    /// Only persons carrying this tag.
    #[arg(long, conflicts_with = "overlapping")]
    tag:         Option<String>,
    /// Only persons whose slot overlaps this one.
    #[arg(long, value_name = "SLOT")]
    overlapping: Option<TimeSlot>,
    /// Order by slot instead of insertion order.
    #[arg(long)]
    sorted:      bool,
  },

  /// Remove a person and free their slot.
  Delete { who: String },

  /// Move a person to another slot.
  Reschedule { who: String, slot: TimeSlot },

  /// Drop past one-off bookings and move recurring ones to their next week.
  ClearPast {
    /// Treat this instant (`YYYY-MM-DD HH:MM`) as now.
    #[arg(long, value_parser = commands::parse_datetime)]
    now: Option<chrono::NaiveDateTime>,
  },

  /// Weekly availability.
  #[command(subcommand)]
  Timesheet(TimesheetCommand),
}

#[derive(Subcommand, Debug)]
pub enum TimesheetCommand {
  /// Print the availability grid.
  Show {
    who:  String,
    /// Any day of the week to show; defaults to the stored week or today.
    #[arg(long, value_name = "DATE")]
    week: Option<chrono::NaiveDate>,
  },

  /// Mark `[FROM, TO)` available, or unavailable with `--unavailable`.
  Mark {
    who:         String,
    #[arg(value_parser = commands::parse_datetime)]
    from:        chrono::NaiveDateTime,
    #[arg(value_parser = commands::parse_datetime)]
    to:          chrono::NaiveDateTime,
    #[arg(long)]
    unavailable: bool,
  },

  /// Flip one 30-minute bin (0 is Monday 00:00).
  Toggle { who: String, bin: usize },
}

// ─── Entry point ──────────────────────────────────────────────────────────────

fn main() -> Result<()> {
  let args = Args::parse();

  let default_level = if args.verbose {
    LevelFilter::DEBUG
  } else {
    LevelFilter::WARN
  };
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy(),
    )
    .with_writer(std::io::stderr)
    .init();

  let settings = Settings::load(&args.config)?;
  let data_path = args
    .data
    .map(|p| settings::expand_tilde(&p))
    .unwrap_or(settings.data_path);

  let store = JsonStore::open(&data_path);
  let book = store
    .load()
    .with_context(|| format!("failed to load roster from {}", data_path.display()))?;
  let mut scheduler =
    Scheduler::new(book).context("roster file holds conflicting bookings")?;

  let output = commands::run(&mut scheduler, args.command)?;

  if output.dirty {
    store
      .save(scheduler.roster())
      .with_context(|| format!("failed to save roster to {}", data_path.display()))?;
  }
  print!("{}", output.text);

  Ok(())
}
