//! Source of "now" for the rollover.

use chrono::{Local, NaiveDateTime};

pub trait Clock {
  fn now(&self) -> NaiveDateTime;
}

/// The local wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
  fn now(&self) -> NaiveDateTime { Local::now().naive_local() }
}

/// A clock stuck at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
  fn now(&self) -> NaiveDateTime { self.0 }
}
