//! Weekly availability: a Monday-anchored grid of 30-minute bins per person.
//!
//! This is informational and runs beside the booking path; nothing here
//! consults the [`SlotRegistry`](crate::registry::SlotRegistry).

mod mask;
mod sheet;
mod week;

pub use mask::AvailabilityMask;
pub use sheet::{PersonTimesheet, TimesheetEvent};
pub use week::{BINS_PER_DAY, BINS_PER_WEEK, DAYS_PER_WEEK, MINUTES_PER_BIN, WeekIndex};
