//! Appointment scheduling core for the slotbook contact manager.
//!
//! Every booking carries a validated [`slot::TimeSlot`]. The [`Scheduler`]
//! keeps the roster and its [`registry::SlotRegistry`] in step, so two
//! bookings never share an exact slot, and hosts the "clear past"
//! [`rollover`]. Weekly availability grids live in [`timesheet`].
//!
//! This crate does no I/O. Persistence lives in `slotbook-store-json`.

pub mod clock;
pub mod error;
pub mod person;
pub mod registry;
pub mod rollover;
pub mod roster;
pub mod scheduler;
pub mod slot;
pub mod timesheet;
pub mod view;

pub use error::{Error, ErrorClass, Result};
pub use scheduler::Scheduler;
