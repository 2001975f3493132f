//! JSON file backend for the slotbook roster.
//!
//! The whole roster is one document, read on [`JsonStore::load`] and
//! rewritten on [`JsonStore::save`]. Records are validated through the core
//! constructors on the way in, so a hand-edited file with a bad slot fails to
//! load instead of producing a half-valid roster.

mod encode;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::JsonStore;
