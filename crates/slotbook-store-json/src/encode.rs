//! Conversion between [`Person`] records and their on-disk JSON shape.
//!
//! Ids are hyphenated lowercase strings, slots use the `YYYY-MM-DD HHMM-HHMM`
//! text form and timesheets the `YYYY-MM-DD|<bits>` form. Decoding goes back
//! through the core constructors so the recurrence flag is recomputed from the
//! tags here.

use serde::{Deserialize, Serialize};
use slotbook_core::{person::Person, slot::TimeSlot, timesheet::PersonTimesheet};
use uuid::Uuid;

use crate::Result;

// ─── Document ────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct RawRoster {
  #[serde(default)]
  pub persons: Vec<RawPerson>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawPerson {
  pub id:        String,
  pub name:      String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub phone:     Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub email:     Option<String>,
  #[serde(default)]
  pub tags:      Vec<String>,
  pub slot:      String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub timesheet: Option<String>,
}

// ─── Uuid ────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── Person ──────────────────────────────────────────────────────────────────

impl From<&Person> for RawPerson {
  fn from(p: &Person) -> Self {
    Self {
      id:        encode_uuid(p.person_id),
      name:      p.name.clone(),
      phone:     p.phone.clone(),
      email:     p.email.clone(),
      tags:      p.tags().to_vec(),
      slot:      p.slot.to_string(),
      timesheet: p.timesheet.as_ref().map(PersonTimesheet::encode),
    }
  }
}

impl RawPerson {
  pub fn into_person(self) -> Result<Person> {
    let person_id = decode_uuid(&self.id)?;
    let slot = TimeSlot::parse(&self.slot)?;
    let timesheet = self
      .timesheet
      .as_deref()
      .map(|s| PersonTimesheet::decode(person_id, s))
      .transpose()?;

    let mut person = Person::with_tags(person_id, self.name, slot, self.tags);
    person.phone = self.phone;
    person.email = self.email;
    person.timesheet = timesheet;
    Ok(person)
  }
}

#[cfg(test)]
mod tests {
  use slotbook_core::Error as CoreError;

  use super::*;
  use crate::Error;

  fn raw(slot: &str) -> RawPerson {
    RawPerson {
      id:        encode_uuid(Uuid::new_v4()),
      name:      "Alice".into(),
      phone:     Some("91234567".into()),
      email:     None,
      tags:      vec!["Recurring".into()],
      slot:      slot.into(),
      timesheet: None,
    }
  }

  #[test]
  fn decoding_recomputes_recurrence() {
    let person = raw("2025-10-12 1600-1800").into_person().unwrap();
    assert!(person.recurrence().is_weekly());
    assert_eq!(person.phone.as_deref(), Some("91234567"));
  }

  #[test]
  fn malformed_slot_is_a_core_format_error() {
    let err = raw("2025-10-12 1600-1610").into_person().unwrap_err();
    assert!(matches!(err, Error::Core(CoreError::InvalidTimeSlot { .. })));
  }

  #[test]
  fn malformed_id_is_rejected() {
    let mut r = raw("2025-10-12 1600-1800");
    r.id = "not-a-uuid".into();
    assert!(matches!(r.into_person(), Err(Error::Uuid(_))));
  }

  #[test]
  fn bad_timesheet_is_rejected() {
    let mut r = raw("2025-10-12 1600-1800");
    r.timesheet = Some("2025-10-13|0101".into());
    assert!(matches!(
      r.into_person(),
      Err(Error::Core(CoreError::MaskSize { .. }))
    ));
  }
}
