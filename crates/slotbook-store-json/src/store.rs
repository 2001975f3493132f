//! [`JsonStore`]: the roster persisted as a single JSON document.

use std::{
  fs,
  io::ErrorKind,
  path::{Path, PathBuf},
};

use slotbook_core::roster::{AddressBook, Roster};

use crate::{
  Error, Result,
  encode::{RawPerson, RawRoster},
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A roster file on disk.
#[derive(Debug, Clone)]
pub struct JsonStore {
  path: PathBuf,
}

impl JsonStore {
  /// Point a store at `path`. The file is not touched until the first
  /// [`load`](Self::load) or [`save`](Self::save).
  pub fn open(path: impl AsRef<Path>) -> Self {
    Self {
      path: path.as_ref().to_path_buf(),
    }
  }

  pub fn path(&self) -> &Path { &self.path }

  /// Read the roster. A missing file is an empty roster.
  pub fn load(&self) -> Result<AddressBook> {
    let text = match fs::read_to_string(&self.path) {
      Ok(text) => text,
      Err(e) if e.kind() == ErrorKind::NotFound => {
        tracing::debug!(path = %self.path.display(), "no roster file, starting empty");
        return Ok(AddressBook::new());
      }
      Err(e) => return Err(Error::io(&self.path, e)),
    };

    let raw: RawRoster = serde_json::from_str(&text)?;
    let persons = raw
      .persons
      .into_iter()
      .map(RawPerson::into_person)
      .collect::<Result<Vec<_>>>()?;
    let book = AddressBook::from_persons(persons)?;

    tracing::debug!(path = %self.path.display(), persons = book.len(), "roster loaded");
    Ok(book)
  }

  /// Write the roster to a sibling `.tmp` file, then rename it over the
  /// target. Missing parent directories are created.
  pub fn save(&self, book: &AddressBook) -> Result<()> {
    if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
      fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?;
    }

    let raw = RawRoster {
      persons: book.persons().iter().map(RawPerson::from).collect(),
    };
    let json = serde_json::to_string_pretty(&raw)?;

    let tmp = self.tmp_path();
    fs::write(&tmp, json).map_err(|e| Error::io(&tmp, e))?;
    fs::rename(&tmp, &self.path).map_err(|e| Error::io(&self.path, e))?;

    tracing::debug!(path = %self.path.display(), persons = book.len(), "roster saved");
    Ok(())
  }

  fn tmp_path(&self) -> PathBuf {
    let mut name = self
      .path
      .file_name()
      .map(|n| n.to_os_string())
      .unwrap_or_default();
    name.push(".tmp");
    self.path.with_file_name(name)
  }
}
