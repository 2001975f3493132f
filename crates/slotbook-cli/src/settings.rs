//! Configuration: an optional TOML file layered under `SLOTBOOK_*` env vars.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
  /// Roster JSON file. A leading `~/` is expanded.
  #[serde(default = "default_data_path")]
  pub data_path: PathBuf,
}

fn default_data_path() -> PathBuf { PathBuf::from("data/slotbook.json") }

impl Settings {
  pub fn load(config_path: &Path) -> anyhow::Result<Self> {
    let raw = config::Config::builder()
      .add_source(config::File::from(config_path.to_path_buf()).required(false))
      .add_source(config::Environment::with_prefix("SLOTBOOK"))
      .build()
      .context("failed to read config file")?;

    let mut settings: Settings = raw
      .try_deserialize()
      .context("failed to deserialise settings")?;
    settings.data_path = expand_tilde(&settings.data_path);
    Ok(settings)
  }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
