//! Settings for the `collect` binary.
//!
//! Layered from an optional TOML file and `COLLECT_*` environment variables,
//! the latter taking precedence.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::Deserialize;

/// File name of the node store inside the working directory.
const STORE_FILE: &str = "collect.db";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
  /// Directory holding the node store. A leading `~` is expanded.
  #[serde(default = "default_working_dir")]
  pub working_dir: PathBuf,
  /// Identifies the field crew entering data; logged with every import.
  #[serde(default)]
  pub crew_id:     Option<String>,
  /// Preferred language for labels.
  #[serde(default = "default_language")]
  pub language:    String,
}

fn default_working_dir() -> PathBuf { PathBuf::from("~/.collect") }

fn default_language() -> String { "en".to_string() }

impl Settings {
  /// Load settings from `file` (if it exists) and the environment.
  pub fn load(file: Option<&Path>) -> anyhow::Result<Self> {
    Self::load_with(file, None)
  }

  /// Like [`Settings::load`], reading variables from `env` instead of the
  /// process environment when given.
  fn load_with(
    file: Option<&Path>,
    env: Option<config::Map<String, String>>,
  ) -> anyhow::Result<Self> {
    let mut builder = config::Config::builder();
    if let Some(path) = file {
      builder = builder.add_source(config::File::from(path).required(false));
    }
    builder
      .add_source(config::Environment::with_prefix("COLLECT").source(env))
      .build()
      .context("failed to read configuration")?
      .try_deserialize()
      .context("failed to deserialise Settings")
  }

  /// Where the SQLite node store lives.
  pub fn store_path(&self) -> PathBuf {
    expand_tilde(&self.working_dir).join(STORE_FILE)
  }
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

#[cfg(test)]
mod tests {
  use std::io::Write as _;

  use super::*;

  fn no_env() -> config::Map<String, String> { config::Map::new() }

  #[test]
  fn file_values_override_defaults() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(file, "working_dir = \"/data/collect\"\ncrew_id = \"crew-7\"")
      .unwrap();

    let settings = Settings::load_with(Some(file.path()), Some(no_env())).unwrap();
    assert_eq!(settings.working_dir, PathBuf::from("/data/collect"));
    assert_eq!(settings.crew_id.as_deref(), Some("crew-7"));
    assert_eq!(settings.language, "en");
    assert_eq!(
      settings.store_path(),
      PathBuf::from("/data/collect/collect.db")
    );
  }

  #[test]
  fn missing_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let settings =
      Settings::load_with(Some(&dir.path().join("absent.toml")), Some(no_env()))
        .unwrap();
    assert_eq!(settings.language, "en");
    assert!(settings.crew_id.is_none());
  }

  #[test]
  fn tilde_is_expanded_against_home() {
    let Ok(home) = std::env::var("HOME") else {
      return;
    };
    assert_eq!(
      expand_tilde(Path::new("~/surveys")),
      PathBuf::from(home).join("surveys")
    );
    assert_eq!(expand_tilde(Path::new("/abs")), PathBuf::from("/abs"));
  }

  #[test]
  fn environment_overrides_the_file() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(file, "working_dir = \"/data/collect\"\ncrew_id = \"crew-7\"")
      .unwrap();
    let env = config::Map::from([
      ("COLLECT_CREW_ID".to_string(), "crew-9".to_string()),
      ("COLLECT_LANGUAGE".to_string(), "fr".to_string()),
    ]);

    let settings = Settings::load_with(Some(file.path()), Some(env)).unwrap();
    assert_eq!(settings.crew_id.as_deref(), Some("crew-9"));
    assert_eq!(settings.language, "fr");
    assert_eq!(settings.working_dir, PathBuf::from("/data/collect"));
  }
}
