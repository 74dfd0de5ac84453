//! Server configuration: defaults, then an optional TOML file, then
//! `RECORDS_*` environment variables.

use std::path::{Path, PathBuf};

use config::{Config, ConfigBuilder, ConfigError, Environment, File, builder::DefaultState};
use serde::Deserialize;

/// Runtime server configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  /// SQLite file holding the record collections. A leading `~/` is expanded.
  pub store_path: PathBuf,
}

impl ServerConfig {
  /// Load from `path` (if it exists) layered over the defaults, with
  /// environment overrides on top.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    defaults()?
      .add_source(File::from(path).required(false))
      .add_source(Environment::with_prefix("RECORDS"))
      .build()?
      .try_deserialize()
  }

  /// `host:port`, ready for binding.
  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
  Config::builder()
    .set_default("host", "127.0.0.1")?
    .set_default("port", 8080)?
    .set_default("store_path", "records.db")
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
