//! Synthetic record identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque identifier shared by all four collections.
///
/// Seed records use short numeric strings (`"1"`, `"2"`, ...); records
/// created at runtime get a time-ordered UUIDv7, so ids sort by creation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
  pub fn new(id: impl Into<String>) -> Self { Self(id.into()) }

  /// A fresh, unique id for a newly added record.
  pub fn generate() -> Self { Self(Uuid::now_v7().to_string()) }

  pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for RecordId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl From<&str> for RecordId {
  fn from(s: &str) -> Self { Self(s.to_owned()) }
}

impl From<String> for RecordId {
  fn from(s: String) -> Self { Self(s) }
}
