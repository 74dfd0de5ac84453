//! The key-value persistence seam.
//!
//! [`crate::RecordStore`] writes each collection as one JSON array under a
//! fixed key and always overwrites the whole value. Backends only need to get
//! and set strings.

use std::collections::HashMap;

use thiserror::Error;

/// Storage key for each collection.
pub mod keys {
  pub const STUDENTS: &str = "students";
  pub const SUBJECTS: &str = "subjects";
  pub const DEPARTMENTS: &str = "departments";
  pub const RESULTS: &str = "results";
}

/// A string key-value store backing a [`crate::RecordStore`].
///
/// Implemented by `records-store-sqlite` and by [`MemoryStorage`].
pub trait Storage {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Read the value for `key`, or `None` if it was never written.
  fn get(&self, key: &str) -> Result<Option<String>, Self::Error>;

  /// Replace the value for `key`.
  fn set(&mut self, key: &str, value: &str) -> Result<(), Self::Error>;
}

// ─── In-memory backend ───────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum MemoryStorageError {
  #[error("storage quota exceeded writing {key:?}: {needed} bytes needed, quota is {quota}")]
  QuotaExceeded {
    key:    String,
    needed: usize,
    quota:  usize,
  },
}

/// A `HashMap`-backed store, optionally capped at a total byte size.
///
/// The cap models a browser-style storage quota: a write that would push the
/// sum of all values past it fails and leaves the old value in place.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
  entries: HashMap<String, String>,
  quota:   Option<usize>,
}

impl MemoryStorage {
  pub fn new() -> Self { Self::default() }

  /// A store that rejects writes once values exceed `quota` bytes in total.
  pub fn with_quota(quota: usize) -> Self {
    Self { entries: HashMap::new(), quota: Some(quota) }
  }

  pub fn set_quota(&mut self, quota: Option<usize>) { self.quota = quota; }

  fn used_without(&self, key: &str) -> usize {
    self
      .entries
      .iter()
      .filter(|(k, _)| k.as_str() != key)
      .map(|(_, v)| v.len())
      .sum()
  }
}

impl Storage for MemoryStorage {
  type Error = MemoryStorageError;

  fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
    Ok(self.entries.get(key).cloned())
  }

  fn set(&mut self, key: &str, value: &str) -> Result<(), Self::Error> {
    if let Some(quota) = self.quota {
      let needed = self.used_without(key) + value.len();
      if needed > quota {
        return Err(MemoryStorageError::QuotaExceeded {
          key: key.to_owned(),
          needed,
          quota,
        });
      }
    }
    self.entries.insert(key.to_owned(), value.to_owned());
    Ok(())
  }
}
