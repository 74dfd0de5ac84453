//! [`SqliteStorage`] — the SQLite implementation of [`Storage`].

use std::path::Path;

use chrono::{DateTime, Utc};
use records_core::Storage;
use rusqlite::OptionalExtension as _;
use tracing::debug;

use crate::{Result, schema::SCHEMA};

/// A records key-value store backed by a single SQLite file.
pub struct SqliteStorage {
  conn: rusqlite::Connection,
}

impl SqliteStorage {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = rusqlite::Connection::open(path)?;
    Self::init(conn)
  }

  /// Open an in-memory store — useful for testing.
  pub fn open_in_memory() -> Result<Self> {
    let conn = rusqlite::Connection::open_in_memory()?;
    Self::init(conn)
  }

  fn init(conn: rusqlite::Connection) -> Result<Self> {
    conn.execute_batch(SCHEMA)?;
    Ok(Self { conn })
  }

  /// When `key` was last written, if ever.
  pub fn updated_at(&self, key: &str) -> Result<Option<DateTime<Utc>>> {
    let raw: Option<String> = self
      .conn
      .query_row(
        "SELECT updated_at FROM kv WHERE key = ?1",
        rusqlite::params![key],
        |row| row.get(0),
      )
      .optional()?;

    Ok(raw.and_then(|s| decode_dt(&s)))
  }
}

impl Storage for SqliteStorage {
  type Error = crate::Error;

  fn get(&self, key: &str) -> Result<Option<String>> {
    Ok(
      self
        .conn
        .query_row(
          "SELECT value FROM kv WHERE key = ?1",
          rusqlite::params![key],
          |row| row.get(0),
        )
        .optional()?,
    )
  }

  fn set(&mut self, key: &str, value: &str) -> Result<()> {
    let at_str = encode_dt(Utc::now());
    self.conn.execute(
      "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
       ON CONFLICT(key) DO UPDATE SET
         value      = excluded.value,
         updated_at = excluded.updated_at",
      rusqlite::params![key, value, at_str],
    )?;
    debug!(key, bytes = value.len(), "wrote kv entry");
    Ok(())
  }
}

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

fn decode_dt(s: &str) -> Option<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .ok()
}
