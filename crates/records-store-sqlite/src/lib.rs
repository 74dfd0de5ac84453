//! SQLite backend for the academic records store.
//!
//! Implements [`records_core::Storage`] over a single key-value table, so a
//! [`records_core::RecordStore`] can persist its collections to a file.

mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteStorage;
