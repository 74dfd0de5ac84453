//! Core types and logic for the academic records store.
//!
//! This crate is free of HTTP and database dependencies. It owns the entity
//! types, the result aggregator, the student lookup, and [`RecordStore`],
//! which persists through any [`Storage`] backend.

pub mod aggregate;
pub mod department;
pub mod error;
pub mod grade;
pub mod id;
pub mod lookup;
pub mod result;
pub mod seed;
pub mod storage;
pub mod store;
pub mod student;
pub mod subject;

pub use error::{Error, Result, ValidationError};
pub use id::RecordId;
pub use storage::{MemoryStorage, Storage};
pub use store::RecordStore;

#[cfg(test)]
mod tests;
