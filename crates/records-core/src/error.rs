//! Error types for `records-core`.

use thiserror::Error;

use crate::RecordId;

/// A rejected input. Nothing is mutated when one of these is returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
  #[error("{0} is required")]
  MissingField(&'static str),

  #[error("marks for {subject} must be a number")]
  InvalidMarks { subject: String, raw: String },

  #[error("marks for {subject} must be between 0 and {full_marks}")]
  MarksOutOfRange {
    subject:    String,
    marks:      f64,
    full_marks: u32,
  },

  #[error("marks for {0} have not been entered")]
  MissingMarks(String),

  #[error("student not found: {0}")]
  UnknownStudent(RecordId),

  #[error("subject not found: {0}")]
  UnknownSubject(RecordId),

  #[error("no subject entry with id {0} in this result")]
  UnknownEntry(RecordId),

  #[error("{0} cannot be changed once a result exists")]
  Locked(&'static str),
}

#[derive(Debug, Error)]
pub enum Error {
  #[error("validation error: {0}")]
  Validation(#[from] ValidationError),

  #[error("persistence error: {0}")]
  Persistence(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

impl Error {
  pub(crate) fn persistence<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Persistence(Box::new(e))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
