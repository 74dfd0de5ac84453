//! The subject catalog.

use serde::{Deserialize, Serialize};

use crate::{RecordId, ValidationError, store::require};

/// Full marks used when a subject does not specify (or zeroes) its own.
pub const DEFAULT_FULL_MARKS: u32 = 100;

/// A subject offered by the institution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
  pub id:         RecordId,
  pub name:       String,
  pub code:       String,
  pub credits:    u32,
  /// The grading denominator for this subject.
  pub full_marks: u32,
}

/// Input to [`crate::RecordStore::add_subject`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSubject {
  #[serde(default)]
  pub name:       String,
  #[serde(default)]
  pub code:       String,
  pub credits:    Option<u32>,
  /// Absent or zero means [`DEFAULT_FULL_MARKS`].
  pub full_marks: Option<u32>,
}

/// Field-by-field update for a [`Subject`].
///
/// An absent or zero `full_marks` keeps the stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectPatch {
  pub name:       Option<String>,
  pub code:       Option<String>,
  pub credits:    Option<u32>,
  pub full_marks: Option<u32>,
}

impl Subject {
  pub(crate) fn create(input: NewSubject) -> Result<Self, ValidationError> {
    let credits = input.credits.ok_or(ValidationError::MissingField("credits"))?;
    Ok(Self {
      id: RecordId::generate(),
      name: input.name,
      code: input.code,
      credits,
      full_marks: positive(input.full_marks).unwrap_or(DEFAULT_FULL_MARKS),
    })
  }

  pub(crate) fn merge(&mut self, patch: SubjectPatch) {
    if let Some(name) = patch.name {
      self.name = name;
    }
    if let Some(code) = patch.code {
      self.code = code;
    }
    if let Some(credits) = patch.credits {
      self.credits = credits;
    }
    self.full_marks = positive(patch.full_marks)
      .or(positive(Some(self.full_marks)))
      .unwrap_or(DEFAULT_FULL_MARKS);
  }

  pub(crate) fn validate(&self) -> Result<(), ValidationError> {
    require("name", &self.name)?;
    require("code", &self.code)
  }

  pub(crate) fn matches(&self, needle: &str) -> bool {
    self.name.to_lowercase().contains(needle)
      || self.code.to_lowercase().contains(needle)
  }
}

fn positive(marks: Option<u32>) -> Option<u32> { marks.filter(|m| *m > 0) }
