//! Per-semester results.
//!
//! A [`SemesterResult`] is a snapshot: `roll_number` and each entry's
//! `subject_name`/`full_marks` are copied from the Student and Subject at
//! creation time and are never re-synced when those records change. The
//! student lookup reconciles `full_marks` (and `total_full_marks`) against the
//! live catalog at read time; grades, `percentage` and `cgpa` stay as stored.

use serde::{Deserialize, Serialize};

use crate::{RecordId, grade::Grade};

/// One subject's marks inside a result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectEntry {
  pub subject_id:   RecordId,
  pub subject_name: String,
  /// Blank while a draft is being filled in.
  pub marks:        Option<f64>,
  pub full_marks:   u32,
  pub grade:        Option<Grade>,
}

/// Aggregates derived from a result's subject entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
  /// Always serialised as a float, so whole totals are written as `255.0`.
  pub total_marks:      f64,
  pub total_full_marks: u64,
  /// Rounded to two decimals.
  pub percentage:       f64,
  /// `percentage / 10`, rounded to two decimals.
  pub cgpa:             f64,
}

/// One student's results for one semester.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SemesterResult {
  pub id:          RecordId,
  pub student_id:  RecordId,
  /// Copied from the student when the result was created.
  pub roll_number: String,
  pub semester:    String,
  pub subjects:    Vec<SubjectEntry>,
  #[serde(flatten)]
  pub totals:      Totals,
}

/// Input to [`crate::RecordStore::add_result`].
///
/// Grades and totals are derived by the store; any grades supplied in
/// `subjects` are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewResult {
  pub student_id: Option<RecordId>,
  #[serde(default)]
  pub semester:   String,
  #[serde(default)]
  pub subjects:   Vec<SubjectEntry>,
}

/// Update for an existing [`SemesterResult`].
///
/// The student and semester are fixed once a result exists, so only the
/// subject entries can be replaced.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultPatch {
  pub subjects: Option<Vec<SubjectEntry>>,
}

impl SemesterResult {
  pub(crate) fn matches(&self, needle: &str) -> bool {
    self.roll_number.to_lowercase().contains(needle)
      || self.semester.to_lowercase().contains(needle)
  }
}
