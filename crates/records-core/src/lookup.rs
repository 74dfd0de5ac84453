//! Student self-service result lookup.

use serde::{Deserialize, Serialize};

use crate::{
  aggregate::sum_full_marks,
  result::{SemesterResult, SubjectEntry},
  student::Student,
  subject::{DEFAULT_FULL_MARKS, Subject},
};

/// What a student supplies to see their own result.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
  pub roll_number:   String,
  /// `YYYY-MM-DD`, compared as an exact string.
  pub date_of_birth: String,
}

impl Credentials {
  pub fn new(roll_number: impl Into<String>, date_of_birth: impl Into<String>) -> Self {
    Self {
      roll_number:   roll_number.into(),
      date_of_birth: date_of_birth.into(),
    }
  }
}

/// A stored result as shown to the student it belongs to.
///
/// Entry `full_marks` and `total_full_marks` reflect the current subject
/// catalog. Grades, `percentage` and `cgpa` are exactly as stored when the
/// result was submitted and may disagree with the reconciled full marks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultView {
  pub student_name: String,
  pub department:   String,
  #[serde(flatten)]
  pub result:       SemesterResult,
}

/// Find the student's result and reconcile it against `catalog`.
///
/// `None` covers both a credential mismatch and a student with no result, so
/// callers cannot tell which part of the credentials was wrong.
pub(crate) fn find_result(
  students: &[Student],
  results: &[SemesterResult],
  catalog: &[Subject],
  credentials: &Credentials,
  semester: Option<&str>,
) -> Option<ResultView> {
  let student = students
    .iter()
    .find(|s| s.has_credentials(&credentials.roll_number, &credentials.date_of_birth))?;

  let result = results.iter().find(|r| {
    r.roll_number == student.roll_number
      && semester.is_none_or(|sem| r.semester == sem)
  })?;

  Some(ResultView {
    student_name: student.name.clone(),
    department:   student.department.clone(),
    result:       reconcile(result, catalog),
  })
}

/// Re-resolve each entry's full marks from the catalog and re-sum them.
pub fn reconcile(result: &SemesterResult, catalog: &[Subject]) -> SemesterResult {
  let subjects: Vec<SubjectEntry> = result
    .subjects
    .iter()
    .map(|entry| SubjectEntry {
      full_marks: catalog_full_marks(entry, catalog),
      ..entry.clone()
    })
    .collect();

  let mut reconciled = result.clone();
  reconciled.totals.total_full_marks = sum_full_marks(&subjects);
  reconciled.subjects = subjects;
  reconciled
}

/// First catalog subject matching by id or by name; 100 if none does.
fn catalog_full_marks(entry: &SubjectEntry, catalog: &[Subject]) -> u32 {
  catalog
    .iter()
    .find(|s| s.id == entry.subject_id || s.name == entry.subject_name)
    .map(|s| s.full_marks)
    .unwrap_or(DEFAULT_FULL_MARKS)
}
