//! Result aggregation: marks validation, totals, and the result-entry draft.

use serde::Serialize;

use crate::{
  RecordId, ValidationError,
  grade::compute_grade,
  result::{NewResult, ResultPatch, SemesterResult, SubjectEntry, Totals},
  student::Student,
  subject::Subject,
};

/// Round half away from zero to two decimal places.
pub fn round2(x: f64) -> f64 { (x * 100.0).round() / 100.0 }

/// Check that `marks` lies in `[0, entry.full_marks]`.
pub fn check_marks(entry: &SubjectEntry, marks: f64) -> Result<(), ValidationError> {
  if !marks.is_finite() || marks < 0.0 || marks > f64::from(entry.full_marks) {
    return Err(ValidationError::MarksOutOfRange {
      subject:    entry.subject_name.clone(),
      marks,
      full_marks: entry.full_marks,
    });
  }
  Ok(())
}

/// Parse raw form input for `entry`. Blank input means "no marks yet".
pub fn parse_marks(
  entry: &SubjectEntry,
  raw: &str,
) -> Result<Option<f64>, ValidationError> {
  let raw = raw.trim();
  if raw.is_empty() {
    return Ok(None);
  }
  let marks: f64 = raw.parse().map_err(|_| ValidationError::InvalidMarks {
    subject: entry.subject_name.clone(),
    raw:     raw.to_owned(),
  })?;
  check_marks(entry, marks)?;
  Ok(Some(marks))
}

/// Derive totals from `entries`. Blank marks count as zero.
pub fn recompute_totals(entries: &[SubjectEntry]) -> Totals {
  if entries.is_empty() {
    return Totals::default();
  }

  let total_marks: f64 = entries.iter().map(|e| e.marks.unwrap_or(0.0)).sum();
  let total_full_marks = sum_full_marks(entries);

  let percentage = if total_full_marks > 0 {
    total_marks * 100.0 / total_full_marks as f64
  } else {
    0.0
  };
  let cgpa = if percentage > 0.0 { round2(percentage / 10.0) } else { 0.0 };

  Totals {
    total_marks,
    total_full_marks,
    percentage: round2(percentage),
    cgpa,
  }
}

/// Sum of the entries' full marks, widened so large catalogs cannot overflow.
pub fn sum_full_marks(entries: &[SubjectEntry]) -> u64 {
  entries.iter().map(|e| u64::from(e.full_marks)).sum()
}

/// One blank entry per catalog subject, for starting a new result.
pub fn build_result_draft(catalog: &[Subject]) -> Vec<SubjectEntry> {
  catalog
    .iter()
    .map(|s| SubjectEntry {
      subject_id:   s.id.clone(),
      subject_name: s.name.clone(),
      marks:        None,
      full_marks:   s.full_marks,
      grade:        None,
    })
    .collect()
}

/// Replace each entry's name and full marks with the catalog's current ones.
///
/// Marks are only ever checked against the catalog maximum, never against a
/// maximum supplied alongside them.
pub(crate) fn resolve_entries(
  entries: Vec<SubjectEntry>,
  catalog: &[Subject],
) -> Result<Vec<SubjectEntry>, ValidationError> {
  entries
    .into_iter()
    .map(|entry| {
      let subject = catalog
        .iter()
        .find(|s| s.id == entry.subject_id)
        .ok_or_else(|| ValidationError::UnknownSubject(entry.subject_id.clone()))?;
      Ok(SubjectEntry {
        subject_name: subject.name.clone(),
        full_marks: subject.full_marks,
        grade: None,
        ..entry
      })
    })
    .collect()
}

/// Carry `patched` marks onto the `stored` entries of an existing result.
///
/// The stored subject names and full marks are kept. A patched entry for a
/// subject the result does not contain is rejected; a stored entry left out
/// of the patch ends up without marks.
pub(crate) fn carry_marks(
  stored: &[SubjectEntry],
  patched: &[SubjectEntry],
) -> Result<Vec<SubjectEntry>, ValidationError> {
  if let Some(stray) = patched
    .iter()
    .find(|p| !stored.iter().any(|s| s.subject_id == p.subject_id))
  {
    return Err(ValidationError::UnknownEntry(stray.subject_id.clone()));
  }

  Ok(
    stored
      .iter()
      .map(|entry| SubjectEntry {
        marks: patched
          .iter()
          .find(|p| p.subject_id == entry.subject_id)
          .and_then(|p| p.marks),
        grade: None,
        ..entry.clone()
      })
      .collect(),
  )
}

/// Require marks on every entry, grade each one, and compute totals.
///
/// This is the submission precondition the store enforces on every result
/// write.
pub(crate) fn finalize_entries(
  mut entries: Vec<SubjectEntry>,
) -> Result<(Vec<SubjectEntry>, Totals), ValidationError> {
  for entry in &mut entries {
    let marks = entry
      .marks
      .ok_or_else(|| ValidationError::MissingMarks(entry.subject_name.clone()))?;
    check_marks(entry, marks)?;
    entry.grade = Some(compute_grade(marks, entry.full_marks));
  }
  let totals = recompute_totals(&entries);
  Ok((entries, totals))
}

// ─── Draft ───────────────────────────────────────────────────────────────────

/// What a successful [`ResultDraft::submit`] asks the store to do.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
  Create(NewResult),
  Update(RecordId, ResultPatch),
}

/// The state of the result-entry form.
///
/// Totals are kept current after every change. When editing an existing
/// result the stored entries are reused as-is (not regenerated from the
/// catalog), and the student and semester are locked.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultDraft {
  editing:     Option<RecordId>,
  student_id:  Option<RecordId>,
  roll_number: String,
  semester:    String,
  subjects:    Vec<SubjectEntry>,
  #[serde(flatten)]
  totals:      Totals,
}

impl ResultDraft {
  /// Start a new result with one blank entry per catalog subject.
  pub fn new(catalog: &[Subject]) -> Self {
    let subjects = build_result_draft(catalog);
    Self {
      editing: None,
      student_id: None,
      roll_number: String::new(),
      semester: String::new(),
      totals: recompute_totals(&subjects),
      subjects,
    }
  }

  /// Open an existing result for editing.
  pub fn edit(result: &SemesterResult) -> Self {
    Self {
      editing:     Some(result.id.clone()),
      student_id:  Some(result.student_id.clone()),
      roll_number: result.roll_number.clone(),
      semester:    result.semester.clone(),
      subjects:    result.subjects.clone(),
      totals:      recompute_totals(&result.subjects),
    }
  }

  pub fn is_editing(&self) -> bool { self.editing.is_some() }

  pub fn student_id(&self) -> Option<&RecordId> { self.student_id.as_ref() }

  pub fn roll_number(&self) -> &str { &self.roll_number }

  pub fn semester(&self) -> &str { &self.semester }

  pub fn subjects(&self) -> &[SubjectEntry] { &self.subjects }

  pub fn totals(&self) -> Totals { self.totals }

  /// Choose (or with `None`, clear) the student this result belongs to.
  pub fn select_student(
    &mut self,
    student: Option<&Student>,
  ) -> Result<(), ValidationError> {
    if self.is_editing() {
      return Err(ValidationError::Locked("student"));
    }
    self.student_id = student.map(|s| s.id.clone());
    self.roll_number = student.map(|s| s.roll_number.clone()).unwrap_or_default();
    Ok(())
  }

  pub fn set_semester(
    &mut self,
    semester: impl Into<String>,
  ) -> Result<(), ValidationError> {
    if self.is_editing() {
      return Err(ValidationError::Locked("semester"));
    }
    self.semester = semester.into();
    Ok(())
  }

  /// Enter raw marks for one subject.
  ///
  /// Invalid input clears the entry's marks and grade and is reported back.
  pub fn set_marks(
    &mut self,
    subject_id: &RecordId,
    raw: &str,
  ) -> Result<(), ValidationError> {
    let entry = self
      .subjects
      .iter_mut()
      .find(|e| &e.subject_id == subject_id)
      .ok_or_else(|| ValidationError::UnknownEntry(subject_id.clone()))?;

    let outcome = parse_marks(entry, raw);
    match &outcome {
      Ok(Some(marks)) => {
        entry.marks = Some(*marks);
        entry.grade = Some(compute_grade(*marks, entry.full_marks));
      }
      Ok(None) | Err(_) => {
        entry.marks = None;
        entry.grade = None;
      }
    }
    self.totals = recompute_totals(&self.subjects);
    outcome.map(|_| ())
  }

  /// Validate the draft and turn it into a store operation.
  ///
  /// On failure nothing is produced and any entry whose marks are out of
  /// range is reset to blank.
  pub fn submit(&mut self) -> Result<Submission, ValidationError> {
    if self.student_id.is_none() {
      return Err(ValidationError::MissingField("student"));
    }
    if self.semester.trim().is_empty() {
      return Err(ValidationError::MissingField("semester"));
    }

    let mut first_error = None;
    for entry in &mut self.subjects {
      let error = match entry.marks {
        None => Some(ValidationError::MissingMarks(entry.subject_name.clone())),
        Some(marks) => check_marks(entry, marks).err(),
      };
      if let Some(error) = error {
        entry.marks = None;
        entry.grade = None;
        first_error.get_or_insert(error);
      }
    }
    if let Some(error) = first_error {
      self.totals = recompute_totals(&self.subjects);
      return Err(error);
    }

    let subjects = self.subjects.clone();
    Ok(match &self.editing {
      Some(id) => Submission::Update(id.clone(), ResultPatch { subjects: Some(subjects) }),
      None => Submission::Create(NewResult {
        student_id: self.student_id.clone(),
        semester: self.semester.clone(),
        subjects,
      }),
    })
  }
}
