//! [`RecordStore`] — the repository owning the four collections.
//!
//! Every mutation builds the next snapshot of one collection, writes the
//! whole snapshot to [`Storage`], and only then swaps it in. A failed write
//! therefore leaves the in-memory collection untouched.

use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, info, warn};

use crate::{
  Error, RecordId, Result, ValidationError,
  aggregate::{carry_marks, finalize_entries, resolve_entries},
  department::{Department, DepartmentPatch, NewDepartment},
  lookup::{self, Credentials, ResultView},
  result::{NewResult, ResultPatch, SemesterResult},
  seed,
  storage::{Storage, keys},
  student::{NewStudent, Student, StudentPatch},
  subject::{NewSubject, Subject, SubjectPatch},
};

// ─── Record trait ────────────────────────────────────────────────────────────

/// A collection element: serialisable, identified, and stored under a key.
trait Record: Clone + Serialize + DeserializeOwned {
  const KEY: &'static str;

  fn id(&self) -> &RecordId;
}

impl Record for Student {
  const KEY: &'static str = keys::STUDENTS;

  fn id(&self) -> &RecordId { &self.id }
}

impl Record for Subject {
  const KEY: &'static str = keys::SUBJECTS;

  fn id(&self) -> &RecordId { &self.id }
}

impl Record for Department {
  const KEY: &'static str = keys::DEPARTMENTS;

  fn id(&self) -> &RecordId { &self.id }
}

impl Record for SemesterResult {
  const KEY: &'static str = keys::RESULTS;

  fn id(&self) -> &RecordId { &self.id }
}

// ─── Overview ────────────────────────────────────────────────────────────────

/// Collection sizes, for the admin dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Overview {
  pub students:    usize,
  pub subjects:    usize,
  pub departments: usize,
  pub results:     usize,
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// Owns the students, subjects, departments and results collections and
/// mirrors each one to a [`Storage`] backend.
///
/// Lists are in insertion order, oldest first. Business keys (roll numbers,
/// codes) are not checked for uniqueness, and deletes never cascade.
#[derive(Debug)]
pub struct RecordStore<S> {
  storage:     S,
  students:    Vec<Student>,
  subjects:    Vec<Subject>,
  departments: Vec<Department>,
  results:     Vec<SemesterResult>,
}

impl<S: Storage> RecordStore<S> {
  /// Load all collections from `storage`, seeding any that are absent or
  /// empty.
  pub fn open(mut storage: S) -> Result<Self> {
    let students = load_or_seed(&mut storage, seed::students)?;
    let subjects = load_or_seed(&mut storage, seed::subjects)?;
    let departments = load_or_seed(&mut storage, seed::departments)?;
    let results = load_or_seed(&mut storage, seed::results)?;

    Ok(Self { storage, students, subjects, departments, results })
  }

  pub fn storage(&self) -> &S { &self.storage }

  pub fn into_storage(self) -> S { self.storage }

  pub fn overview(&self) -> Overview {
    Overview {
      students:    self.students.len(),
      subjects:    self.subjects.len(),
      departments: self.departments.len(),
      results:     self.results.len(),
    }
  }

  // ── Students ──────────────────────────────────────────────────────────────

  pub fn students(&self) -> &[Student] { &self.students }

  pub fn student(&self, id: &RecordId) -> Option<&Student> { find(&self.students, id) }

  /// Students whose name or roll number contains `term` (case-insensitive).
  pub fn search_students(&self, term: &str) -> Vec<&Student> {
    search(&self.students, term, Student::matches)
  }

  pub fn add_student(&mut self, input: NewStudent) -> Result<Student> {
    let student = Student::create(input)?;
    student.validate()?;
    insert(&mut self.storage, &mut self.students, student)
  }

  /// Merge `patch` into the student with `id`. Unknown ids are a no-op and
  /// return `Ok(None)`.
  pub fn update_student(
    &mut self,
    id: &RecordId,
    patch: StudentPatch,
  ) -> Result<Option<Student>> {
    replace(&mut self.storage, &mut self.students, id, |s| {
      s.merge(patch);
      s.validate()
    })
  }

  /// Remove the student with `id`. Their results are kept.
  pub fn delete_student(&mut self, id: &RecordId) -> Result<bool> {
    let dangling = self.results.iter().filter(|r| &r.student_id == id).count();
    let removed = remove(&mut self.storage, &mut self.students, id)?;
    if removed && dangling > 0 {
      warn!(student_id = %id, results = dangling, "deleted student still referenced by results");
    }
    Ok(removed)
  }

  // ── Subjects ──────────────────────────────────────────────────────────────

  pub fn subjects(&self) -> &[Subject] { &self.subjects }

  pub fn subject(&self, id: &RecordId) -> Option<&Subject> { find(&self.subjects, id) }

  /// Subjects whose name or code contains `term` (case-insensitive).
  pub fn search_subjects(&self, term: &str) -> Vec<&Subject> {
    search(&self.subjects, term, Subject::matches)
  }

  pub fn add_subject(&mut self, input: NewSubject) -> Result<Subject> {
    let subject = Subject::create(input)?;
    subject.validate()?;
    insert(&mut self.storage, &mut self.subjects, subject)
  }

  pub fn update_subject(
    &mut self,
    id: &RecordId,
    patch: SubjectPatch,
  ) -> Result<Option<Subject>> {
    replace(&mut self.storage, &mut self.subjects, id, |s| {
      s.merge(patch);
      s.validate()
    })
  }

  /// Remove the subject with `id`. Results keep their copied entries.
  pub fn delete_subject(&mut self, id: &RecordId) -> Result<bool> {
    let dangling = self
      .results
      .iter()
      .filter(|r| r.subjects.iter().any(|e| &e.subject_id == id))
      .count();
    let removed = remove(&mut self.storage, &mut self.subjects, id)?;
    if removed && dangling > 0 {
      warn!(subject_id = %id, results = dangling, "deleted subject still referenced by results");
    }
    Ok(removed)
  }

  // ── Departments ───────────────────────────────────────────────────────────

  pub fn departments(&self) -> &[Department] { &self.departments }

  pub fn department(&self, id: &RecordId) -> Option<&Department> {
    find(&self.departments, id)
  }

  /// Departments whose name or code contains `term` (case-insensitive).
  pub fn search_departments(&self, term: &str) -> Vec<&Department> {
    search(&self.departments, term, Department::matches)
  }

  pub fn add_department(&mut self, input: NewDepartment) -> Result<Department> {
    let department = Department::create(input);
    department.validate()?;
    insert(&mut self.storage, &mut self.departments, department)
  }

  pub fn update_department(
    &mut self,
    id: &RecordId,
    patch: DepartmentPatch,
  ) -> Result<Option<Department>> {
    replace(&mut self.storage, &mut self.departments, id, |d| {
      d.merge(patch);
      d.validate()
    })
  }

  /// Remove the department with `id`. Students name their department, so
  /// those pointing at it are left as they are.
  pub fn delete_department(&mut self, id: &RecordId) -> Result<bool> {
    let dangling = find(&self.departments, id)
      .map(|d| self.students.iter().filter(|s| s.department == d.name).count())
      .unwrap_or(0);
    let removed = remove(&mut self.storage, &mut self.departments, id)?;
    if removed && dangling > 0 {
      warn!(department_id = %id, students = dangling, "deleted department still named by students");
    }
    Ok(removed)
  }

  // ── Results ───────────────────────────────────────────────────────────────

  pub fn results(&self) -> &[SemesterResult] { &self.results }

  pub fn result(&self, id: &RecordId) -> Option<&SemesterResult> { find(&self.results, id) }

  /// Results whose roll number or semester contains `term`
  /// (case-insensitive).
  pub fn search_results(&self, term: &str) -> Vec<&SemesterResult> {
    search(&self.results, term, SemesterResult::matches)
  }

  /// Grade and total `input`, copy the student's roll number, and persist.
  ///
  /// Each entry's subject name and full marks are taken from the catalog, and
  /// every entry must carry marks within those full marks.
  pub fn add_result(&mut self, input: NewResult) -> Result<SemesterResult> {
    let student_id = input
      .student_id
      .ok_or(ValidationError::MissingField("student"))?;
    if input.semester.trim().is_empty() {
      return Err(ValidationError::MissingField("semester").into());
    }
    let student = find(&self.students, &student_id)
      .ok_or_else(|| ValidationError::UnknownStudent(student_id.clone()))?;
    let entries = resolve_entries(input.subjects, &self.subjects)?;
    let (subjects, totals) = finalize_entries(entries)?;

    let result = SemesterResult {
      id: RecordId::generate(),
      roll_number: student.roll_number.clone(),
      student_id,
      semester: input.semester,
      subjects,
      totals,
    };
    insert(&mut self.storage, &mut self.results, result)
  }

  /// Replace the marks of the result with `id`, regrading them.
  ///
  /// Entries are matched to the stored ones by subject id; the stored names
  /// and full marks are kept.
  pub fn update_result(
    &mut self,
    id: &RecordId,
    patch: ResultPatch,
  ) -> Result<Option<SemesterResult>> {
    replace(&mut self.storage, &mut self.results, id, |r| {
      if let Some(patched) = patch.subjects {
        let entries = carry_marks(&r.subjects, &patched)?;
        let (subjects, totals) = finalize_entries(entries)?;
        r.subjects = subjects;
        r.totals = totals;
      }
      Ok(())
    })
  }

  pub fn delete_result(&mut self, id: &RecordId) -> Result<bool> {
    remove(&mut self.storage, &mut self.results, id)
  }

  // ── Lookup ────────────────────────────────────────────────────────────────

  /// The result for the student identified by `credentials`.
  ///
  /// With `semester` only that semester's result matches; without it, the
  /// student's first result in insertion order is returned.
  pub fn student_result(
    &self,
    credentials: &Credentials,
    semester: Option<&str>,
  ) -> Option<ResultView> {
    lookup::find_result(
      &self.students,
      &self.results,
      &self.subjects,
      credentials,
      semester,
    )
  }
}

// ─── Collection helpers ──────────────────────────────────────────────────────

pub(crate) fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
  if value.trim().is_empty() {
    return Err(ValidationError::MissingField(field));
  }
  Ok(())
}

fn find<'a, T: Record>(collection: &'a [T], id: &RecordId) -> Option<&'a T> {
  collection.iter().find(|r| r.id() == id)
}

fn search<'a, T>(
  collection: &'a [T],
  term: &str,
  matches: impl Fn(&T, &str) -> bool,
) -> Vec<&'a T> {
  let needle = term.trim().to_lowercase();
  collection.iter().filter(|r| matches(r, &needle)).collect()
}

fn load_or_seed<S: Storage, T: Record>(
  storage: &mut S,
  seed: fn() -> Vec<T>,
) -> Result<Vec<T>> {
  if let Some(json) = storage.get(T::KEY).map_err(Error::persistence)? {
    let records: Vec<T> = serde_json::from_str(&json)?;
    if !records.is_empty() {
      debug!(key = T::KEY, count = records.len(), "loaded collection");
      return Ok(records);
    }
  }

  let records = seed();
  write(storage, &records)?;
  info!(key = T::KEY, count = records.len(), "seeded collection");
  Ok(records)
}

fn write<S: Storage, T: Record>(storage: &mut S, records: &[T]) -> Result<()> {
  let json = serde_json::to_string(records)?;
  storage.set(T::KEY, &json).map_err(Error::persistence)
}

/// Persist `next`, then make it the current collection.
fn commit<S: Storage, T: Record>(
  storage: &mut S,
  current: &mut Vec<T>,
  next: Vec<T>,
) -> Result<()> {
  write(storage, &next)?;
  *current = next;
  Ok(())
}

fn insert<S: Storage, T: Record>(
  storage: &mut S,
  collection: &mut Vec<T>,
  record: T,
) -> Result<T> {
  let mut next = collection.clone();
  next.push(record.clone());
  commit(storage, collection, next)?;
  debug!(key = T::KEY, id = %record.id(), "added record");
  Ok(record)
}

fn replace<S: Storage, T: Record>(
  storage: &mut S,
  collection: &mut Vec<T>,
  id: &RecordId,
  apply: impl FnOnce(&mut T) -> Result<(), ValidationError>,
) -> Result<Option<T>> {
  let Some(pos) = collection.iter().position(|r| r.id() == id) else {
    debug!(key = T::KEY, %id, "update of unknown id ignored");
    return Ok(None);
  };

  let mut next = collection.clone();
  apply(&mut next[pos])?;
  let updated = next[pos].clone();
  commit(storage, collection, next)?;
  debug!(key = T::KEY, %id, "updated record");
  Ok(Some(updated))
}

fn remove<S: Storage, T: Record>(
  storage: &mut S,
  collection: &mut Vec<T>,
  id: &RecordId,
) -> Result<bool> {
  if find(collection, id).is_none() {
    debug!(key = T::KEY, %id, "delete of unknown id ignored");
    return Ok(false);
  }

  let next = collection.iter().filter(|r| r.id() != id).cloned().collect();
  commit(storage, collection, next)?;
  debug!(key = T::KEY, %id, "deleted record");
  Ok(true)
}
