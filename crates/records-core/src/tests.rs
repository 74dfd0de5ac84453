//! Store-level tests for `RecordStore` over `MemoryStorage`.

use chrono::NaiveDate;

use crate::{
  Error, MemoryStorage, RecordId, RecordStore, Storage, ValidationError,
  aggregate::{ResultDraft, Submission},
  department::{DepartmentPatch, NewDepartment},
  grade::Grade,
  lookup::Credentials,
  result::{NewResult, ResultPatch},
  storage::keys,
  student::{NewStudent, Student, StudentPatch},
  subject::{NewSubject, SubjectPatch},
};

fn store() -> RecordStore<MemoryStorage> {
  RecordStore::open(MemoryStorage::new()).expect("in-memory store")
}

fn new_student(roll: &str) -> NewStudent {
  NewStudent {
    roll_number:   roll.into(),
    name:          "Grace Hopper".into(),
    email:         "grace@example.com".into(),
    department:    "Computer Science".into(),
    date_of_birth: NaiveDate::from_ymd_opt(2001, 12, 9),
    phone:         None,
  }
}

fn stored<T: serde::de::DeserializeOwned>(s: &RecordStore<MemoryStorage>, key: &str) -> Vec<T> {
  let json = s.storage().get(key).unwrap().expect("key written");
  serde_json::from_str(&json).unwrap()
}

// ─── Seeding ─────────────────────────────────────────────────────────────────

#[test]
fn empty_storage_is_seeded_and_persisted() {
  let s = store();
  assert_eq!(s.students().len(), 2);
  assert_eq!(s.subjects().len(), 3);
  assert_eq!(s.departments().len(), 3);
  assert_eq!(s.results().len(), 2);

  let persisted: Vec<Student> = stored(&s, keys::STUDENTS);
  assert_eq!(persisted, s.students());
}

#[test]
fn existing_data_is_not_reseeded() {
  let mut storage = MemoryStorage::new();
  storage
    .set(
      keys::DEPARTMENTS,
      r#"[{"id":"d1","name":"Mathematics","code":"MA"}]"#,
    )
    .unwrap();

  let s = RecordStore::open(storage).unwrap();
  assert_eq!(s.departments().len(), 1);
  assert_eq!(s.departments()[0].code, "MA");
  // Other collections were absent and got their defaults.
  assert_eq!(s.subjects().len(), 3);
}

#[test]
fn empty_array_is_reseeded() {
  let mut storage = MemoryStorage::new();
  storage.set(keys::RESULTS, "[]").unwrap();
  let s = RecordStore::open(storage).unwrap();
  assert_eq!(s.results().len(), 2);
}

#[test]
fn corrupt_blob_is_a_serialization_error() {
  let mut storage = MemoryStorage::new();
  storage.set(keys::STUDENTS, "{not json").unwrap();
  assert!(matches!(RecordStore::open(storage), Err(Error::Serialization(_))));
}

#[test]
fn reopen_reads_back_mutations() {
  let mut s = store();
  let added = s.add_student(new_student("CS099")).unwrap();
  let reopened = RecordStore::open(s.into_storage()).unwrap();
  assert_eq!(reopened.student(&added.id), Some(&added));
}

// ─── CRUD contracts ──────────────────────────────────────────────────────────

#[test]
fn add_then_list_contains_record_with_new_id() {
  let mut s = store();
  let added = s.add_student(new_student("CS003")).unwrap();

  assert!(!s.students()[..2].iter().any(|st| st.id == added.id));
  let last = s.students().last().unwrap();
  assert_eq!(last, &added);
  assert_eq!(last.roll_number, "CS003");
  assert_eq!(last.date_of_birth, NaiveDate::from_ymd_opt(2001, 12, 9).unwrap());
}

#[test]
fn duplicate_business_keys_are_allowed() {
  let mut s = store();
  let a = s.add_student(new_student("CS001")).unwrap();
  assert_ne!(a.id, RecordId::from("1"));
  assert_eq!(s.students().iter().filter(|st| st.roll_number == "CS001").count(), 2);
}

#[test]
fn add_rejects_missing_fields_without_mutating() {
  let mut s = store();
  let mut input = new_student("CS004");
  input.email = "   ".into();

  let err = s.add_student(input).unwrap_err();
  assert!(matches!(err, Error::Validation(ValidationError::MissingField("email"))));
  assert_eq!(s.students().len(), 2);

  let err = s
    .add_department(NewDepartment { name: "Physics".into(), code: String::new() })
    .unwrap_err();
  assert!(matches!(err, Error::Validation(ValidationError::MissingField("code"))));
}

#[test]
fn update_merges_only_given_fields() {
  let mut s = store();
  let id = RecordId::from("2");
  let before = s.student(&id).unwrap().clone();

  let updated = s
    .update_student(&id, StudentPatch {
      email: Some("jane.smith@example.com".into()),
      ..Default::default()
    })
    .unwrap()
    .unwrap();

  assert_eq!(updated.email, "jane.smith@example.com");
  assert_eq!(updated.name, before.name);
  assert_eq!(updated.roll_number, before.roll_number);
  assert_eq!(updated.phone, before.phone);
  assert_eq!(s.student(&id), Some(&updated));
}

#[test]
fn update_unknown_id_is_silent_noop() {
  let mut s = store();
  let before = s.departments().to_vec();
  let out = s
    .update_department(&"nope".into(), DepartmentPatch {
      name: Some("X".into()),
      ..Default::default()
    })
    .unwrap();
  assert!(out.is_none());
  assert_eq!(s.departments(), before.as_slice());
}

#[test]
fn update_that_blanks_a_required_field_is_rejected() {
  let mut s = store();
  let err = s
    .update_subject(&"1".into(), SubjectPatch {
      name: Some(String::new()),
      ..Default::default()
    })
    .unwrap_err();
  assert!(matches!(err, Error::Validation(ValidationError::MissingField("name"))));
  assert_eq!(s.subject(&"1".into()).unwrap().name, "Mathematics");
}

#[test]
fn delete_removes_and_unknown_delete_is_noop() {
  let mut s = store();
  assert!(s.delete_department(&"2".into()).unwrap());
  assert!(s.department(&"2".into()).is_none());
  assert_eq!(s.departments().len(), 2);

  let before = s.departments().to_vec();
  assert!(!s.delete_department(&"2".into()).unwrap());
  assert_eq!(s.departments(), before.as_slice());
}

#[test]
fn deleting_a_subject_does_not_touch_results() {
  let mut s = store();
  let before = s.results().to_vec();
  assert!(s.delete_subject(&"1".into()).unwrap());
  assert_eq!(s.results(), before.as_slice());
}

#[test]
fn add_subject_defaults_full_marks() {
  let mut s = store();
  let subject = s
    .add_subject(NewSubject {
      name:       "Chemistry".into(),
      code:       "CHEM101".into(),
      credits:    Some(3),
      full_marks: None,
    })
    .unwrap();
  assert_eq!(subject.full_marks, 100);
}

// ─── Search / overview ───────────────────────────────────────────────────────

#[test]
fn search_is_case_insensitive_substring() {
  let s = store();
  let hits: Vec<_> = s.search_students("jane").iter().map(|st| st.id.clone()).collect();
  assert_eq!(hits, vec![RecordId::from("2")]);

  assert_eq!(s.search_students("cs00").len(), 2);
  assert_eq!(s.search_subjects("phy").len(), 1);
  assert_eq!(s.search_departments("engineering").len(), 2);
  assert_eq!(s.search_results("fall").len(), 2);
  assert_eq!(s.search_results("").len(), 2);
}

#[test]
fn overview_counts_collections() {
  let mut s = store();
  s.delete_result(&"1".into()).unwrap();
  let o = s.overview();
  assert_eq!((o.students, o.subjects, o.departments, o.results), (2, 3, 3, 1));
}

// ─── Results ─────────────────────────────────────────────────────────────────

#[test]
fn add_result_grades_totals_and_copies_roll_number() {
  let mut s = store();
  let mut draft = ResultDraft::new(s.subjects());
  draft.select_student(s.student(&"2".into())).unwrap();
  draft.set_semester("Spring 2024").unwrap();
  draft.set_marks(&"1".into(), "95").unwrap();
  draft.set_marks(&"2".into(), "61").unwrap();
  draft.set_marks(&"3".into(), "39").unwrap();

  let Submission::Create(new) = draft.submit().unwrap() else {
    panic!("expected a create submission");
  };
  let result = s.add_result(new).unwrap();

  assert_eq!(result.roll_number, "CS002");
  let grades: Vec<_> = result.subjects.iter().map(|e| e.grade).collect();
  assert_eq!(grades, [Some(Grade::APlus), Some(Grade::B), Some(Grade::F)]);
  assert_eq!(result.totals.total_marks, 195.0);
  assert_eq!(result.totals.total_full_marks, 300);
  assert_eq!(result.totals.percentage, 65.0);
  assert_eq!(result.totals.cgpa, 6.5);
  assert_eq!(s.results().len(), 3);
}

#[test]
fn add_result_rejects_out_of_range_marks() {
  let mut s = store();
  let mut subjects = crate::aggregate::build_result_draft(s.subjects());
  for e in &mut subjects {
    e.marks = Some(50.0);
  }
  subjects[1].marks = Some(101.0);

  let err = s
    .add_result(NewResult {
      student_id: Some("1".into()),
      semester:   "Spring 2024".into(),
      subjects,
    })
    .unwrap_err();
  assert!(matches!(
    err,
    Error::Validation(ValidationError::MarksOutOfRange { full_marks: 100, .. })
  ));
  assert_eq!(s.results().len(), 2);
}

#[test]
fn add_result_requires_known_student_and_semester() {
  let mut s = store();
  let err = s.add_result(NewResult::default()).unwrap_err();
  assert!(matches!(err, Error::Validation(ValidationError::MissingField("student"))));

  let err = s
    .add_result(NewResult {
      student_id: Some("1".into()),
      semester:   " ".into(),
      subjects:   vec![],
    })
    .unwrap_err();
  assert!(matches!(err, Error::Validation(ValidationError::MissingField("semester"))));

  let err = s
    .add_result(NewResult {
      student_id: Some("404".into()),
      semester:   "Fall".into(),
      subjects:   vec![],
    })
    .unwrap_err();
  assert!(matches!(err, Error::Validation(ValidationError::UnknownStudent(_))));
}

#[test]
fn draft_rejection_persists_nothing_and_clears_marks() {
  let mut s = store();
  let mut draft = ResultDraft::new(s.subjects());
  draft.select_student(s.student(&"1".into())).unwrap();
  draft.set_semester("Spring 2024").unwrap();
  draft.set_marks(&"1".into(), "70").unwrap();
  draft.set_marks(&"2".into(), "70").unwrap();

  let err = draft.set_marks(&"3".into(), "101").unwrap_err();
  assert!(matches!(err, ValidationError::MarksOutOfRange { .. }));
  assert_eq!(draft.subjects()[2].marks, None);
  assert!(draft.submit().is_err());
  assert_eq!(s.results().len(), 2);
}

#[test]
fn update_result_regrades_entries() {
  let mut s = store();
  let mut draft = ResultDraft::edit(s.result(&"1".into()).unwrap());
  draft.set_marks(&"2".into(), "59").unwrap();
  let Submission::Update(id, patch) = draft.submit().unwrap() else {
    panic!("expected an update submission");
  };

  let updated = s.update_result(&id, patch).unwrap().unwrap();
  assert_eq!(updated.subjects[1].grade, Some(Grade::CPlus));
  assert_eq!(updated.totals.total_marks, 236.0);
  assert_eq!(updated.totals.percentage, 78.67);
  assert_eq!(updated.semester, "Fall 2023");
}

#[test]
fn empty_result_patch_keeps_entries() {
  let mut s = store();
  let before = s.result(&"2".into()).unwrap().clone();
  let after = s.update_result(&"2".into(), ResultPatch::default()).unwrap().unwrap();
  assert_eq!(after, before);
}

#[test]
fn add_result_checks_marks_against_catalog_full_marks() {
  let mut s = store();
  let mut subjects = crate::aggregate::build_result_draft(s.subjects());
  for e in &mut subjects {
    e.marks = Some(60.0);
  }
  subjects[0].full_marks = 1000;
  subjects[0].marks = Some(950.0);

  let err = s
    .add_result(NewResult {
      student_id: Some("1".into()),
      semester:   "Spring 2024".into(),
      subjects:   subjects.clone(),
    })
    .unwrap_err();
  assert!(matches!(
    err,
    Error::Validation(ValidationError::MarksOutOfRange { full_marks: 100, .. })
  ));
  assert_eq!(s.results().len(), 2);

  subjects[0].marks = Some(80.0);
  subjects[0].subject_name = "Maths (honours)".into();
  let result = s
    .add_result(NewResult {
      student_id: Some("1".into()),
      semester:   "Spring 2024".into(),
      subjects,
    })
    .unwrap();
  assert_eq!(result.subjects[0].subject_name, "Mathematics");
  assert_eq!(result.subjects[0].full_marks, 100);
  assert_eq!(result.subjects[0].grade, Some(Grade::A));
  assert_eq!(result.totals.total_full_marks, 300);
}

#[test]
fn add_result_rejects_unknown_subject() {
  let mut s = store();
  let mut subjects = crate::aggregate::build_result_draft(s.subjects());
  for e in &mut subjects {
    e.marks = Some(60.0);
  }
  subjects[2].subject_id = "404".into();

  let err = s
    .add_result(NewResult {
      student_id: Some("1".into()),
      semester:   "Spring 2024".into(),
      subjects,
    })
    .unwrap_err();
  assert!(matches!(err, Error::Validation(ValidationError::UnknownSubject(_))));
  assert_eq!(s.results().len(), 2);
}

#[test]
fn update_result_keeps_stored_full_marks() {
  let mut s = store();
  let before = s.result(&"1".into()).unwrap().clone();

  let mut inflated = before.subjects.clone();
  inflated[0].full_marks = 1000;
  inflated[0].marks = Some(950.0);
  let err = s
    .update_result(&"1".into(), ResultPatch { subjects: Some(inflated) })
    .unwrap_err();
  assert!(matches!(
    err,
    Error::Validation(ValidationError::MarksOutOfRange { full_marks: 100, .. })
  ));

  let mut stray = before.subjects.clone();
  stray[2].subject_id = "404".into();
  let err = s
    .update_result(&"1".into(), ResultPatch { subjects: Some(stray) })
    .unwrap_err();
  assert!(matches!(err, Error::Validation(ValidationError::UnknownEntry(_))));

  let partial = before.subjects[..2].to_vec();
  let err = s
    .update_result(&"1".into(), ResultPatch { subjects: Some(partial) })
    .unwrap_err();
  assert!(matches!(err, Error::Validation(ValidationError::MissingMarks(_))));

  assert_eq!(s.result(&"1".into()), Some(&before));
}

#[test]
fn whole_total_marks_are_stored_as_floats() {
  let s = store();
  let json = s.storage().get(keys::RESULTS).unwrap().unwrap();
  assert!(json.contains(r#""totalMarks":255.0"#));
  assert!(json.contains(r#""totalFullMarks":300"#));
}

#[test]
fn huge_full_marks_do_not_overflow_totals() {
  let mut s = store();
  for code in ["BIG1", "BIG2"] {
    s.add_subject(NewSubject {
      name:       format!("Subject {code}"),
      code:       code.into(),
      credits:    Some(1),
      full_marks: Some(u32::MAX),
    })
    .unwrap();
  }

  let draft = ResultDraft::new(s.subjects());
  assert_eq!(draft.totals().total_full_marks, 2 * u64::from(u32::MAX) + 300);
  assert_eq!(draft.totals().percentage, 0.0);
}

// ─── Lookup ──────────────────────────────────────────────────────────────────

#[test]
fn lookup_returns_seeded_result() {
  let s = store();
  let view = s
    .student_result(&Credentials::new("CS001", "2000-01-15"), None)
    .expect("result found");

  assert_eq!(view.student_name, "John Doe");
  assert_eq!(view.result.totals.total_full_marks, 300);
  let grades: Vec<_> = view
    .result
    .subjects
    .iter()
    .map(|e| (e.subject_name.as_str(), e.grade))
    .collect();
  assert_eq!(grades, [
    ("Mathematics", Some(Grade::A)),
    ("Physics", Some(Grade::BPlus)),
    ("Programming", Some(Grade::APlus)),
  ]);
}

#[test]
fn lookup_with_wrong_date_looks_like_unknown_roll() {
  let s = store();
  let wrong_dob = s.student_result(&Credentials::new("CS001", "2000-01-16"), None);
  let unknown = s.student_result(&Credentials::new("CS999", "2000-01-15"), None);
  assert_eq!(wrong_dob, None);
  assert_eq!(wrong_dob, unknown);
}

#[test]
fn lookup_without_result_is_none() {
  let mut s = store();
  s.add_student(new_student("CS050")).unwrap();
  assert!(s
    .student_result(&Credentials::new("CS050", "2001-12-09"), None)
    .is_none());
}

#[test]
fn lookup_reconciles_full_marks_but_keeps_stored_percentage() {
  let mut s = store();
  s.update_subject(&"2".into(), SubjectPatch {
    full_marks: Some(150),
    ..Default::default()
  })
  .unwrap();

  let view = s
    .student_result(&Credentials::new("CS001", "2000-01-15"), None)
    .unwrap();
  assert_eq!(view.result.subjects[1].full_marks, 150);
  assert_eq!(view.result.totals.total_full_marks, 350);
  assert_eq!(view.result.totals.percentage, 85.0);
  assert_eq!(view.result.totals.cgpa, 8.5);

  // The stored copy is unchanged.
  assert_eq!(s.result(&"1".into()).unwrap().totals.total_full_marks, 300);
}

// ─── Persistence failure ─────────────────────────────────────────────────────

#[test]
fn failed_write_leaves_memory_unchanged() {
  let s = store();
  let before = s.students().to_vec();
  let mut storage = s.into_storage();
  storage.set_quota(Some(0));
  let mut s = RecordStore::open(storage).unwrap();

  let err = s.add_student(new_student("CS100")).unwrap_err();
  assert!(matches!(err, Error::Persistence(_)));
  assert_eq!(s.students(), before.as_slice());

  let err = s.delete_student(&"1".into()).unwrap_err();
  assert!(matches!(err, Error::Persistence(_)));
  assert_eq!(s.students(), before.as_slice());
}
