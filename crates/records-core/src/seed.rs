//! Default records installed the first time a collection is empty.
//!
//! The seed results are stored exactly as listed; their totals are not
//! recomputed (the second result's `cgpa` of 8.7 is deliberate).

use chrono::NaiveDate;

use crate::{
  department::Department,
  grade::Grade,
  result::{SemesterResult, SubjectEntry, Totals},
  student::Student,
  subject::Subject,
};

pub fn students() -> Vec<Student> {
  vec![
    Student {
      id:            "1".into(),
      roll_number:   "CS001".into(),
      name:          "John Doe".into(),
      email:         "john@example.com".into(),
      department:    "Computer Science".into(),
      date_of_birth: date(2000, 1, 15),
      phone:         Some("+1234567890".into()),
    },
    Student {
      id:            "2".into(),
      roll_number:   "CS002".into(),
      name:          "Jane Smith".into(),
      email:         "jane@example.com".into(),
      department:    "Computer Science".into(),
      date_of_birth: date(2000, 3, 22),
      phone:         Some("+1234567891".into()),
    },
  ]
}

pub fn subjects() -> Vec<Subject> {
  vec![
    subject("1", "Mathematics", "MATH101", 3),
    subject("2", "Physics", "PHY101", 4),
    subject("3", "Programming", "CS101", 4),
  ]
}

pub fn departments() -> Vec<Department> {
  vec![
    department("1", "Computer Science", "CS"),
    department("2", "Electrical Engineering", "EE"),
    department("3", "Mechanical Engineering", "ME"),
  ]
}

pub fn results() -> Vec<SemesterResult> {
  vec![
    SemesterResult {
      id:          "1".into(),
      student_id:  "1".into(),
      roll_number: "CS001".into(),
      semester:    "Fall 2023".into(),
      subjects:    vec![
        entry("1", "Mathematics", 85.0, Grade::A),
        entry("2", "Physics", 78.0, Grade::BPlus),
        entry("3", "Programming", 92.0, Grade::APlus),
      ],
      totals:      Totals {
        total_marks:      255.0,
        total_full_marks: 300,
        percentage:       85.0,
        cgpa:             8.5,
      },
    },
    SemesterResult {
      id:          "2".into(),
      student_id:  "2".into(),
      roll_number: "CS002".into(),
      semester:    "Fall 2023".into(),
      subjects:    vec![
        entry("1", "Mathematics", 90.0, Grade::APlus),
        entry("2", "Physics", 82.0, Grade::A),
        entry("3", "Programming", 88.0, Grade::A),
      ],
      totals:      Totals {
        total_marks:      260.0,
        total_full_marks: 300,
        percentage:       86.67,
        cgpa:             8.7,
      },
    },
  ]
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
  NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn subject(id: &str, name: &str, code: &str, credits: u32) -> Subject {
  Subject {
    id: id.into(),
    name: name.into(),
    code: code.into(),
    credits,
    full_marks: crate::subject::DEFAULT_FULL_MARKS,
  }
}

fn department(id: &str, name: &str, code: &str) -> Department {
  Department { id: id.into(), name: name.into(), code: code.into() }
}

fn entry(subject_id: &str, name: &str, marks: f64, grade: Grade) -> SubjectEntry {
  SubjectEntry {
    subject_id:   subject_id.into(),
    subject_name: name.into(),
    marks:        Some(marks),
    full_marks:   100,
    grade:        Some(grade),
  }
}
