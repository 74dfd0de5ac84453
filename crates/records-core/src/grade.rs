//! Letter grades.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A letter grade derived from the percentage of full marks obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grade {
  #[serde(rename = "A+")]
  APlus,
  #[serde(rename = "A")]
  A,
  #[serde(rename = "B+")]
  BPlus,
  #[serde(rename = "B")]
  B,
  #[serde(rename = "C+")]
  CPlus,
  #[serde(rename = "C")]
  C,
  #[serde(rename = "F")]
  F,
}

impl Grade {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::APlus => "A+",
      Self::A => "A",
      Self::BPlus => "B+",
      Self::B => "B",
      Self::CPlus => "C+",
      Self::C => "C",
      Self::F => "F",
    }
  }
}

impl fmt::Display for Grade {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Lower bound (inclusive, in percent) for each passing grade, best first.
const THRESHOLDS: [(f64, Grade); 6] = [
  (90.0, Grade::APlus),
  (80.0, Grade::A),
  (70.0, Grade::BPlus),
  (60.0, Grade::B),
  (50.0, Grade::CPlus),
  (40.0, Grade::C),
];

/// Grade `marks` out of `full_marks`.
///
/// Callers are expected to have validated `marks` against `full_marks`
/// already. A zero `full_marks` has no meaningful percentage and grades `F`.
pub fn compute_grade(marks: f64, full_marks: u32) -> Grade {
  if full_marks == 0 {
    return Grade::F;
  }
  // Multiply first so whole-number marks hit the boundaries exactly.
  let percent = marks * 100.0 / f64::from(full_marks);
  THRESHOLDS
    .iter()
    .find(|(min, _)| percent >= *min)
    .map(|(_, grade)| *grade)
    .unwrap_or(Grade::F)
}
