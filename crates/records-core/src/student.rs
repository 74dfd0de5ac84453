//! Student records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{RecordId, ValidationError, store::require};

/// The serialised form of a date of birth, also used for lookup matching.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A student. `roll_number` + `date_of_birth` form the self-service lookup
/// credential; neither is checked for uniqueness.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
  pub id:            RecordId,
  pub roll_number:   String,
  pub name:          String,
  pub email:         String,
  /// Department *name*; not a foreign key.
  pub department:    String,
  pub date_of_birth: NaiveDate,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub phone:         Option<String>,
}

/// Input to [`crate::RecordStore::add_student`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStudent {
  #[serde(default)]
  pub roll_number:   String,
  #[serde(default)]
  pub name:          String,
  #[serde(default)]
  pub email:         String,
  #[serde(default)]
  pub department:    String,
  pub date_of_birth: Option<NaiveDate>,
  pub phone:         Option<String>,
}

/// Field-by-field update for a [`Student`].
///
/// `phone: Some("")` clears the phone number.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentPatch {
  pub roll_number:   Option<String>,
  pub name:          Option<String>,
  pub email:         Option<String>,
  pub department:    Option<String>,
  pub date_of_birth: Option<NaiveDate>,
  pub phone:         Option<String>,
}

impl Student {
  pub(crate) fn create(input: NewStudent) -> Result<Self, ValidationError> {
    let date_of_birth = input
      .date_of_birth
      .ok_or(ValidationError::MissingField("dateOfBirth"))?;
    Ok(Self {
      id: RecordId::generate(),
      roll_number: input.roll_number,
      name: input.name,
      email: input.email,
      department: input.department,
      date_of_birth,
      phone: non_blank(input.phone),
    })
  }

  pub(crate) fn merge(&mut self, patch: StudentPatch) {
    if let Some(roll_number) = patch.roll_number {
      self.roll_number = roll_number;
    }
    if let Some(name) = patch.name {
      self.name = name;
    }
    if let Some(email) = patch.email {
      self.email = email;
    }
    if let Some(department) = patch.department {
      self.department = department;
    }
    if let Some(date_of_birth) = patch.date_of_birth {
      self.date_of_birth = date_of_birth;
    }
    if patch.phone.is_some() {
      self.phone = non_blank(patch.phone);
    }
  }

  pub(crate) fn validate(&self) -> Result<(), ValidationError> {
    require("rollNumber", &self.roll_number)?;
    require("name", &self.name)?;
    require("email", &self.email)?;
    require("department", &self.department)
  }

  pub(crate) fn matches(&self, needle: &str) -> bool {
    self.name.to_lowercase().contains(needle)
      || self.roll_number.to_lowercase().contains(needle)
  }

  /// Exact, case-sensitive credential check.
  pub fn has_credentials(&self, roll_number: &str, date_of_birth: &str) -> bool {
    self.roll_number == roll_number
      && self.date_of_birth.format(DATE_FORMAT).to_string() == date_of_birth
  }
}

fn non_blank(s: Option<String>) -> Option<String> {
  s.filter(|s| !s.trim().is_empty())
}
