//! Academic departments.

use serde::{Deserialize, Serialize};

use crate::{RecordId, ValidationError, store::require};

/// A department. Students reference it by `name`, not by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Department {
  pub id:   RecordId,
  pub name: String,
  pub code: String,
}

/// Input to [`crate::RecordStore::add_department`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewDepartment {
  #[serde(default)]
  pub name: String,
  #[serde(default)]
  pub code: String,
}

/// Field-by-field update for a [`Department`]; `None` leaves a field as is.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DepartmentPatch {
  pub name: Option<String>,
  pub code: Option<String>,
}

impl Department {
  pub(crate) fn create(input: NewDepartment) -> Self {
    Self {
      id:   RecordId::generate(),
      name: input.name,
      code: input.code,
    }
  }

  pub(crate) fn merge(&mut self, patch: DepartmentPatch) {
    if let Some(name) = patch.name {
      self.name = name;
    }
    if let Some(code) = patch.code {
      self.code = code;
    }
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
