//! Handler for `POST /lookup` — a student fetching their own result.
//!
//! Credentials travel in the body rather than the query string so they do
//! not end up in access logs.

use axum::{Json, extract::State};
use records_core::{
  Storage,
  lookup::{Credentials, ResultView},
};
use serde::Deserialize;

use crate::{SharedStore, error::ApiError};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupBody {
  #[serde(flatten)]
  pub credentials: Credentials,
  /// Restrict to one semester; otherwise the student's first result.
  pub semester:    Option<String>,
}

/// `POST /lookup` — body: `{"rollNumber":"...","dateOfBirth":"YYYY-MM-DD"}`.
///
/// Any mismatch is the same 404, whichever credential was wrong.
pub async fn handler<S>(
  State(store): State<SharedStore<S>>,
  Json(body): Json<LookupBody>,
) -> Result<Json<ResultView>, ApiError>
where
  S: Storage + Send + 'static,
{
  store
    .lock()
    .await
    .student_result(&body.credentials, body.semester.as_deref())
    .map(Json)
    .ok_or_else(|| ApiError::NotFound("no result found".to_owned()))
}
