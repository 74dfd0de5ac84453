//! Handlers for `/subjects` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`    | `/subjects` | Optional `?q=` over name and code |
//! | `POST`   | `/subjects` | Body: [`NewSubject`]; returns 201 + stored subject |
//! | `GET`    | `/subjects/:id` | 404 if not found |
//! | `PATCH`  | `/subjects/:id` | Body: [`SubjectPatch`]; 204 if id unknown |
//! | `DELETE` | `/subjects/:id` | Always 204 |

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::{IntoResponse, Response},
};
use records_core::{
  RecordId, Storage,
  subject::{NewSubject, Subject, SubjectPatch},
};

use crate::{ListParams, SharedStore, error::ApiError, patched};

/// `GET /subjects[?q=<term>]`
pub async fn list<S>(
  State(store): State<SharedStore<S>>,
  Query(params): Query<ListParams>,
) -> Json<Vec<Subject>>
where
  S: Storage + Send + 'static,
{
  let store = store.lock().await;
  let subjects = match params.q.as_deref() {
    Some(q) => store.search_subjects(q).into_iter().cloned().collect(),
    None => store.subjects().to_vec(),
  };
  Json(subjects)
}

/// `GET /subjects/:id`
pub async fn get_one<S>(
  State(store): State<SharedStore<S>>,
  Path(id): Path<RecordId>,
) -> Result<Json<Subject>, ApiError>
where
  S: Storage + Send + 'static,
{
  let store = store.lock().await;
  let subject = store
    .subject(&id)
    .cloned()
    .ok_or_else(|| ApiError::NotFound(format!("subject {id} not found")))?;
  Ok(Json(subject))
}

/// `POST /subjects`
pub async fn create<S>(
  State(store): State<SharedStore<S>>,
  Json(body): Json<NewSubject>,
) -> Result<impl IntoResponse, ApiError>
where
  S: Storage + Send + 'static,
{
  let subject = store.lock().await.add_subject(body)?;
  Ok((StatusCode::CREATED, Json(subject)))
}

/// `PATCH /subjects/:id`
pub async fn update<S>(
  State(store): State<SharedStore<S>>,
  Path(id): Path<RecordId>,
  Json(patch): Json<SubjectPatch>,
) -> Result<Response, ApiError>
where
  S: Storage + Send + 'static,
{
  let updated = store.lock().await.update_subject(&id, patch)?;
  Ok(patched(updated))
}

/// `DELETE /subjects/:id`
pub async fn delete<S>(
  State(store): State<SharedStore<S>>,
  Path(id): Path<RecordId>,
) -> Result<StatusCode, ApiError>
where
  S: Storage + Send + 'static,
{
  store.lock().await.delete_subject(&id)?;
  Ok(StatusCode::NO_CONTENT)
}
