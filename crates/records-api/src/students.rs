//! Handlers for `/students` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`    | `/students` | Optional `?q=` over name and roll number |
//! | `POST`   | `/students` | Body: [`NewStudent`]; returns 201 + stored student |
//! | `GET`    | `/students/:id` | 404 if not found |
//! | `PATCH`  | `/students/:id` | Body: [`StudentPatch`]; 204 if id unknown |
//! | `DELETE` | `/students/:id` | Always 204 |

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::{IntoResponse, Response},
};
use records_core::{
  RecordId, Storage,
  student::{NewStudent, Student, StudentPatch},
};

use crate::{ListParams, SharedStore, error::ApiError, patched};

/// `GET /students[?q=<term>]`
pub async fn list<S>(
  State(store): State<SharedStore<S>>,
  Query(params): Query<ListParams>,
) -> Json<Vec<Student>>
where
  S: Storage + Send + 'static,
{
  let store = store.lock().await;
  let students = match params.q.as_deref() {
    Some(q) => store.search_students(q).into_iter().cloned().collect(),
    None => store.students().to_vec(),
  };
  Json(students)
}

/// `GET /students/:id`
pub async fn get_one<S>(
  State(store): State<SharedStore<S>>,
  Path(id): Path<RecordId>,
) -> Result<Json<Student>, ApiError>
where
  S: Storage + Send + 'static,
{
  let store = store.lock().await;
  let student = store
    .student(&id)
    .cloned()
    .ok_or_else(|| ApiError::NotFound(format!("student {id} not found")))?;
  Ok(Json(student))
}

/// `POST /students`
pub async fn create<S>(
  State(store): State<SharedStore<S>>,
  Json(body): Json<NewStudent>,
) -> Result<impl IntoResponse, ApiError>
where
  S: Storage + Send + 'static,
{
  let student = store.lock().await.add_student(body)?;
  Ok((StatusCode::CREATED, Json(student)))
}

/// `PATCH /students/:id`
pub async fn update<S>(
  State(store): State<SharedStore<S>>,
  Path(id): Path<RecordId>,
  Json(patch): Json<StudentPatch>,
) -> Result<Response, ApiError>
where
  S: Storage + Send + 'static,
{
  let updated = store.lock().await.update_student(&id, patch)?;
  Ok(patched(updated))
}

/// `DELETE /students/:id`
pub async fn delete<S>(
  State(store): State<SharedStore<S>>,
  Path(id): Path<RecordId>,
) -> Result<StatusCode, ApiError>
where
  S: Storage + Send + 'static,
{
  store.lock().await.delete_student(&id)?;
  Ok(StatusCode::NO_CONTENT)
}
