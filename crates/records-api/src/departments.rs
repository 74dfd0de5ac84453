//! Handlers for `/departments` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`    | `/departments` | Optional `?q=` over name and code |
//! | `POST`   | `/departments` | Body: [`NewDepartment`]; returns 201 + stored department |
//! | `GET`    | `/departments/:id` | 404 if not found |
//! | `PATCH`  | `/departments/:id` | Body: [`DepartmentPatch`]; 204 if id unknown |
//! | `DELETE` | `/departments/:id` | Always 204 |

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::{IntoResponse, Response},
};
use records_core::{
  RecordId, Storage,
  department::{Department, DepartmentPatch, NewDepartment},
};

use crate::{ListParams, SharedStore, error::ApiError, patched};

/// `GET /departments[?q=<term>]`
pub async fn list<S>(
  State(store): State<SharedStore<S>>,
  Query(params): Query<ListParams>,
) -> Json<Vec<Department>>
where
  S: Storage + Send + 'static,
{
  let store = store.lock().await;
  let departments = match params.q.as_deref() {
    Some(q) => store.search_departments(q).into_iter().cloned().collect(),
    None => store.departments().to_vec(),
  };
  Json(departments)
}

/// `GET /departments/:id`
pub async fn get_one<S>(
  State(store): State<SharedStore<S>>,
  Path(id): Path<RecordId>,
) -> Result<Json<Department>, ApiError>
where
  S: Storage + Send + 'static,
{
  let store = store.lock().await;
  let department = store
    .department(&id)
    .cloned()
    .ok_or_else(|| ApiError::NotFound(format!("department {id} not found")))?;
  Ok(Json(department))
}

/// `POST /departments`
pub async fn create<S>(
  State(store): State<SharedStore<S>>,
  Json(body): Json<NewDepartment>,
) -> Result<impl IntoResponse, ApiError>
where
  S: Storage + Send + 'static,
{
  let department = store.lock().await.add_department(body)?;
  Ok((StatusCode::CREATED, Json(department)))
}

/// `PATCH /departments/:id`
pub async fn update<S>(
  State(store): State<SharedStore<S>>,
  Path(id): Path<RecordId>,
  Json(patch): Json<DepartmentPatch>,
) -> Result<Response, ApiError>
where
  S: Storage + Send + 'static,
{
  let updated = store.lock().await.update_department(&id, patch)?;
  Ok(patched(updated))
}

/// `DELETE /departments/:id`
pub async fn delete<S>(
  State(store): State<SharedStore<S>>,
  Path(id): Path<RecordId>,
) -> Result<StatusCode, ApiError>
where
  S: Storage + Send + 'static,
{
  store.lock().await.delete_department(&id)?;
  Ok(StatusCode::NO_CONTENT)
}
