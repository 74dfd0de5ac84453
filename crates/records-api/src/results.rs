//! Handlers for `/results` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`    | `/results` | Optional `?q=` over roll number and semester |
//! | `GET`    | `/results/draft` | Blank entries for every catalog subject |
//! | `POST`   | `/results` | Body: [`NewResult`]; names and full marks come from the catalog |
//! | `GET`    | `/results/:id` | 404 if not found |
//! | `PATCH`  | `/results/:id` | Body: [`ResultPatch`]; only marks can change |
//! | `DELETE` | `/results/:id` | Always 204 |
//!
//! The draft endpoint only hands out the blank form. Editing it
//! (`ResultDraft::set_marks`, `submit`, and clearing out-of-range marks)
//! happens client-side or through `records_core::aggregate` directly; over
//! HTTP an invalid submission is a plain 422 and nothing is stored.

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::{IntoResponse, Response},
};
use records_core::{
  RecordId, Storage,
  aggregate::ResultDraft,
  result::{NewResult, ResultPatch, SemesterResult},
};

use crate::{ListParams, SharedStore, error::ApiError, patched};

/// `GET /results[?q=<term>]`
pub async fn list<S>(
  State(store): State<SharedStore<S>>,
  Query(params): Query<ListParams>,
) -> Json<Vec<SemesterResult>>
where
  S: Storage + Send + 'static,
{
  let store = store.lock().await;
  let results = match params.q.as_deref() {
    Some(q) => store.search_results(q).into_iter().cloned().collect(),
    None => store.results().to_vec(),
  };
  Json(results)
}

/// `GET /results/draft` — the starting point for a new result form.
pub async fn draft<S>(State(store): State<SharedStore<S>>) -> Json<ResultDraft>
where
  S: Storage + Send + 'static,
{
  Json(ResultDraft::new(store.lock().await.subjects()))
}

/// `GET /results/:id`
pub async fn get_one<S>(
  State(store): State<SharedStore<S>>,
  Path(id): Path<RecordId>,
) -> Result<Json<SemesterResult>, ApiError>
where
  S: Storage + Send + 'static,
{
  let store = store.lock().await;
  let result = store
    .result(&id)
    .cloned()
    .ok_or_else(|| ApiError::NotFound(format!("result {id} not found")))?;
  Ok(Json(result))
}

/// `POST /results` — 422 unless every entry has marks within its full marks.
pub async fn create<S>(
  State(store): State<SharedStore<S>>,
  Json(body): Json<NewResult>,
) -> Result<impl IntoResponse, ApiError>
where
  S: Storage + Send + 'static,
{
  let result = store.lock().await.add_result(body)?;
  Ok((StatusCode::CREATED, Json(result)))
}

/// `PATCH /results/:id`
pub async fn update<S>(
  State(store): State<SharedStore<S>>,
  Path(id): Path<RecordId>,
  Json(patch): Json<ResultPatch>,
) -> Result<Response, ApiError>
where
  S: Storage + Send + 'static,
{
  let updated = store.lock().await.update_result(&id, patch)?;
  Ok(patched(updated))
}

/// `DELETE /results/:id`
pub async fn delete<S>(
  State(store): State<SharedStore<S>>,
  Path(id): Path<RecordId>,
) -> Result<StatusCode, ApiError>
where
  S: Storage + Send + 'static,
{
  store.lock().await.delete_result(&id)?;
  Ok(StatusCode::NO_CONTENT)
}
