//! Handler for `GET /overview`.

use axum::{Json, extract::State};
use records_core::{Storage, store::Overview};

use crate::SharedStore;

/// `GET /overview` — collection counts for the admin dashboard.
pub async fn handler<S>(State(store): State<SharedStore<S>>) -> Json<Overview>
where
  S: Storage + Send + 'static,
{
  Json(store.lock().await.overview())
}
