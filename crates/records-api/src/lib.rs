//! JSON REST API for the academic records store.
//!
//! Exposes an axum [`Router`] backed by a [`RecordStore`] over any
//! [`Storage`]. Auth, TLS, and transport concerns are the caller's
//! responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", records_api::api_router(store.clone()))
//! ```

pub mod departments;
pub mod error;
pub mod lookup;
pub mod overview;
pub mod results;
pub mod students;
pub mod subjects;

use std::sync::Arc;

use axum::{
  Json, Router,
  http::StatusCode,
  response::{IntoResponse, Response},
  routing::{get, post},
};
use records_core::{RecordStore, Storage};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

pub use error::ApiError;

/// The store shared by all handlers. One request touches it at a time.
pub type SharedStore<S> = Arc<Mutex<RecordStore<S>>>;

/// Wrap `store` for use with [`api_router`].
pub fn shared<S: Storage>(store: RecordStore<S>) -> SharedStore<S> {
  Arc::new(Mutex::new(store))
}

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: SharedStore<S>) -> Router<()>
where
  S: Storage + Send + 'static,
{
  Router::new()
    // Students
    .route("/students", get(students::list::<S>).post(students::create::<S>))
    .route(
      "/students/{id}",
      get(students::get_one::<S>)
        .patch(students::update::<S>)
        .delete(students::delete::<S>),
    )
    // Subjects
    .route("/subjects", get(subjects::list::<S>).post(subjects::create::<S>))
    .route(
      "/subjects/{id}",
      get(subjects::get_one::<S>)
        .patch(subjects::update::<S>)
        .delete(subjects::delete::<S>),
    )
    // Departments
    .route(
      "/departments",
      get(departments::list::<S>).post(departments::create::<S>),
    )
    .route(
      "/departments/{id}",
      get(departments::get_one::<S>)
        .patch(departments::update::<S>)
        .delete(departments::delete::<S>),
    )
    // Results
    .route("/results", get(results::list::<S>).post(results::create::<S>))
    .route("/results/draft", get(results::draft::<S>))
    .route(
      "/results/{id}",
      get(results::get_one::<S>)
        .patch(results::update::<S>)
        .delete(results::delete::<S>),
    )
    // Student self-service and dashboard
    .route("/lookup", post(lookup::handler::<S>))
    .route("/overview", get(overview::handler::<S>))
    .with_state(store)
}

// ─── Shared handler pieces ───────────────────────────────────────────────────

/// `?q=` filter accepted by every list endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
  /// Case-insensitive substring filter; omitted means "everything".
  pub q: Option<String>,
}

/// 200 + the merged record, or 204 when the id was unknown (not an error).
pub(crate) fn patched<T: Serialize>(record: Option<T>) -> Response {
  match record {
    Some(r) => Json(r).into_response(),
    None => StatusCode::NO_CONTENT.into_response(),
  }
}
