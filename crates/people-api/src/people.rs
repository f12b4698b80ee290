//! Handlers for `/people` endpoints.
//!
//! | Method   | Path            | Notes |
//! |----------|-----------------|-------|
//! | `GET`    | `/people`       | Every present record |
//! | `POST`   | `/people`       | Body: all fields but `uuid`; returns 201 |
//! | `GET`    | `/people/:uuid` | 404 if absent or deleted |
//! | `PUT`    | `/people/:uuid` | Body: any subset of fields; 404 if absent |
//! | `DELETE` | `/people/:uuid` | Always 204, including for unknown ids |
//!
//! Successful responses carry a [`QueryResult`] envelope. Bodies are read as
//! raw bytes and validated here, so a missing `Content-Type` is not an error
//! and a wrong-typed field is reported as 422 against its name. Extractor
//! rejections (undecodable path, oversized body) are taken as `Result`s and
//! turned into [`ApiError`] so they also answer with JSON.

use std::sync::Arc;

use axum::{
  Json,
  body::Bytes,
  extract::{
    Path, State,
    rejection::{BytesRejection, PathRejection},
  },
  http::StatusCode,
  response::IntoResponse,
};
use people_core::{Person, QueryResult, store::PeopleStore, validate};
use uuid::Uuid;

use crate::error::ApiError;

/// Parse the `:uuid` path segment. Anything that is not a UUID is a 400.
fn parse_uuid(raw: &str) -> Result<Uuid, ApiError> {
  Uuid::parse_str(raw)
    .map_err(|e| ApiError::BadRequest(format!("invalid uuid {raw:?}: {e}")))
}

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /people`
pub async fn list<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<QueryResult<Person>>, ApiError>
where
  S: PeopleStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let result = store
    .list()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(result))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /people` — returns 201 + the stored record as the only row.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  body: Result<Bytes, BytesRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: PeopleStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let input = validate::parse_new_person(&body?)?;
  let result = store
    .insert(input)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  if let Some(person) = result.first() {
    tracing::debug!(uuid = %person.uuid, "person created");
  }
  Ok((StatusCode::CREATED, Json(result)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /people/:uuid`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  path: Result<Path<String>, PathRejection>,
) -> Result<Json<QueryResult<Person>>, ApiError>
where
  S: PeopleStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let Path(raw) = path?;
  let uuid = parse_uuid(&raw)?;
  let result = store
    .get(uuid)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  if result.is_empty() {
    return Err(ApiError::NotFound(format!("person {uuid} not found")));
  }
  Ok(Json(result))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /people/:uuid` — body is a partial or full person; returns the
/// record after the update.
pub async fn update_one<S>(
  State(store): State<Arc<S>>,
  path: Result<Path<String>, PathRejection>,
  body: Result<Bytes, BytesRejection>,
) -> Result<Json<QueryResult<Person>>, ApiError>
where
  S: PeopleStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let Path(raw) = path?;
  let uuid = parse_uuid(&raw)?;
  let patch = validate::parse_person_patch(&body?)?;
  let result = store
    .update(uuid, patch)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  if result.is_empty() {
    return Err(ApiError::NotFound(format!("person {uuid} not found")));
  }
  tracing::debug!(%uuid, "person updated");
  Ok(Json(result))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /people/:uuid` — idempotent; deleting an unknown or already
/// deleted id is also 204.
pub async fn delete_one<S>(
  State(store): State<Arc<S>>,
  path: Result<Path<String>, PathRejection>,
) -> Result<StatusCode, ApiError>
where
  S: PeopleStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let Path(raw) = path?;
  let uuid = parse_uuid(&raw)?;
  let result = store
    .delete(uuid)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  tracing::debug!(%uuid, deleted = result.row_count, "person delete");
  Ok(StatusCode::NO_CONTENT)
}
