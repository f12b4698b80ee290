//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  extract::rejection::{BytesRejection, PathRejection},
  http::StatusCode,
  response::{IntoResponse, Response},
};
use people_core::ValidationError;
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  /// The request could not be parsed at all (bad path id, empty or
  /// non-JSON body).
  #[error("bad request: {0}")]
  BadRequest(String),

  /// The body exceeded the configured body limit.
  #[error("payload too large: {0}")]
  PayloadTooLarge(String),

  /// The body parsed but describes an invalid person.
  #[error(transparent)]
  Validation(#[from] ValidationError),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl From<people_core::Error> for ApiError {
  fn from(e: people_core::Error) -> Self {
    match e {
      people_core::Error::Validation(v) => ApiError::Validation(v),
      other => ApiError::BadRequest(other.to_string()),
    }
  }
}

impl From<PathRejection> for ApiError {
  fn from(r: PathRejection) -> Self { ApiError::BadRequest(r.body_text()) }
}

impl From<BytesRejection> for ApiError {
  fn from(r: BytesRejection) -> Self {
    if r.status() == StatusCode::PAYLOAD_TOO_LARGE {
      ApiError::PayloadTooLarge(r.body_text())
    } else {
      ApiError::BadRequest(r.body_text())
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    match self {
      ApiError::NotFound(m) => {
        (StatusCode::NOT_FOUND, Json(json!({ "error": m }))).into_response()
      }
      ApiError::BadRequest(m) => {
        (StatusCode::BAD_REQUEST, Json(json!({ "error": m }))).into_response()
      }
      ApiError::PayloadTooLarge(m) => (
        StatusCode::PAYLOAD_TOO_LARGE,
        Json(json!({ "error": m })),
      )
        .into_response(),
      ApiError::Validation(v) => (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(json!({ "error": v.message, "fields": v.fields })),
      )
        .into_response(),
      ApiError::Store(e) => {
        tracing::error!(error = %e, "store operation failed");
        (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "error": e.to_string() })))
          .into_response()
      }
    }
  }
}
