//! Error types for `people-core`.

use thiserror::Error;

use crate::validate::ValidationError;

#[derive(Debug, Error)]
pub enum Error {
  /// The body parsed as JSON but does not describe a valid person.
  #[error(transparent)]
  Validation(#[from] ValidationError),

  /// The body is not JSON at all.
  #[error("malformed JSON body: {0}")]
  Serialization(#[from] serde_json::Error),

  #[error("request body is empty")]
  EmptyBody,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
