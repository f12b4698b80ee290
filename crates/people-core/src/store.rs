//! The `PeopleStore` trait.
//!
//! Implemented by storage backends (e.g. `people-store-sqlite`). The JSON API
//! depends on this abstraction, not on any concrete backend.

use std::future::Future;

use uuid::Uuid;

use crate::{
  person::{NewPerson, Person, PersonPatch},
  query::QueryResult,
};

/// Abstraction over a relational store of [`Person`] records.
///
/// Deleted records are invisible to every method: they never appear in
/// `list`, `get` returns no rows for them, and `update`/`delete` report a
/// `row_count` of zero.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait PeopleStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Every present record, in creation order.
  fn list(
    &self,
  ) -> impl Future<Output = Result<QueryResult<Person>, Self::Error>> + Send + '_;

  /// Persist a new record under a freshly generated UUID and return it as the
  /// single row of the result.
  fn insert(
    &self,
    input: NewPerson,
  ) -> impl Future<Output = Result<QueryResult<Person>, Self::Error>> + Send + '_;

  /// The record with `uuid`, or an empty result if there is none.
  fn get(
    &self,
    uuid: Uuid,
  ) -> impl Future<Output = Result<QueryResult<Person>, Self::Error>> + Send + '_;

  /// Overwrite the fields present in `patch` and return the updated row.
  /// An empty result means no present record has `uuid`.
  fn update(
    &self,
    uuid: Uuid,
    patch: PersonPatch,
  ) -> impl Future<Output = Result<QueryResult<Person>, Self::Error>> + Send + '_;

  /// Mark the record deleted. `row_count` is `1` if a present record was
  /// deleted and `0` otherwise.
  fn delete(
    &self,
    uuid: Uuid,
  ) -> impl Future<Output = Result<QueryResult<Person>, Self::Error>> + Send + '_;
}
