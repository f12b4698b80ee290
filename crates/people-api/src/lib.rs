//! JSON REST API for the people resource.
//!
//! Exposes an axum [`Router`] backed by any [`people_core::store::PeopleStore`].
//! Transport concerns (binding, tracing layers, body limits) are the caller's
//! responsibility.

pub mod error;
pub mod people;

use std::sync::Arc;

use axum::{Router, routing::get};
use people_core::store::PeopleStore;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: PeopleStore + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  Router::new()
    .route("/people", get(people::list::<S>).post(people::create::<S>))
    .route(
      "/people/{uuid}",
      get(people::get_one::<S>)
        .put(people::update_one::<S>)
        .delete(people::delete_one::<S>),
    )
    .with_state(store)
}

// ─── Integration tests ────────────────────────────────────────────────────────
