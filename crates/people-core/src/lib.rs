//! Core types and trait definitions for the people resource.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! The store backends and the JSON API both depend on it.

pub mod error;
pub mod person;
pub mod query;
pub mod store;
pub mod validate;

pub use error::{Error, Result};
pub use person::{NewPerson, Person, PersonPatch};
pub use query::QueryResult;
pub use validate::{FieldError, ValidationError};
