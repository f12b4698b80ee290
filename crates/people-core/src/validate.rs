//! Request-body validation for create and update.
//!
//! Bodies are checked field by field against [`FIELDS`] before being
//! deserialised, so a wrong-typed value is reported against its field rather
//! than coerced. Integer fields accept only JSON integers, numeric fields
//! accept any JSON number, and text fields accept only JSON strings. `null`
//! is never accepted.

use serde::{Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::{
  error::{Error, Result},
  person::{NewPerson, PersonPatch},
};

// ─── Field table ─────────────────────────────────────────────────────────────

/// The JSON type (and range) a person field must have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
  /// Integer `0` or `1`.
  Flag,
  /// Integer no smaller than `min`.
  Integer { min: i64 },
  /// Non-negative number, integer or float.
  Number,
  Text,
}

/// Every client-settable person field, in column order.
pub const FIELDS: &[(&str, FieldKind)] = &[
  ("survived", FieldKind::Flag),
  ("pclass", FieldKind::Integer { min: 1 }),
  ("name", FieldKind::Text),
  ("sex", FieldKind::Text),
  ("age", FieldKind::Number),
  ("siblings_spouses_abroad", FieldKind::Integer { min: 0 }),
  ("parents_children_abroad", FieldKind::Integer { min: 0 }),
  ("fare", FieldKind::Number),
];

impl FieldKind {
  fn check(self, value: &Value) -> Result<(), String> {
    if value.is_null() {
      return Err("must not be null".to_owned());
    }
    match self {
      FieldKind::Flag => match value.as_i64() {
        Some(0 | 1) => Ok(()),
        Some(_) => Err("must be 0 or 1".to_owned()),
        None if value.is_u64() => Err("out of range".to_owned()),
        None => Err(format!("expected an integer, got {}", json_type(value))),
      },
      FieldKind::Integer { min } => match value.as_i64() {
        Some(n) if n >= min => Ok(()),
        Some(_) => Err(format!("must be at least {min}")),
        None if value.is_u64() => Err("out of range".to_owned()),
        None => Err(format!("expected an integer, got {}", json_type(value))),
      },
      FieldKind::Number => match value.as_f64() {
        Some(n) if n >= 0.0 => Ok(()),
        Some(_) => Err("must not be negative".to_owned()),
        None => Err(format!("expected a number, got {}", json_type(value))),
      },
      FieldKind::Text => {
        if value.is_string() {
          Ok(())
        } else {
          Err(format!("expected a string, got {}", json_type(value)))
        }
      }
    }
  }
}

fn json_type(value: &Value) -> &'static str {
  match value {
    Value::Null => "null",
    Value::Bool(_) => "a boolean",
    Value::Number(n) if n.is_f64() => "a float",
    Value::Number(_) => "an integer",
    Value::String(_) => "a string",
    Value::Array(_) => "an array",
    Value::Object(_) => "an object",
  }
}

// ─── Errors ──────────────────────────────────────────────────────────────────

/// One rejected field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
  pub field:   String,
  pub message: String,
}

/// A request body that is valid JSON but not a valid person.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{message}")]
pub struct ValidationError {
  pub message: String,
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub fields:  Vec<FieldError>,
}

impl ValidationError {
  fn body(message: impl Into<String>) -> Self {
    Self { message: message.into(), fields: Vec::new() }
  }

  fn from_fields(fields: Vec<FieldError>) -> Self {
    let detail = fields
      .iter()
      .map(|f| format!("{}: {}", f.field, f.message))
      .collect::<Vec<_>>()
      .join("; ");
    Self { message: format!("invalid person: {detail}"), fields }
  }
}

// ─── Entry points ────────────────────────────────────────────────────────────

/// Parse and validate a `POST /people` body. Every field is required.
pub fn parse_new_person(body: &[u8]) -> Result<NewPerson> {
  new_person(&parse_json(body)?).map_err(Error::from)
}

/// Parse and validate a `PUT /people/:uuid` body. Every field is optional.
pub fn parse_person_patch(body: &[u8]) -> Result<PersonPatch> {
  person_patch(&parse_json(body)?).map_err(Error::from)
}

/// Validate an already-parsed create body. `{}` reports every field as
/// missing.
pub fn new_person(value: &Value) -> Result<NewPerson, ValidationError> {
  decode(check_object(value, true)?)
}

/// Validate an already-parsed update body. `{}` is a valid, empty patch.
pub fn person_patch(value: &Value) -> Result<PersonPatch, ValidationError> {
  decode(check_object(value, false)?)
}

fn parse_json(body: &[u8]) -> Result<Value> {
  if body.iter().all(u8::is_ascii_whitespace) {
    return Err(Error::EmptyBody);
  }
  Ok(serde_json::from_slice(body)?)
}

fn check_object(
  value: &Value,
  require_all: bool,
) -> Result<&Map<String, Value>, ValidationError> {
  let Some(object) = value.as_object() else {
    return Err(ValidationError::body(format!(
      "request body must be a JSON object, got {}",
      json_type(value)
    )));
  };

  let mut errors = Vec::new();

  for key in object.keys() {
    if key == "uuid" {
      errors.push(FieldError {
        field:   key.clone(),
        message: "is assigned by the server and cannot be set".to_owned(),
      });
    } else if !FIELDS.iter().any(|(name, _)| *name == key.as_str()) {
      errors.push(FieldError {
        field:   key.clone(),
        message: "unknown field".to_owned(),
      });
    }
  }

  for (name, kind) in FIELDS {
    match object.get(*name) {
      Some(v) => {
        if let Err(message) = kind.check(v) {
          errors.push(FieldError { field: (*name).to_owned(), message });
        }
      }
      None if require_all => errors.push(FieldError {
        field:   (*name).to_owned(),
        message: "is required".to_owned(),
      }),
      None => {}
    }
  }

  if errors.is_empty() {
    Ok(object)
  } else {
    Err(ValidationError::from_fields(errors))
  }
}

fn decode<T: DeserializeOwned>(
  object: &Map<String, Value>,
) -> Result<T, ValidationError> {
  serde_json::from_value(Value::Object(object.clone()))
    .map_err(|e| ValidationError::body(e.to_string()))
}
