//! Encoding and decoding helpers between Rust domain types and the plain
//! values stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings and UUIDs as hyphenated
//! lowercase strings.

use chrono::{DateTime, Utc};
use people_core::{Person, PersonPatch};
use rusqlite::types::Value;
use uuid::Uuid;

use crate::Result;

/// Column list matching [`RawPerson::from_row`].
pub const PERSON_COLUMNS: &str = "uuid, survived, pclass, name, sex, age, \
   siblings_spouses_abroad, parents_children_abroad, fare";

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ────────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

// ─── PersonPatch ──────────────────────────────────────────────────────────────

/// `(column, value)` pairs for every field the patch sets.
pub fn encode_patch(patch: &PersonPatch) -> Vec<(&'static str, Value)> {
  let mut set = Vec::new();
  if let Some(v) = patch.survived {
    set.push(("survived", Value::Integer(v)));
  }
  if let Some(v) = patch.pclass {
    set.push(("pclass", Value::Integer(v)));
  }
  if let Some(v) = &patch.name {
    set.push(("name", Value::Text(v.clone())));
  }
  if let Some(v) = &patch.sex {
    set.push(("sex", Value::Text(v.clone())));
  }
  if let Some(v) = patch.age {
    set.push(("age", Value::Real(v)));
  }
  if let Some(v) = patch.siblings_spouses_abroad {
    set.push(("siblings_spouses_abroad", Value::Integer(v)));
  }
  if let Some(v) = patch.parents_children_abroad {
    set.push(("parents_children_abroad", Value::Integer(v)));
  }
  if let Some(v) = patch.fare {
    set.push(("fare", Value::Real(v)));
  }
  set
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw values read directly from a `people` row.
pub struct RawPerson {
  pub uuid:                    String,
  pub survived:                i64,
  pub pclass:                  i64,
  pub name:                    String,
  pub sex:                     String,
  pub age:                     f64,
  pub siblings_spouses_abroad: i64,
  pub parents_children_abroad: i64,
  pub fare:                    f64,
}

impl RawPerson {
  /// Read a row selected with [`PERSON_COLUMNS`].
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(RawPerson {
      uuid:                    row.get(0)?,
      survived:                row.get(1)?,
      pclass:                  row.get(2)?,
      name:                    row.get(3)?,
      sex:                     row.get(4)?,
      age:                     row.get(5)?,
      siblings_spouses_abroad: row.get(6)?,
      parents_children_abroad: row.get(7)?,
      fare:                    row.get(8)?,
    })
  }

  pub fn into_person(self) -> Result<Person> {
    Ok(Person {
      uuid:                    decode_uuid(&self.uuid)?,
      survived:                self.survived,
      pclass:                  self.pclass,
      name:                    self.name,
      sex:                     self.sex,
      age:                     self.age,
      siblings_spouses_abroad: self.siblings_spouses_abroad,
      parents_children_abroad: self.parents_children_abroad,
      fare:                    self.fare,
    })
  }
}
