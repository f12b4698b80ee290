//! Person — the single entity of the people resource.
//!
//! [`Person`] is the stored and returned record. [`NewPerson`] and
//! [`PersonPatch`] are the validated inputs to create and update; neither
//! carries a `uuid`, which is always assigned by the store.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stored person record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
  pub uuid:                    Uuid,
  /// `0` or `1`.
  pub survived:                i64,
  /// Passenger class.
  pub pclass:                  i64,
  pub name:                    String,
  pub sex:                     String,
  pub age:                     f64,
  pub siblings_spouses_abroad: i64,
  pub parents_children_abroad: i64,
  pub fare:                    f64,
}

/// Input to [`PeopleStore::insert`](crate::store::PeopleStore::insert).
///
/// Build one with [`validate::new_person`](crate::validate::new_person) so
/// field types and ranges are checked first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewPerson {
  pub survived:                i64,
  pub pclass:                  i64,
  pub name:                    String,
  pub sex:                     String,
  pub age:                     f64,
  pub siblings_spouses_abroad: i64,
  pub parents_children_abroad: i64,
  pub fare:                    f64,
}

impl NewPerson {
  /// Attach a store-assigned identifier.
  pub fn into_person(self, uuid: Uuid) -> Person {
    Person {
      uuid,
      survived: self.survived,
      pclass: self.pclass,
      name: self.name,
      sex: self.sex,
      age: self.age,
      siblings_spouses_abroad: self.siblings_spouses_abroad,
      parents_children_abroad: self.parents_children_abroad,
      fare: self.fare,
    }
  }
}

/// Input to [`PeopleStore::update`](crate::store::PeopleStore::update).
///
/// Only fields that are `Some` are written; the rest keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PersonPatch {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub survived:                Option<i64>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub pclass:                  Option<i64>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub name:                    Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub sex:                     Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub age:                     Option<f64>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub siblings_spouses_abroad: Option<i64>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub parents_children_abroad: Option<i64>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub fare:                    Option<f64>,
}
