//! Integration tests for `SqliteStore` against in-memory and file-backed databases.

use people_core::{NewPerson, PersonPatch, store::PeopleStore};
use uuid::Uuid;

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn passenger(name: &str) -> NewPerson {
  NewPerson {
    survived:                1,
    pclass:                  3,
    name:                    name.into(),
    sex:                     "female".into(),
    age:                     22.0,
    siblings_spouses_abroad: 0,
    parents_children_abroad: 0,
    fare:                    7.25,
  }
}

// ─── List ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn list_empty_store() {
  let s = store().await;
  let result = s.list().await.unwrap();
  assert!(result.rows.is_empty());
  assert_eq!(result.row_count, 0);
}

#[tokio::test]
async fn list_returns_records_in_creation_order() {
  let s = store().await;
  for name in ["a", "b", "c"] {
    s.insert(passenger(name)).await.unwrap();
  }

  let result = s.list().await.unwrap();
  assert_eq!(result.row_count, 3);
  let names: Vec<_> = result.rows.iter().map(|p| p.name.as_str()).collect();
  assert_eq!(names, ["a", "b", "c"]);
}

// ─── Insert / get ────────────────────────────────────────────────────────────

#[tokio::test]
async fn insert_assigns_uuid_and_get_returns_it() {
  let s = store().await;

  let created = s.insert(passenger("alice")).await.unwrap();
  assert_eq!(created.row_count, 1);
  let person = created.first().unwrap().clone();
  assert_ne!(person.uuid, Uuid::nil());

  let fetched = s.get(person.uuid).await.unwrap();
  assert_eq!(fetched.rows, vec![person]);
}

#[tokio::test]
async fn insert_assigns_distinct_uuids() {
  let s = store().await;
  let a = s.insert(passenger("a")).await.unwrap().rows[0].uuid;
  let b = s.insert(passenger("a")).await.unwrap().rows[0].uuid;
  assert_ne!(a, b);
}

#[tokio::test]
async fn numeric_fields_roundtrip() {
  let s = store().await;
  let mut input = passenger("bob");
  input.age = 0.42;
  input.fare = 512.3292;
  input.survived = 0;
  input.pclass = 1;

  let uuid = s.insert(input).await.unwrap().rows[0].uuid;
  let p = s.get(uuid).await.unwrap().rows.remove(0);
  assert_eq!(p.age, 0.42);
  assert_eq!(p.fare, 512.3292);
  assert_eq!(p.survived, 0);
  assert_eq!(p.pclass, 1);
}

#[tokio::test]
async fn get_missing_returns_empty() {
  let s = store().await;
  assert!(s.get(Uuid::nil()).await.unwrap().is_empty());
  assert!(s.get(Uuid::new_v4()).await.unwrap().is_empty());
}

// ─── Update ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn update_overwrites_only_supplied_fields() {
  let s = store().await;
  let before = s.insert(passenger("a")).await.unwrap().rows.remove(0);

  let patch = PersonPatch { name: Some("b".into()), ..Default::default() };
  let result = s.update(before.uuid, patch).await.unwrap();
  assert_eq!(result.row_count, 1);

  let after = &result.rows[0];
  assert_eq!(after.uuid, before.uuid);
  assert_eq!(after.name, "b");
  assert_eq!(after.fare, before.fare);
  assert_eq!(after.sex, before.sex);

  let fetched = s.get(before.uuid).await.unwrap();
  assert_eq!(fetched.rows[0].name, "b");
}

#[tokio::test]
async fn update_with_full_body_replaces_every_field() {
  let s = store().await;
  let uuid = s.insert(passenger("a")).await.unwrap().rows[0].uuid;

  let replacement = NewPerson {
    survived:                0,
    pclass:                  1,
    name:                    "z".into(),
    sex:                     "male".into(),
    age:                     54.0,
    siblings_spouses_abroad: 1,
    parents_children_abroad: 2,
    fare:                    51.8625,
  };
  let patch = PersonPatch {
    survived:                Some(replacement.survived),
    pclass:                  Some(replacement.pclass),
    name:                    Some(replacement.name.clone()),
    sex:                     Some(replacement.sex.clone()),
    age:                     Some(replacement.age),
    siblings_spouses_abroad: Some(replacement.siblings_spouses_abroad),
    parents_children_abroad: Some(replacement.parents_children_abroad),
    fare:                    Some(replacement.fare),
  };
  let result = s.update(uuid, patch).await.unwrap();
  assert_eq!(result.rows, vec![replacement.into_person(uuid)]);
}

#[tokio::test]
async fn empty_patch_returns_unchanged_row() {
  let s = store().await;
  let before = s.insert(passenger("a")).await.unwrap().rows.remove(0);
  let result = s.update(before.uuid, PersonPatch::default()).await.unwrap();
  assert_eq!(result.rows, vec![before]);
}

#[tokio::test]
async fn update_missing_returns_empty() {
  let s = store().await;
  let patch = PersonPatch { name: Some("b".into()), ..Default::default() };
  assert!(s.update(Uuid::nil(), patch).await.unwrap().is_empty());
}

// ─── Delete ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn delete_hides_record_from_every_read() {
  let s = store().await;
  let uuid = s.insert(passenger("gone")).await.unwrap().rows[0].uuid;
  s.insert(passenger("kept")).await.unwrap();

  let deleted = s.delete(uuid).await.unwrap();
  assert_eq!(deleted.row_count, 1);
  assert!(deleted.rows.is_empty());

  assert!(s.get(uuid).await.unwrap().is_empty());

  let patch = PersonPatch { name: Some("back".into()), ..Default::default() };
  assert!(s.update(uuid, patch).await.unwrap().is_empty());

  let all = s.list().await.unwrap();
  assert_eq!(all.row_count, 1);
  assert_eq!(all.rows[0].name, "kept");
}

#[tokio::test]
async fn delete_twice_affects_nothing_the_second_time() {
  let s = store().await;
  let uuid = s.insert(passenger("a")).await.unwrap().rows[0].uuid;

  assert_eq!(s.delete(uuid).await.unwrap().row_count, 1);
  assert_eq!(s.delete(uuid).await.unwrap().row_count, 0);
}

#[tokio::test]
async fn delete_missing_affects_nothing() {
  let s = store().await;
  assert_eq!(s.delete(Uuid::nil()).await.unwrap().row_count, 0);
}

// ─── Persistence ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn reopening_a_file_store_keeps_records() {
  let dir = std::env::temp_dir().join(format!("people-store-{}", Uuid::new_v4()));
  std::fs::create_dir_all(&dir).unwrap();
  let path = dir.join("people.db");

  let uuid = {
    let s = SqliteStore::open(&path).await.unwrap();
    s.insert(passenger("durable")).await.unwrap().rows[0].uuid
  };

  let s = SqliteStore::open(&path).await.unwrap();
  let fetched = s.get(uuid).await.unwrap();
  assert_eq!(fetched.rows[0].name, "durable");

  drop(s);
  let _ = std::fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn deleted_uuid_stays_occupied_after_reopen() {
  let dir = std::env::temp_dir().join(format!("people-store-{}", Uuid::new_v4()));
  std::fs::create_dir_all(&dir).unwrap();
  let path = dir.join("people.db");

  let uuid = {
    let s = SqliteStore::open(&path).await.unwrap();
    let uuid = s.insert(passenger("gone")).await.unwrap().rows[0].uuid;
    assert_eq!(s.delete(uuid).await.unwrap().row_count, 1);
    uuid
  };

  // A raw insert reusing the deleted id must collide with the tombstone.
  let conn = rusqlite::Connection::open(&path).unwrap();
  let err = conn
    .execute(
      "INSERT INTO people (uuid, survived, pclass, name, sex, age,
         siblings_spouses_abroad, parents_children_abroad, fare,
         created_at, updated_at)
       VALUES (?1, 1, 3, 'again', 'female', 22.0, 0, 0, 7.25, ?2, ?2)",
      rusqlite::params![uuid.to_string(), "2024-01-01T00:00:00+00:00"],
    )
    .unwrap_err();
  assert!(
    matches!(
      &err,
      rusqlite::Error::SqliteFailure(e, _)
        if e.code == rusqlite::ErrorCode::ConstraintViolation
    ),
    "unexpected error: {err}"
  );
  drop(conn);

  let s = SqliteStore::open(&path).await.unwrap();
  assert!(s.get(uuid).await.unwrap().is_empty());
  assert!(s.list().await.unwrap().is_empty());

  drop(s);
  let _ = std::fs::remove_dir_all(&dir);
}
