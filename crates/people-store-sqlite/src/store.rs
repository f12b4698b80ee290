//! [`SqliteStore`] — the SQLite implementation of [`PeopleStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::{OptionalExtension as _, types::Value};
use uuid::Uuid;

use people_core::{
  NewPerson, Person, PersonPatch, QueryResult, store::PeopleStore,
};

use crate::{
  Result,
  encode::{PERSON_COLUMNS, RawPerson, encode_dt, encode_patch, encode_uuid},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A people store backed by a single SQLite file.
///
/// Every statement runs on the one connection thread owned by
/// [`tokio_rusqlite::Connection`], so writes to the same record are applied
/// one at a time in arrival order.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── PeopleStore impl ────────────────────────────────────────────────────────

impl PeopleStore for SqliteStore {
  type Error = crate::Error;

  async fn list(&self) -> Result<QueryResult<Person>> {
    let raws: Vec<RawPerson> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {PERSON_COLUMNS} FROM people
           WHERE deleted_at IS NULL
           ORDER BY rowid"
        ))?;
        let rows = stmt
          .query_map([], RawPerson::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    let people = raws
      .into_iter()
      .map(RawPerson::into_person)
      .collect::<Result<Vec<_>>>()?;
    Ok(QueryResult::from_rows(people))
  }

  async fn insert(&self, input: NewPerson) -> Result<QueryResult<Person>> {
    let person = input.into_person(Uuid::new_v4());

    let id_str = encode_uuid(person.uuid);
    let at_str = encode_dt(Utc::now());
    let row    = person.clone();

    // A uuid collision, including with a deleted row, fails the primary key
    // constraint rather than overwriting anything.
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO people (
             uuid, survived, pclass, name, sex, age,
             siblings_spouses_abroad, parents_children_abroad, fare,
             created_at, updated_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?10)",
          rusqlite::params![
            id_str,
            row.survived,
            row.pclass,
            row.name,
            row.sex,
            row.age,
            row.siblings_spouses_abroad,
            row.parents_children_abroad,
            row.fare,
            at_str,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(QueryResult::from_rows(vec![person]))
  }

  async fn get(&self, uuid: Uuid) -> Result<QueryResult<Person>> {
    let id_str = encode_uuid(uuid);

    let raw: Option<RawPerson> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!(
                "SELECT {PERSON_COLUMNS} FROM people
                 WHERE uuid = ?1 AND deleted_at IS NULL"
              ),
              rusqlite::params![id_str],
              RawPerson::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    let rows = raw
      .map(RawPerson::into_person)
      .transpose()?
      .into_iter()
      .collect();
    Ok(QueryResult::from_rows(rows))
  }

  async fn update(
    &self,
    uuid:  Uuid,
    patch: PersonPatch,
  ) -> Result<QueryResult<Person>> {
    let id_str      = encode_uuid(uuid);
    let at_str      = encode_dt(Utc::now());
    let assignments = encode_patch(&patch);

    let raw: Option<RawPerson> = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        let exists: bool = tx
          .query_row(
            "SELECT 1 FROM people WHERE uuid = ?1 AND deleted_at IS NULL",
            rusqlite::params![id_str],
            |_| Ok(true),
          )
          .optional()?
          .unwrap_or(false);

        if !exists {
          return Ok(None);
        }

        // Build SET from the supplied fields only; an empty patch writes
        // nothing.
        if !assignments.is_empty() {
          let n = assignments.len();
          let mut sets: Vec<String> = assignments
            .iter()
            .enumerate()
            .map(|(i, (column, _))| format!("{column} = ?{}", i + 1))
            .collect();
          sets.push(format!("updated_at = ?{}", n + 1));

          let sql = format!(
            "UPDATE people SET {} WHERE uuid = ?{} AND deleted_at IS NULL",
            sets.join(", "),
            n + 2
          );

          let mut values: Vec<Value> =
            assignments.into_iter().map(|(_, v)| v).collect();
          values.push(Value::Text(at_str));
          values.push(Value::Text(id_str.clone()));

          tx.execute(&sql, rusqlite::params_from_iter(values))?;
        }

        let raw = tx.query_row(
          &format!("SELECT {PERSON_COLUMNS} FROM people WHERE uuid = ?1"),
          rusqlite::params![id_str],
          RawPerson::from_row,
        )?;

        tx.commit()?;
        Ok(Some(raw))
      })
      .await?;

    let rows = raw
      .map(RawPerson::into_person)
      .transpose()?
      .into_iter()
      .collect();
    Ok(QueryResult::from_rows(rows))
  }

  async fn delete(&self, uuid: Uuid) -> Result<QueryResult<Person>> {
    let id_str = encode_uuid(uuid);
    let at_str = encode_dt(Utc::now());

    let affected = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE people SET deleted_at = ?1, updated_at = ?1
           WHERE uuid = ?2 AND deleted_at IS NULL",
          rusqlite::params![at_str, id_str],
        )?)
      })
      .await?;

    Ok(QueryResult::affected(affected))
  }
}
