//! SQL schema for the people SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- Rows are never physically removed. A delete sets deleted_at, which keeps
-- the uuid occupied so it can never be assigned again.
CREATE TABLE IF NOT EXISTS people (
    uuid                    TEXT PRIMARY KEY,
    survived                INTEGER NOT NULL CHECK (survived IN (0, 1)),
    pclass                  INTEGER NOT NULL,
    name                    TEXT    NOT NULL,
    sex                     TEXT    NOT NULL,
    age                     REAL    NOT NULL,
    siblings_spouses_abroad INTEGER NOT NULL,
    parents_children_abroad INTEGER NOT NULL,
    fare                    REAL    NOT NULL,
    created_at              TEXT    NOT NULL,   -- ISO 8601 UTC; server-assigned
    updated_at              TEXT    NOT NULL,
    deleted_at              TEXT                -- NULL while present
);

CREATE INDEX IF NOT EXISTS people_deleted_idx ON people(deleted_at);

PRAGMA user_version = 1;
";
