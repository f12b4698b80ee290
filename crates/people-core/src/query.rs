//! [`QueryResult`] — the `{ rows, rowCount }` envelope.
//!
//! Every store operation returns one, and the API serialises it unchanged as
//! the body of successful responses.

use serde::{Deserialize, Serialize};

/// Rows returned by a statement, plus the number of rows it returned or
/// affected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResult<T> {
  pub rows:      Vec<T>,
  pub row_count: usize,
}

impl<T> QueryResult<T> {
  /// A result whose `row_count` is the number of rows returned.
  pub fn from_rows(rows: Vec<T>) -> Self {
    let row_count = rows.len();
    Self { rows, row_count }
  }

  /// A result for a statement that returns no rows but affected `row_count`.
  pub fn affected(row_count: usize) -> Self {
    Self { rows: Vec::new(), row_count }
  }

  /// `true` if the statement neither returned nor affected any row.
  pub fn is_empty(&self) -> bool { self.row_count == 0 && self.rows.is_empty() }

  pub fn first(&self) -> Option<&T> { self.rows.first() }
}
