//! The `DataStore` trait and the tables it exposes.
//!
//! The trait is implemented by storage backends (e.g. `kt-supabase`). The
//! seeding tool depends on this abstraction, not on any concrete backend.

use std::{fmt, future::Future};

use serde::{Serialize, de::DeserializeOwned};

// ─── Tables ──────────────────────────────────────────────────────────────────

/// The tables the match log reads from or writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
  Countries,
  Killzones,
  Critops,
  Tacops,
  Killteams,
  Players,
  Games,
}

impl Table {
  /// The table name as it appears in the database.
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Countries => "countries",
      Self::Killzones => "killzones",
      Self::Critops => "critops",
      Self::Tacops => "tacops",
      Self::Killteams => "killteams",
      Self::Players => "players",
      Self::Games => "games",
    }
  }
}

impl fmt::Display for Table {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over the hosted database that owns the match log.
///
/// Rows are flat column maps on the wire; implementations decode them into the
/// caller's record type and report a shape mismatch as an error rather than
/// handing back loose JSON.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes.
pub trait DataStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Fetch every row of `table`.
  fn select_all<T>(
    &self,
    table: Table,
  ) -> impl Future<Output = Result<Vec<T>, Self::Error>> + Send + '_
  where
    T: DeserializeOwned + Send + 'static;

  /// Fetch the rows of `table` whose `column` equals `value` exactly.
  fn select_where<'a, T>(
    &'a self,
    table: Table,
    column: &'a str,
    value: &'a str,
  ) -> impl Future<Output = Result<Vec<T>, Self::Error>> + Send + 'a
  where
    T: DeserializeOwned + Send + 'static;

  /// Insert `row` into `table` and return the created row, including the
  /// identifier the store assigned.
  fn insert<'a, R, T>(
    &'a self,
    table: Table,
    row: &'a R,
  ) -> impl Future<Output = Result<T, Self::Error>> + Send + 'a
  where
    R: Serialize + Sync + ?Sized + 'a,
    T: DeserializeOwned + Send + 'static;
}
