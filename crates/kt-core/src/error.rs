//! Error types for `kt-core`.

use thiserror::Error;

use crate::store::Table;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unknown primary op: {0:?}")]
  InvalidPrimaryOp(String),

  #[error("op score {0} is outside 0..=6")]
  ScoreOutOfRange(u8),

  #[error("need at least two distinct players to compose a game, have {0}")]
  NotEnoughPlayers(usize),

  #[error("reference table `{0}` is empty")]
  EmptyReference(Table),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
