//! Error type for `kt-seed`.

use kt_core::store::Table;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("missing required setting `{0}`")]
  MissingSetting(&'static str),

  #[error("invalid setting `{key}`: {reason}")]
  InvalidSetting { key: &'static str, reason: String },

  #[error("config error: {0}")]
  Config(#[from] config::ConfigError),

  #[error("failed to load `{table}`: {source}")]
  Reference {
    table:  Table,
    #[source]
    source: Box<dyn std::error::Error + Send + Sync>,
  },

  #[error("no games were created ({attempted} attempted)")]
  NothingCreated { attempted: usize },

  #[error("failed to ensure player {name:?}: {source}")]
  Player {
    name:   String,
    #[source]
    source: Box<dyn std::error::Error + Send + Sync>,
  },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
