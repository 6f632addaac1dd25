//! Error type for `kt-supabase`.

use kt_core::store::Table;
use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("invalid Supabase URL {url:?}: {reason}")]
  InvalidUrl { url: String, reason: String },

  #[error("http error: {0}")]
  Http(#[from] reqwest::Error),

  /// PostgREST answered with a non-2xx status; `body` carries its message.
  #[error("{table}: server returned {status}: {body}")]
  Status {
    table:  Table,
    status: StatusCode,
    body:   String,
  },

  #[error("{table}: unexpected row shape: {source}")]
  Decode {
    table:  Table,
    #[source]
    source: serde_json::Error,
  },

  /// An insert succeeded but the representation came back empty.
  #[error("{0}: insert returned no rows")]
  EmptyInsertResponse(Table),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
