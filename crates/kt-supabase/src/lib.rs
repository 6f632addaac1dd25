//! Supabase backend for the Kill Team match log.
//!
//! Talks to the PostgREST endpoint that Supabase exposes under `/rest/v1`,
//! authenticating every request with the project's service-role key.

mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::{SupabaseConfig, SupabaseStore};

#[cfg(test)]
mod tests;
