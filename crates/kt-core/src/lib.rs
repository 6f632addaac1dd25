//! Core types and trait definitions for the Kill Team match log.
//!
//! This crate is deliberately free of HTTP dependencies. The store backend
//! (`kt-supabase`) and the seeding tool (`kt-seed`) both depend on it.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod error;
pub mod record;
pub mod scoring;
pub mod store;

pub use error::{Error, Result};
