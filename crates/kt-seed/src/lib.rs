//! Sample-data seeding for the Kill Team match log.
//!
//! Reads the reference tables, makes sure a fixed roster of players exists,
//! then inserts a batch of randomized games through any
//! [`kt_core::store::DataStore`].

pub mod config;
pub mod error;
pub mod generator;
pub mod reference;

pub use config::SeedConfig;
pub use error::{Error, Result};
pub use generator::{GenerationSummary, GeneratorOptions, MatchFailure, MockDataGenerator};
pub use reference::ReferenceData;

use kt_core::store::DataStore;
use rand::Rng;

/// Run one seeding pass: load reference data, pick the kill-teams to cycle
/// through, ensure the configured players exist and generate `config.count`
/// games.
///
/// Reference and player failures abort the run. Per-game failures are
/// collected in the returned summary.
pub async fn seed<S, R>(
  store: &S,
  config: &SeedConfig,
  rng: R,
) -> Result<GenerationSummary>
where
  S: DataStore,
  R: Rng,
{
  let reference = ReferenceData::load(store).await?;
  let missing = reference.missing();
  if !missing.is_empty() {
    tracing::warn!(
      ?missing,
      "some reference data is missing, continuing anyway"
    );
  }

  let killteams = generator::select_killteams(
    &reference.killteams,
    &config.killteams,
    config.killteam_limit,
  );
  let names: Vec<&str> = killteams.iter().map(|kt| kt.name.as_str()).collect();
  tracing::info!(killteams = ?names, "using killteams");

  let options = GeneratorOptions {
    max_days_ago: config.max_days_ago,
    ..GeneratorOptions::default()
  };
  let mut generator = MockDataGenerator::new(store, rng).with_options(options);

  tracing::info!("creating players");
  let players = generator.ensure_players(&config.players).await?;
  tracing::info!(total = players.len(), "players ready");

  tracing::info!(count = config.count, "creating games");
  let summary = generator
    .generate_matches(config.count, &players, &killteams, &reference)
    .await;
  tracing::info!(
    created = summary.created,
    failed = summary.failures.len(),
    "successfully created {} games",
    summary.created
  );
  Ok(summary)
}

/// Decide whether a finished run counts as a success: a run that was asked
/// for games but created none is an error. Partial failures are not.
pub fn check_outcome(count: usize, summary: &GenerationSummary) -> Result<()> {
  if count > 0 && summary.created == 0 {
    return Err(Error::NothingCreated { attempted: count });
  }
  Ok(())
}
