//! Layered run configuration.
//!
//! Sources, lowest precedence first: an optional TOML file, `SEED_*`
//! environment variables, then command-line flags (which themselves fall back
//! to `SUPABASE_URL` / `SUPABASE_SERVICE_ROLE_KEY`).

use std::{collections::HashSet, path::Path};

use kt_supabase::SupabaseConfig;
use serde::Deserialize;

use crate::{
  Error, Result,
  generator::{DEFAULT_KILLTEAM_LIMIT, DEFAULT_KILLTEAMS, DEFAULT_PLAYERS},
};

/// Settings for one seeding run.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedConfig {
  /// Supabase project URL. Required.
  #[serde(default)]
  pub url:              Option<String>,
  /// Service-role key for the project. Required.
  #[serde(default)]
  pub service_role_key: Option<String>,

  /// Number of games to generate.
  #[serde(default = "default_count")]
  pub count:          usize,
  /// Playertags to look up or create.
  #[serde(default = "default_players")]
  pub players:        Vec<String>,
  /// Kill-team names to cycle through when present.
  #[serde(default = "default_killteams")]
  pub killteams:      Vec<String>,
  #[serde(default = "default_killteam_limit")]
  pub killteam_limit: usize,
  /// RNG seed for reproducible runs; random when unset.
  #[serde(default)]
  pub seed:           Option<u64>,
  #[serde(default = "default_max_days_ago")]
  pub max_days_ago:   u32,
}

fn default_count() -> usize { 20 }

fn default_players() -> Vec<String> {
  DEFAULT_PLAYERS.iter().map(|p| (*p).to_owned()).collect()
}

fn default_killteams() -> Vec<String> {
  DEFAULT_KILLTEAMS.iter().map(|k| (*k).to_owned()).collect()
}

fn default_killteam_limit() -> usize { DEFAULT_KILLTEAM_LIMIT }

fn default_max_days_ago() -> u32 { 14 }

/// Values taken from the command line; `None` leaves lower layers in charge.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
  pub url:              Option<String>,
  pub service_role_key: Option<String>,
  pub count:            Option<usize>,
  pub seed:             Option<u64>,
}

impl SeedConfig {
  /// Build the configuration from `file` (if given), the environment and
  /// `overrides`, then validate it.
  pub fn load(file: Option<&Path>, overrides: Overrides) -> Result<Self> {
    let mut builder = config::Config::builder();
    if let Some(path) = file {
      builder = builder.add_source(config::File::from(path));
    }

    let settings = builder
      .add_source(
        config::Environment::with_prefix("SEED")
          .try_parsing(true)
          .list_separator(",")
          .with_list_parse_key("players")
          .with_list_parse_key("killteams"),
      )
      .set_override_option("url", overrides.url)?
      .set_override_option("service_role_key", overrides.service_role_key)?
      .set_override_option("count", overrides.count.map(|c| c as u64))?
      .set_override_option("seed", overrides.seed)?
      .build()?;

    let cfg: SeedConfig = settings.try_deserialize()?;
    cfg.validate()?;
    Ok(cfg)
  }

  /// Check the settings that do not involve the data store.
  pub fn validate(&self) -> Result<()> {
    if self.players.len() < 2 {
      return Err(Error::InvalidSetting {
        key:    "players",
        reason: format!("need at least two players, got {}", self.players.len()),
      });
    }
    let mut seen = HashSet::new();
    if let Some(dup) = self.players.iter().find(|p| !seen.insert(p.as_str())) {
      return Err(Error::InvalidSetting {
        key:    "players",
        reason: format!("duplicate playertag {dup:?}"),
      });
    }
    if self.killteam_limit == 0 {
      return Err(Error::InvalidSetting {
        key:    "killteam_limit",
        reason: "must be at least 1".into(),
      });
    }
    Ok(())
  }

  /// The connection settings; fails when either credential is absent or
  /// blank.
  pub fn connection(&self) -> Result<SupabaseConfig> {
    let url = required(self.url.as_deref(), "SUPABASE_URL")?;
    let key =
      required(self.service_role_key.as_deref(), "SUPABASE_SERVICE_ROLE_KEY")?;
    Ok(SupabaseConfig::new(url, key))
  }
}

fn required<'a>(value: Option<&'a str>, name: &'static str) -> Result<&'a str> {
  value
    .map(str::trim)
    .filter(|v| !v.is_empty())
    .ok_or(Error::MissingSetting(name))
}
