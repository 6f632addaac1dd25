//! `insert-mock-data` — fill a Supabase project with sample Kill Team games.
//!
//! # Usage
//!
//! ```
//! SUPABASE_URL=https://xyz.supabase.co \
//! SUPABASE_SERVICE_ROLE_KEY=... \
//!   insert-mock-data --count 20
//! insert-mock-data --config seed.toml --seed 7
//! ```

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use kt_seed::{SeedConfig, config::Overrides};
use kt_supabase::SupabaseStore;
use rand::{SeedableRng, rngs::StdRng};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Insert randomized sample games into the match log")]
struct Cli {
  /// Path to an optional TOML configuration file.
  #[arg(short, long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// Supabase project URL.
  #[arg(long, env = "SUPABASE_URL")]
  url: Option<String>,

  /// Service-role key for the project.
  #[arg(long, env = "SUPABASE_SERVICE_ROLE_KEY", hide_env_values = true)]
  service_role_key: Option<String>,

  /// Number of games to generate.
  #[arg(short = 'n', long)]
  count: Option<usize>,

  /// RNG seed, for reproducible sample data.
  #[arg(long)]
  seed: Option<u64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let cfg = SeedConfig::load(cli.config.as_deref(), Overrides {
    url:              cli.url,
    service_role_key: cli.service_role_key,
    count:            cli.count,
    seed:             cli.seed,
  })
  .context("failed to load configuration")?;

  // Both credentials must be present before any request goes out.
  let connection = cfg.connection().context("incomplete configuration")?;
  let store =
    SupabaseStore::new(connection).context("failed to create Supabase client")?;

  let rng = match cfg.seed {
    Some(seed) => StdRng::seed_from_u64(seed),
    None => StdRng::from_os_rng(),
  };

  tracing::info!("starting mock data insertion");
  let summary = kt_seed::seed(&store, &cfg, rng)
    .await
    .context("mock data insertion aborted")?;

  kt_seed::check_outcome(cfg.count, &summary)?;

  tracing::info!("mock data insertion complete");
  Ok(())
}
