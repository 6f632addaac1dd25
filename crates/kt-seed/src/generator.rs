//! Randomized game generation.
//!
//! Games are composed from the reference tables and a player roster, then
//! inserted one at a time. Kill-teams are assigned round-robin rather than
//! drawn at random: each game fills two team slots, so with `n` teams and at
//! least `3 * n` games every team appears at least three times.

use std::{collections::HashSet, fmt};

use chrono::{DateTime, Duration, Utc};
use kt_core::{
  record::{
    Game, GameSide, MAX_OP_SCORE, NewGame, NewPlayer, Player, PrimaryOp,
    ReferenceItem, SideScores,
  },
  scoring::score_primary_objective,
  store::{DataStore, Table},
};
use rand::{Rng, seq::IndexedRandom};

use crate::{Error, ReferenceData, Result};

/// Kill-teams the sample data is built around when they exist.
pub const DEFAULT_KILLTEAMS: [&str; 5] =
  ["Phobos Strike Team", "Kommandos", "Pathfinders", "Legionary", "Kasrkin"];

/// How many kill-teams the generator cycles through by default.
pub const DEFAULT_KILLTEAM_LIMIT: usize = 5;

/// Players created (or reused) by default.
pub const DEFAULT_PLAYERS: [&str; 8] = [
  "ShadowHunter",
  "IronFist",
  "StormBringer",
  "NightStalker",
  "BloodRaven",
  "SteelWolf",
  "ThunderStrike",
  "DarkReaper",
];

// ─── Options ─────────────────────────────────────────────────────────────────

/// Tunables for [`MockDataGenerator`].
#[derive(Debug, Clone)]
pub struct GeneratorOptions {
  /// Games are backdated by a whole number of days in `0..=max_days_ago`.
  pub max_days_ago: u32,
  /// Map layouts drawn uniformly; `None` entries leave the layout unset.
  pub map_layouts:  Vec<Option<String>>,
}

impl Default for GeneratorOptions {
  fn default() -> Self {
    // Six numbered layouts and two blanks: a quarter of games have no layout.
    let mut map_layouts: Vec<Option<String>> =
      (1..=6).map(|n| Some(n.to_string())).collect();
    map_layouts.extend([None, None]);
    Self {
      max_days_ago: 14,
      map_layouts,
    }
  }
}

// ─── Results ─────────────────────────────────────────────────────────────────

/// A game that could not be created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchFailure {
  /// Zero-based iteration index.
  pub index:  usize,
  pub reason: String,
}

/// Outcome of [`MockDataGenerator::generate_matches`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationSummary {
  pub created:  usize,
  pub failures: Vec<MatchFailure>,
}

/// A composed game plus the rows it was built from, for reporting.
#[derive(Debug, Clone)]
pub struct MatchDraft<'a> {
  pub game:      NewGame,
  pub player1:   &'a Player,
  pub player2:   &'a Player,
  pub killteam1: &'a ReferenceItem,
  pub killteam2: &'a ReferenceItem,
}

impl fmt::Display for MatchDraft<'_> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "{} ({}) {} vs {} {} ({})",
      self.player1.playertag,
      self.killteam1.name,
      self.game.player1.total(),
      self.game.player2.total(),
      self.player2.playertag,
      self.killteam2.name,
    )
  }
}

// ─── Kill-team selection ─────────────────────────────────────────────────────

/// Pick the kill-teams to cycle through: those named in `targets`, in
/// reference order. When fewer than `limit` of them exist, fall back to the
/// first `limit` kill-teams of the table.
pub fn select_killteams(
  all: &[ReferenceItem],
  targets: &[String],
  limit: usize,
) -> Vec<ReferenceItem> {
  let selected: Vec<ReferenceItem> = all
    .iter()
    .filter(|kt| targets.iter().any(|t| *t == kt.name))
    .cloned()
    .collect();

  if selected.len() >= limit {
    return selected;
  }

  tracing::warn!(
    found = selected.len(),
    wanted = limit,
    "only found {} of the target killteams",
    selected.len()
  );
  all.iter().take(limit).cloned().collect()
}

/// The two kill-teams used by game `index`: `teams[i % n]` and
/// `teams[(i + 1) % n]`.
pub fn killteams_for(
  index: usize,
  teams: &[ReferenceItem],
) -> Option<(&ReferenceItem, &ReferenceItem)> {
  let n = teams.len();
  if n == 0 {
    return None;
  }
  Some((&teams[index % n], &teams[(index + 1) % n]))
}

// ─── Generator ───────────────────────────────────────────────────────────────

/// Composes and inserts sample players and games through a [`DataStore`].
pub struct MockDataGenerator<'s, S, R> {
  store:   &'s S,
  rng:     R,
  now:     DateTime<Utc>,
  options: GeneratorOptions,
}

impl<'s, S, R> MockDataGenerator<'s, S, R>
where
  S: DataStore,
  R: Rng,
{
  pub fn new(store: &'s S, rng: R) -> Self {
    Self {
      store,
      rng,
      now: Utc::now(),
      options: GeneratorOptions::default(),
    }
  }

  pub fn with_options(mut self, options: GeneratorOptions) -> Self {
    self.options = options;
    self
  }

  /// Pin the instant games are backdated from.
  pub fn with_now(mut self, now: DateTime<Utc>) -> Self {
    self.now = now;
    self
  }

  // ── Players ───────────────────────────────────────────────────────────────

  /// Look up each name by exact `playertag` and create the player if it does
  /// not exist yet. Returns one player per name, in order.
  pub async fn ensure_players<N: AsRef<str>>(
    &self,
    names: &[N],
  ) -> Result<Vec<Player>> {
    let mut players = Vec::with_capacity(names.len());
    for name in names {
      let name = name.as_ref();
      let player_err = |e: S::Error| Error::Player {
        name:   name.to_owned(),
        source: Box::new(e),
      };

      let existing: Vec<Player> = self
        .store
        .select_where(Table::Players, "playertag", name)
        .await
        .map_err(player_err)?;

      let player = match existing.into_iter().next() {
        Some(player) => {
          tracing::info!(player = name, "player already exists");
          player
        }
        None => {
          let new = NewPlayer { playertag: name.to_owned() };
          let player: Player = self
            .store
            .insert(Table::Players, &new)
            .await
            .map_err(player_err)?;
          tracing::info!(player = name, id = %player.id, "created player");
          player
        }
      };
      players.push(player);
    }
    Ok(players)
  }

  // ── Games ─────────────────────────────────────────────────────────────────

  /// Compose game `index` without touching the store.
  pub fn compose_match<'a>(
    &mut self,
    index: usize,
    players: &'a [Player],
    killteams: &'a [ReferenceItem],
    reference: &ReferenceData,
  ) -> kt_core::Result<MatchDraft<'a>> {
    let country = pick(&mut self.rng, &reference.countries, Table::Countries)?;
    let killzone = pick(&mut self.rng, &reference.killzones, Table::Killzones)?;
    let critop = pick(&mut self.rng, &reference.critops, Table::Critops)?;
    let map_layout = self
      .options
      .map_layouts
      .choose(&mut self.rng)
      .cloned()
      .flatten();

    let (player1, player2) = self.pick_pair(players)?;

    let (killteam1, killteam2) = killteams_for(index, killteams)
      .ok_or(kt_core::Error::EmptyReference(Table::Killteams))?;

    let side1 = self.side(player1, killteam1, &reference.tacops)?;
    let side2 = self.side(player2, killteam2, &reference.tacops)?;

    let days_ago = self.rng.random_range(0..=self.options.max_days_ago);
    let created_at = self.now - Duration::days(i64::from(days_ago));

    Ok(MatchDraft {
      game: NewGame {
        country_id: country.id.clone(),
        killzone_id: killzone.id.clone(),
        map_layout,
        critop_id: critop.id.clone(),
        player1: side1,
        player2: side2,
        created_at,
      },
      player1,
      player2,
      killteam1,
      killteam2,
    })
  }

  /// Two players with different ids. Repeated roster entries count once.
  fn pick_pair<'a>(
    &mut self,
    players: &'a [Player],
  ) -> kt_core::Result<(&'a Player, &'a Player)> {
    let mut seen = HashSet::new();
    let distinct: Vec<&Player> =
      players.iter().filter(|p| seen.insert(&p.id)).collect();
    if distinct.len() < 2 {
      return Err(kt_core::Error::NotEnoughPlayers(distinct.len()));
    }
    let pair = rand::seq::index::sample(&mut self.rng, distinct.len(), 2);
    Ok((distinct[pair.index(0)], distinct[pair.index(1)]))
  }

  fn side(
    &mut self,
    player: &Player,
    killteam: &ReferenceItem,
    tacops: &[ReferenceItem],
  ) -> kt_core::Result<GameSide> {
    let tacop = pick(&mut self.rng, tacops, Table::Tacops)?;
    let scores = SideScores::new(
      self.rng.random_range(0..=MAX_OP_SCORE),
      self.rng.random_range(0..=MAX_OP_SCORE),
      self.rng.random_range(0..=MAX_OP_SCORE),
    )?;
    let primary_op = *PrimaryOp::ALL
      .choose(&mut self.rng)
      .unwrap_or(&PrimaryOp::TacOp);

    Ok(GameSide {
      player_id: player.id.clone(),
      killteam_id: killteam.id.clone(),
      tacop_id: tacop.id.clone(),
      scores,
      primary_op,
      primary_op_score: score_primary_objective(primary_op, scores),
    })
  }

  /// Compose and insert `count` games. A game that cannot be composed or
  /// inserted is recorded as a failure and the loop moves on.
  pub async fn generate_matches(
    &mut self,
    count: usize,
    players: &[Player],
    killteams: &[ReferenceItem],
    reference: &ReferenceData,
  ) -> GenerationSummary {
    let mut summary = GenerationSummary::default();

    for index in 0..count {
      let draft = match self.compose_match(index, players, killteams, reference) {
        Ok(draft) => draft,
        Err(e) => {
          summary.record_failure(index, e.to_string());
          continue;
        }
      };

      let inserted: Result<Game, S::Error> =
        self.store.insert(Table::Games, &draft.game).await;
      match inserted {
        Ok(game) => {
          summary.created += 1;
          tracing::info!(id = %game.id, "game {}: {draft}", summary.created);
        }
        Err(e) => summary.record_failure(index, e.to_string()),
      }
    }

    summary
  }
}

impl GenerationSummary {
  fn record_failure(&mut self, index: usize, reason: String) {
    tracing::warn!(index, "error creating game {}: {reason}", index + 1);
    self.failures.push(MatchFailure { index, reason });
  }
}

fn pick<'a, R: Rng>(
  rng: &mut R,
  items: &'a [ReferenceItem],
  table: Table,
) -> kt_core::Result<&'a ReferenceItem> {
  items
    .choose(rng)
    .ok_or(kt_core::Error::EmptyReference(table))
}

#[cfg(test)]
mod tests {
  use super::*;

  fn teams(names: &[&str]) -> Vec<ReferenceItem> {
    names
      .iter()
      .enumerate()
      .map(|(i, name)| ReferenceItem {
        id:   (i as i64 + 1).into(),
        name: (*name).to_owned(),
      })
      .collect()
  }

  fn targets(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| (*n).to_owned()).collect()
  }

  #[test]
  fn default_layouts_are_a_quarter_blank() {
    let layouts = GeneratorOptions::default().map_layouts;
    assert_eq!(layouts.len(), 8);
    assert_eq!(layouts.iter().filter(|l| l.is_none()).count(), 2);
  }

  #[test]
  fn select_keeps_targets_in_reference_order() {
    let all = teams(&[
      "Kasrkin",
      "Hearthkyn Salvagers",
      "Kommandos",
      "Pathfinders",
      "Legionary",
      "Phobos Strike Team",
    ]);
    let selected =
      select_killteams(&all, &targets(&DEFAULT_KILLTEAMS), DEFAULT_KILLTEAM_LIMIT);
    let names: Vec<_> = selected.iter().map(|kt| kt.name.as_str()).collect();
    assert_eq!(names, [
      "Kasrkin",
      "Kommandos",
      "Pathfinders",
      "Legionary",
      "Phobos Strike Team"
    ]);
  }

  #[test]
  fn select_falls_back_to_first_teams() {
    let all = teams(&["A", "B", "Kommandos", "C", "D", "E", "F"]);
    let selected =
      select_killteams(&all, &targets(&DEFAULT_KILLTEAMS), DEFAULT_KILLTEAM_LIMIT);
    let names: Vec<_> = selected.iter().map(|kt| kt.name.as_str()).collect();
    assert_eq!(names, ["A", "B", "Kommandos", "C", "D"]);
  }

  #[test]
  fn select_from_empty_table_is_empty() {
    assert!(select_killteams(&[], &targets(&DEFAULT_KILLTEAMS), 5).is_empty());
  }

  #[test]
  fn killteams_cycle_round_robin() {
    let all = teams(&["A", "B", "C", "D", "E"]);
    let pair = |i| {
      let (a, b) = killteams_for(i, &all).unwrap();
      (a.name.as_str(), b.name.as_str())
    };
    assert_eq!(pair(0), ("A", "B"));
    assert_eq!(pair(1), ("B", "C"));
    assert_eq!(pair(4), ("E", "A"));
    assert_eq!(pair(5), ("A", "B"));
    assert!(killteams_for(0, &[]).is_none());
  }

  #[test]
  fn single_team_plays_itself() {
    let all = teams(&["Solo"]);
    let (a, b) = killteams_for(3, &all).unwrap();
    assert_eq!(a, b);
  }
}
