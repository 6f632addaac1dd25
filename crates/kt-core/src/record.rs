//! Record types for the match log.
//!
//! Reference rows and players are owned by the hosted database and only read
//! here. Games are composed locally and submitted once; nothing in this crate
//! ever updates or deletes a row.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

// ─── Identifiers ─────────────────────────────────────────────────────────────

/// A row identifier assigned by the data store.
///
/// Reference tables use integer keys; the untagged text variant keeps the
/// decoder working against tables keyed by UUID or other text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
  Int(i64),
  Text(String),
}

impl fmt::Display for RecordId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Int(id) => write!(f, "{id}"),
      Self::Text(id) => f.write_str(id),
    }
  }
}

impl From<i64> for RecordId {
  fn from(id: i64) -> Self { Self::Int(id) }
}

// ─── Reference data ──────────────────────────────────────────────────────────

/// A named row from one of the reference tables (countries, killzones,
/// critops, tacops, killteams).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceItem {
  pub id:   RecordId,
  pub name: String,
}

// ─── Players ─────────────────────────────────────────────────────────────────

/// A player identity. `playertag` is unique across the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
  pub id:        RecordId,
  pub playertag: String,
}

/// Insert payload for the `players` table; the id is assigned by the store.
#[derive(Debug, Clone, Serialize)]
pub struct NewPlayer {
  pub playertag: String,
}

// ─── Scoring inputs ──────────────────────────────────────────────────────────

/// Highest value any single op score can take.
pub const MAX_OP_SCORE: u8 = 6;

/// The scoring mode a player declares as their primary op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrimaryOp {
  TacOp,
  CritOp,
  KillOp,
}

impl PrimaryOp {
  pub const ALL: [PrimaryOp; 3] = [Self::TacOp, Self::CritOp, Self::KillOp];

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::TacOp => "TacOp",
      Self::CritOp => "CritOp",
      Self::KillOp => "KillOp",
    }
  }
}

impl fmt::Display for PrimaryOp {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for PrimaryOp {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    match s {
      "TacOp" => Ok(Self::TacOp),
      "CritOp" => Ok(Self::CritOp),
      "KillOp" => Ok(Self::KillOp),
      other => Err(Error::InvalidPrimaryOp(other.to_owned())),
    }
  }
}

/// The three raw op scores one player earned in a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SideScores {
  pub tacop:  u8,
  pub critop: u8,
  pub killop: u8,
}

impl SideScores {
  /// Build a score triple, rejecting any value above [`MAX_OP_SCORE`].
  pub fn new(tacop: u8, critop: u8, killop: u8) -> Result<Self> {
    for score in [tacop, critop, killop] {
      if score > MAX_OP_SCORE {
        return Err(Error::ScoreOutOfRange(score));
      }
    }
    Ok(Self { tacop, critop, killop })
  }

  /// The raw score that the given primary op is derived from.
  pub fn for_op(&self, op: PrimaryOp) -> u8 {
    match op {
      PrimaryOp::TacOp => self.tacop,
      PrimaryOp::CritOp => self.critop,
      PrimaryOp::KillOp => self.killop,
    }
  }
}

// ─── Games ───────────────────────────────────────────────────────────────────

/// Everything recorded for one player in a game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSide {
  pub player_id:        RecordId,
  pub killteam_id:      RecordId,
  pub tacop_id:         RecordId,
  pub scores:           SideScores,
  pub primary_op:       PrimaryOp,
  pub primary_op_score: u8,
}

impl GameSide {
  /// Victory points: the three op scores plus the primary op bonus.
  pub fn total(&self) -> u32 {
    u32::from(self.scores.tacop)
      + u32::from(self.scores.critop)
      + u32::from(self.scores.killop)
      + u32::from(self.primary_op_score)
  }
}

/// A game ready to be inserted into the `games` table.
///
/// Serialises to the flat `player1_*` / `player2_*` column layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGame {
  pub country_id:  RecordId,
  pub killzone_id: RecordId,
  pub map_layout:  Option<String>,
  pub critop_id:   RecordId,
  pub player1:     GameSide,
  pub player2:     GameSide,
  pub created_at:  DateTime<Utc>,
}

/// Wire shape of a `games` row.
#[derive(Serialize)]
struct GameRow<'a> {
  country_id:               &'a RecordId,
  killzone_id:              &'a RecordId,
  map_layout:               Option<&'a str>,
  critop_id:                &'a RecordId,
  player1_id:               &'a RecordId,
  player1_killteam_id:      &'a RecordId,
  player1_tacop_id:         &'a RecordId,
  player1_tacop_score:      u8,
  player1_critop_score:     u8,
  player1_killop_score:     u8,
  player1_primary_op:       PrimaryOp,
  player1_primary_op_score: u8,
  player2_id:               &'a RecordId,
  player2_killteam_id:      &'a RecordId,
  player2_tacop_id:         &'a RecordId,
  player2_tacop_score:      u8,
  player2_critop_score:     u8,
  player2_killop_score:     u8,
  player2_primary_op:       PrimaryOp,
  player2_primary_op_score: u8,
  created_at:               String,
}

impl Serialize for NewGame {
  fn serialize<S: serde::Serializer>(
    &self,
    serializer: S,
  ) -> std::result::Result<S::Ok, S::Error> {
    let (p1, p2) = (&self.player1, &self.player2);
    GameRow {
      country_id:               &self.country_id,
      killzone_id:              &self.killzone_id,
      map_layout:               self.map_layout.as_deref(),
      critop_id:                &self.critop_id,
      player1_id:               &p1.player_id,
      player1_killteam_id:      &p1.killteam_id,
      player1_tacop_id:         &p1.tacop_id,
      player1_tacop_score:      p1.scores.tacop,
      player1_critop_score:     p1.scores.critop,
      player1_killop_score:     p1.scores.killop,
      player1_primary_op:       p1.primary_op,
      player1_primary_op_score: p1.primary_op_score,
      player2_id:               &p2.player_id,
      player2_killteam_id:      &p2.killteam_id,
      player2_tacop_id:         &p2.tacop_id,
      player2_tacop_score:      p2.scores.tacop,
      player2_critop_score:     p2.scores.critop,
      player2_killop_score:     p2.scores.killop,
      player2_primary_op:       p2.primary_op,
      player2_primary_op_score: p2.primary_op_score,
      created_at:               self.created_at.to_rfc3339(),
    }
    .serialize(serializer)
  }
}

/// The row echoed back by the store after a game insert. Only the id is
/// decoded; the remaining columns are whatever was submitted.
#[derive(Debug, Clone, Deserialize)]
pub struct Game {
  pub id: RecordId,
}
