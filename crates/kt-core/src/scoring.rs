//! Primary op scoring.
//!
//! A player's primary op is worth half of the matching op score, rounded up.

use crate::record::{PrimaryOp, SideScores};

/// Score the declared primary op: `ceil(score / 2)` of the op score that
/// matches `category`. The other two scores do not contribute.
pub fn score_primary_objective(category: PrimaryOp, scores: SideScores) -> u8 {
  scores.for_op(category).div_ceil(2)
}

/// Untyped variant for category names read off the wire. Anything other than
/// `TacOp`, `CritOp` or `KillOp` scores 0.
pub fn score_primary_objective_str(category: &str, scores: SideScores) -> u8 {
  category
    .parse::<PrimaryOp>()
    .map(|op| score_primary_objective(op, scores))
    .unwrap_or(0)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::record::MAX_OP_SCORE;

  #[test]
  fn halves_matching_score_rounding_up() {
    let expected = [0, 1, 1, 2, 2, 3, 3];
    for score in 0..=MAX_OP_SCORE {
      let want = expected[score as usize];
      let tac = SideScores { tacop: score, critop: 0, killop: 0 };
      let crit = SideScores { tacop: 0, critop: score, killop: 0 };
      let kill = SideScores { tacop: 0, critop: 0, killop: score };
      assert_eq!(score_primary_objective(PrimaryOp::TacOp, tac), want);
      assert_eq!(score_primary_objective(PrimaryOp::CritOp, crit), want);
      assert_eq!(score_primary_objective(PrimaryOp::KillOp, kill), want);
    }
  }

  #[test]
  fn ignores_non_matching_scores() {
    for category in PrimaryOp::ALL {
      for own in 0..=MAX_OP_SCORE {
        let mut baseline = SideScores::default();
        match category {
          PrimaryOp::TacOp => baseline.tacop = own,
          PrimaryOp::CritOp => baseline.critop = own,
          PrimaryOp::KillOp => baseline.killop = own,
        }
        let expected = score_primary_objective(category, baseline);

        for a in 0..=MAX_OP_SCORE {
          for b in 0..=MAX_OP_SCORE {
            let scores = match category {
              PrimaryOp::TacOp => SideScores { tacop: own, critop: a, killop: b },
              PrimaryOp::CritOp => SideScores { tacop: a, critop: own, killop: b },
              PrimaryOp::KillOp => SideScores { tacop: a, critop: b, killop: own },
            };
            assert_eq!(score_primary_objective(category, scores), expected);
          }
        }
      }
    }
  }

  #[test]
  fn unknown_category_scores_zero() {
    let scores = SideScores { tacop: 6, critop: 6, killop: 6 };
    assert_eq!(score_primary_objective_str("TacOp", scores), 3);
    assert_eq!(score_primary_objective_str("Primary", scores), 0);
    assert_eq!(score_primary_objective_str("killop", scores), 0);
    assert_eq!(score_primary_objective_str("", scores), 0);
  }
}
