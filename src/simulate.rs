//! Seeded auto-play for exercising a bracket end to end.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, warn};

use crate::error::BracketError;
use crate::match_node::MatchId;
use crate::replay::DecisionLog;
use crate::tournament::{Competitor, Tournament};

/// Plays matches in construction order. Better seeds win more often: each
/// side's weight is the inverse of its seed.
pub struct Simulation {
  rng: StdRng,
}

impl Simulation {
  pub fn new(seed: u64) -> Self {
    Simulation {
      rng: StdRng::seed_from_u64(seed),
    }
  }

  /// 0 for the left side, 1 for the right.
  pub fn pick_winner(&mut self, left_seed: usize, right_seed: usize) -> usize {
    let weight_left = 1.0 / left_seed.max(1) as f64;
    let weight_right = 1.0 / right_seed.max(1) as f64;
    let roll = self.rng.gen::<f64>() * (weight_left + weight_right);
    if roll < weight_left { 0 } else { 1 }
  }

  /// Decide the first playable match. `None` once nothing is playable.
  pub fn step<C: Competitor>(
    &mut self,
    tournament: &mut Tournament<C>,
  ) -> Result<Option<MatchId>, BracketError> {
    let Some(match_id) = tournament.active_matches().first().map(|node| node.id()) else {
      return Ok(None);
    };
    let [Some(left), Some(right)] = tournament.participants(match_id)? else {
      return Err(BracketError::NotReady { match_id });
    };
    let left_seed = tournament.seed_of(&left).unwrap_or(usize::MAX);
    let right_seed = tournament.seed_of(&right).unwrap_or(usize::MAX);
    let winner = if self.pick_winner(left_seed, right_seed) == 0 { left } else { right };
    tournament.resolve(match_id, &winner)?;
    Ok(Some(match_id))
  }

  /// Play until the tournament is over and return the decisions made here.
  pub fn run<C: Competitor>(
    &mut self,
    tournament: &mut Tournament<C>,
  ) -> Result<DecisionLog<C>, BracketError> {
    // Every match is decided at most once.
    let limit = tournament.match_count();
    self.run_limited(tournament, limit)
  }

  /// Play at most `limit` matches. Fails with `StepLimit` if the tournament
  /// still has playable matches afterwards.
  pub fn run_limited<C: Competitor>(
    &mut self,
    tournament: &mut Tournament<C>,
    limit: usize,
  ) -> Result<DecisionLog<C>, BracketError> {
    let start = tournament.decisions().len();
    let mut played = 0;
    while played < limit {
      if self.step(tournament)?.is_none() {
        debug!(played, champion = ?tournament.champion(), "simulation finished");
        return Ok(tournament.decisions().iter().skip(start).cloned().collect());
      }
      played += 1;
    }
    if !tournament.active_matches().is_empty() {
      warn!(limit, pending = tournament.active_matches().len(), "simulation hit its step limit");
      return Err(BracketError::StepLimit { limit });
    }
    debug!(played, champion = ?tournament.champion(), "simulation finished");
    Ok(tournament.decisions().iter().skip(start).cloned().collect())
  }
}
