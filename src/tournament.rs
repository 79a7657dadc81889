use std::fmt::Debug;
use std::hash::Hash;

use serde::Serialize;
use tracing::{debug, info};

use crate::builder::{build_bracket, Bracket};
use crate::config::{BracketConfig, BracketSettings};
use crate::error::{BracketError, ConfigError};
use crate::match_node::{BracketSide, MatchId, MatchNode, MatchState};
use crate::replay::{Decision, DecisionLog};
use crate::slot::SlotArena;

/// Identity of an entrant. Only equality and hashing are relied on; two
/// entrants comparing equal is undefined behaviour for the bracket.
pub trait Competitor: Clone + Eq + Hash + Debug {}

impl<T: Clone + Eq + Hash + Debug> Competitor for T {}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchSnapshot<C> {
  pub id: MatchId,
  pub label: String,
  pub side: BracketSide,
  pub round: u32,
  pub state: MatchState,
  pub left: Option<C>,
  pub right: Option<C>,
  pub winner: Option<C>,
  pub loser: Option<C>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TournamentSnapshot<C> {
  pub bracket_reset: bool,
  pub complete: bool,
  pub champion: Option<C>,
  pub matches: Vec<MatchSnapshot<C>>,
}

/// A double elimination tournament driven by an external coordinator.
///
/// The match graph is fixed at construction. Afterwards only slot contents
/// change, one [`Tournament::resolve`] at a time.
#[derive(Clone, Debug)]
pub struct Tournament<C> {
  bracket: Bracket<C>,
  bracket_reset: bool,
  decisions: DecisionLog<C>,
}

impl<C: Competitor> Tournament<C> {
  /// Build a bracket with the reset match enabled. `competitors` is ordered best seed first.
  pub fn new(competitors: Vec<C>) -> Result<Self, BracketError> {
    Self::with_settings(competitors, &BracketSettings::default())
  }

  pub fn with_settings(competitors: Vec<C>, settings: &BracketSettings) -> Result<Self, BracketError> {
    let count = competitors.len();
    let bracket = build_bracket(competitors, settings.bracket_reset)?;
    info!(
      competitors = count,
      bracket_size = bracket.bracket_size(),
      byes = bracket.byes(),
      matches = bracket.matches().len(),
      bracket_reset = settings.bracket_reset,
      "tournament created"
    );
    Ok(Tournament {
      bracket,
      bracket_reset: settings.bracket_reset,
      decisions: DecisionLog::new(),
    })
  }

  /// Rebuild the tournament and re-apply `log` in order.
  ///
  /// Stops at the first decision that no longer applies.
  pub fn replay(
    competitors: Vec<C>,
    settings: &BracketSettings,
    log: &DecisionLog<C>,
  ) -> Result<Self, BracketError> {
    let mut tournament = Self::with_settings(competitors, settings)?;
    for decision in log {
      tournament.apply(decision.clone())?;
    }
    debug!(decisions = log.len(), "replayed decision log");
    Ok(tournament)
  }

  /// Every match in construction order.
  pub fn list_matches(&self) -> &[MatchNode] {
    self.bracket.matches()
  }

  pub fn match_count(&self) -> usize {
    self.bracket.matches().len()
  }

  pub fn get(&self, match_id: MatchId) -> Result<&MatchNode, BracketError> {
    self
      .bracket
      .matches()
      .get(match_id.0)
      .ok_or(BracketError::UnknownMatch { match_id })
  }

  pub fn state(&self, match_id: MatchId) -> Result<MatchState, BracketError> {
    Ok(self.get(match_id)?.state(self.slots()))
  }

  pub fn participants(&self, match_id: MatchId) -> Result<[Option<C>; 2], BracketError> {
    Ok(self.get(match_id)?.participants(self.slots()))
  }

  pub fn slots(&self) -> &SlotArena<C> {
    self.bracket.slots()
  }

  pub fn finals(&self) -> MatchId {
    self.bracket.finals()
  }

  pub fn reset_match(&self) -> Option<MatchId> {
    self.bracket.reset()
  }

  pub fn bracket_reset(&self) -> bool {
    self.bracket_reset
  }

  /// The seeded field, best seed first.
  pub fn competitors(&self) -> Vec<C> {
    self
      .bracket
      .seeded_slots()
      .iter()
      .filter_map(|slot| self.slots().read(*slot))
      .collect()
  }

  /// 1-based seed of `competitor`.
  pub fn seed_of(&self, competitor: &C) -> Option<usize> {
    self
      .bracket
      .seeded_slots()
      .iter()
      .position(|slot| self.slots().get(*slot) == Some(competitor))
      .map(|index| index + 1)
  }

  /// Matches that can be played right now, in construction order.
  pub fn active_matches(&self) -> Vec<&MatchNode> {
    self
      .bracket
      .matches()
      .iter()
      .filter(|node| node.is_ready(self.slots()))
      .collect()
  }

  pub fn active_matches_for(&self, competitor: &C) -> Vec<&MatchNode> {
    self
      .active_matches()
      .into_iter()
      .filter(|node| node.involves(self.slots(), competitor))
      .collect()
  }

  pub fn active_match_for(&self, competitor: &C) -> Option<MatchId> {
    self
      .active_matches_for(competitor)
      .first()
      .map(|node| node.id())
  }

  /// Record `competitor` as the winner of `match_id`.
  ///
  /// When the finals go to the winner's-bracket champion the reset match is
  /// a formality and is decided here as well.
  pub fn resolve(&mut self, match_id: MatchId, competitor: &C) -> Result<(), BracketError> {
    self.apply(Decision::new(match_id, competitor.clone()))
  }

  /// Resolve the playable match `competitor` is in. Returns the match that was decided.
  pub fn add_win(&mut self, competitor: &C) -> Result<MatchId, BracketError> {
    let match_id = self
      .active_match_for(competitor)
      .ok_or(BracketError::NoActiveMatch)?;
    self.resolve(match_id, competitor)?;
    Ok(match_id)
  }

  fn apply(&mut self, decision: Decision<C>) -> Result<(), BracketError> {
    let match_id = decision.match_id;
    let node = self
      .bracket
      .matches
      .get(match_id.0)
      .ok_or(BracketError::UnknownMatch { match_id })?;
    let loser = match node.resolve(&mut self.bracket.slots, &decision.winner) {
      Ok(loser) => loser,
      Err(err) => {
        debug!(label = %node.label(), winner = ?decision.winner, %err, "result rejected");
        return Err(err);
      }
    };
    debug!(label = %node.label(), winner = ?decision.winner, loser = ?loser, "match decided");

    if match_id == self.bracket.finals() {
      self.settle_reset()?;
    }
    self.decisions.push(decision);

    if let Some(champion) = self.champion() {
      info!(champion = ?champion, "tournament complete");
    }
    Ok(())
  }

  /// Auto-decide the reset match when the winner's-bracket champion took the finals.
  fn settle_reset(&mut self) -> Result<(), BracketError> {
    let Some(reset) = self.bracket.reset() else {
      return Ok(());
    };
    let finals = &self.bracket.matches[self.bracket.finals().0];
    let slots = &self.bracket.slots;
    let (Some(winner), Some(upper_champion)) = (slots.read(finals.winner), slots.read(finals.left)) else {
      return Ok(());
    };
    if winner != upper_champion {
      debug!(challenger = ?winner, "loser's bracket champion forced a reset match");
      return Ok(());
    }
    let node = &self.bracket.matches[reset.0];
    node.resolve(&mut self.bracket.slots, &winner)?;
    info!(winner = ?winner, "winner's bracket champion took the finals; reset match skipped");
    Ok(())
  }

  pub fn decisions(&self) -> &DecisionLog<C> {
    &self.decisions
  }

  pub fn is_complete(&self) -> bool {
    self.champion().is_some()
  }

  pub fn champion(&self) -> Option<C> {
    self.slots().read(self.bracket.champion_slot())
  }

  /// `None` while any match is still playable, otherwise the champion.
  pub fn winners(&self) -> Option<Vec<C>> {
    if !self.active_matches().is_empty() {
      return None;
    }
    self.champion().map(|champion| vec![champion])
  }

  pub fn snapshot(&self) -> TournamentSnapshot<C> {
    let slots = self.slots();
    let matches = self
      .bracket
      .matches()
      .iter()
      .map(|node| {
        let [left, right] = node.participants(slots);
        MatchSnapshot {
          id: node.id(),
          label: node.label(),
          side: node.side(),
          round: node.round(),
          state: node.state(slots),
          left,
          right,
          winner: node.winner(slots),
          loser: node.loser(slots),
        }
      })
      .collect();
    TournamentSnapshot {
      bracket_reset: self.bracket_reset,
      complete: self.is_complete(),
      champion: self.champion(),
      matches,
    }
  }
}

impl Tournament<String> {
  pub fn from_config(config: &BracketConfig) -> Result<Self, ConfigError> {
    let competitors = config.competitors()?;
    Ok(Self::with_settings(competitors, &config.settings)?)
  }
}
