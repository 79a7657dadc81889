use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::BracketError;
use crate::slot::{SlotArena, SlotId};

/// Position of a match in construction order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchId(pub usize);

impl fmt::Display for MatchId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BracketSide {
  Winners,
  Losers,
  Finals,
  Reset,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MatchState {
  /// Neither input is known yet.
  Pending,
  /// One input is known, the other is still being decided upstream.
  AwaitingOpponent,
  Ready,
  Decided,
}

/// A single match between two input slots.
///
/// The node never writes its inputs. Its state is recomputed from the arena
/// on every call, so upstream results show up here without any event.
#[derive(Clone, Debug)]
pub struct MatchNode {
  pub(crate) id: MatchId,
  pub(crate) side: BracketSide,
  pub(crate) round: u32,
  pub(crate) left: SlotId,
  pub(crate) right: SlotId,
  pub(crate) winner: SlotId,
  pub(crate) loser: SlotId,
}

impl MatchNode {
  pub fn id(&self) -> MatchId {
    self.id
  }

  pub fn side(&self) -> BracketSide {
    self.side
  }

  pub fn round(&self) -> u32 {
    self.round
  }

  pub fn left_slot(&self) -> SlotId {
    self.left
  }

  pub fn right_slot(&self) -> SlotId {
    self.right
  }

  pub fn winner_slot(&self) -> SlotId {
    self.winner
  }

  pub fn loser_slot(&self) -> SlotId {
    self.loser
  }

  pub fn label(&self) -> String {
    match self.side {
      BracketSide::Winners => format!("W{}", self.round),
      BracketSide::Losers => format!("L{}", self.round),
      BracketSide::Finals => "GF1".to_string(),
      BracketSide::Reset => "GF2".to_string(),
    }
  }

  pub fn state<C: Clone>(&self, slots: &SlotArena<C>) -> MatchState {
    if slots.is_bound(self.winner) {
      return MatchState::Decided;
    }
    match (slots.is_bound(self.left), slots.is_bound(self.right)) {
      (true, true) => MatchState::Ready,
      (false, false) => MatchState::Pending,
      _ => MatchState::AwaitingOpponent,
    }
  }

  pub fn is_ready<C: Clone>(&self, slots: &SlotArena<C>) -> bool {
    self.state(slots) == MatchState::Ready
  }

  /// Current `[left, right]` competitors.
  pub fn participants<C: Clone>(&self, slots: &SlotArena<C>) -> [Option<C>; 2] {
    [slots.read(self.left), slots.read(self.right)]
  }

  pub fn winner<C: Clone>(&self, slots: &SlotArena<C>) -> Option<C> {
    slots.read(self.winner)
  }

  pub fn loser<C: Clone>(&self, slots: &SlotArena<C>) -> Option<C> {
    slots.read(self.loser)
  }

  pub fn involves<C: Clone + PartialEq>(&self, slots: &SlotArena<C>, competitor: &C) -> bool {
    slots.get(self.left) == Some(competitor) || slots.get(self.right) == Some(competitor)
  }

  /// Record `competitor` as the winner and bind the loser slot to the other side.
  ///
  /// Everything is validated before either output is written, so a failed
  /// call leaves the arena untouched. Returns the loser.
  pub fn resolve<C: Clone + PartialEq>(
    &self,
    slots: &mut SlotArena<C>,
    competitor: &C,
  ) -> Result<C, BracketError> {
    if self.state(slots) != MatchState::Ready {
      return Err(BracketError::NotReady { match_id: self.id });
    }
    if slots.is_bound(self.loser) {
      return Err(BracketError::InvalidRebind { slot: self.loser });
    }
    let (left, right) = match (slots.get(self.left), slots.get(self.right)) {
      (Some(left), Some(right)) => (left.clone(), right.clone()),
      _ => return Err(BracketError::NotReady { match_id: self.id }),
    };
    let (winner, loser) = if *competitor == left {
      (left, right)
    } else if *competitor == right {
      (right, left)
    } else {
      return Err(BracketError::UnknownCompetitor { match_id: self.id });
    };
    slots.bind(self.winner, winner)?;
    slots.bind(self.loser, loser.clone())?;
    Ok(loser)
  }
}
