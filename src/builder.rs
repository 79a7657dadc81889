//! Double elimination bracket construction.
//!
//! The winner's bracket is a plain seeded single elimination. Every match's
//! loser slot is collected per round and becomes an entrant of the loser's
//! bracket, which is paired round by round with byes where counts are uneven.
//! Nothing here is played: slots are wired together and results flow later.

use tracing::debug;

use crate::error::BracketError;
use crate::match_node::{BracketSide, MatchId, MatchNode};
use crate::slot::{SlotArena, SlotId};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Entrant {
  Slot(SlotId),
  Bye,
}

impl Entrant {
  fn slot(self) -> Option<SlotId> {
    match self {
      Entrant::Slot(slot) => Some(slot),
      Entrant::Bye => None,
    }
  }
}

/// Fully wired bracket: every match in construction order plus the slots they share.
#[derive(Clone, Debug)]
pub struct Bracket<C> {
  pub(crate) slots: SlotArena<C>,
  pub(crate) matches: Vec<MatchNode>,
  pub(crate) finals: MatchId,
  pub(crate) reset: Option<MatchId>,
  pub(crate) champion: SlotId,
  pub(crate) seeded: Vec<SlotId>,
  pub(crate) bracket_size: usize,
  pub(crate) byes: usize,
}

impl<C> Bracket<C> {
  pub fn matches(&self) -> &[MatchNode] {
    &self.matches
  }

  pub fn slots(&self) -> &SlotArena<C> {
    &self.slots
  }

  pub fn finals(&self) -> MatchId {
    self.finals
  }

  pub fn reset(&self) -> Option<MatchId> {
    self.reset
  }

  pub fn champion_slot(&self) -> SlotId {
    self.champion
  }

  /// Slots holding the seeded field, best seed first.
  pub fn seeded_slots(&self) -> &[SlotId] {
    &self.seeded
  }

  pub fn bracket_size(&self) -> usize {
    self.bracket_size
  }

  pub fn byes(&self) -> usize {
    self.byes
  }
}

struct BracketBuilder<C> {
  slots: SlotArena<C>,
  matches: Vec<MatchNode>,
}

impl<C: Clone> BracketBuilder<C> {
  fn push_match(&mut self, side: BracketSide, round: u32, left: SlotId, right: SlotId) -> MatchId {
    let id = MatchId(self.matches.len());
    let winner = self.slots.alloc();
    let loser = self.slots.alloc();
    self.matches.push(MatchNode {
      id,
      side,
      round,
      left,
      right,
      winner,
      loser,
    });
    id
  }

  fn node(&self, id: MatchId) -> &MatchNode {
    &self.matches[id.0]
  }

  /// Pair the top half against the reversed bottom half.
  ///
  /// `entrants.len()` must be a power of two. A pair with a bye advances the
  /// present entrant without creating a match. Returns the next round's
  /// entrants and the loser slots of the matches created.
  fn play_round(
    &mut self,
    side: BracketSide,
    round: u32,
    entrants: &[Entrant],
  ) -> (Vec<Entrant>, Vec<SlotId>) {
    let half = entrants.len() / 2;
    let (top, bottom) = entrants.split_at(half);
    let mut advancing = Vec::with_capacity(half);
    let mut losers = Vec::new();
    for (high, low) in top.iter().zip(bottom.iter().rev()) {
      match (high.slot(), low.slot()) {
        (Some(left), Some(right)) => {
          let id = self.push_match(side, round, left, right);
          let node = self.node(id);
          advancing.push(Entrant::Slot(node.winner));
          losers.push(node.loser);
        }
        (Some(slot), None) | (None, Some(slot)) => advancing.push(Entrant::Slot(slot)),
        (None, None) => {}
      }
    }
    (advancing, losers)
  }
}

/// Build the full bracket for a best-seed-first competitor list.
///
/// Construction is deterministic: the same field and flag always produce the
/// same matches in the same order. Duplicate competitors are not detected.
pub fn build_bracket<C: Clone>(
  competitors: Vec<C>,
  bracket_reset: bool,
) -> Result<Bracket<C>, BracketError> {
  let count = competitors.len();
  if count < 2 {
    return Err(BracketError::InvalidConfiguration { count });
  }
  let bracket_size = count.next_power_of_two();
  let byes = bracket_size - count;

  let mut builder = BracketBuilder {
    slots: SlotArena::new(),
    matches: Vec::with_capacity(count * 2),
  };

  let seeded = competitors
    .into_iter()
    .map(|competitor| builder.slots.alloc_bound(competitor))
    .collect::<Vec<_>>();

  let mut field = seeded.iter().copied().map(Entrant::Slot).collect::<Vec<_>>();
  field.resize(bracket_size, Entrant::Bye);

  // Winner's bracket. Rounds that only moved byes forward add no dropouts.
  let mut dropouts: Vec<Vec<SlotId>> = Vec::new();
  let mut round = 0u32;
  while field.len() > 1 {
    round += 1;
    let (advancing, losers) = builder.play_round(BracketSide::Winners, round, &field);
    if !losers.is_empty() {
      dropouts.push(losers);
    }
    field = advancing;
  }
  let winners_champion = field
    .first()
    .and_then(|entrant| entrant.slot())
    .ok_or(BracketError::InvalidConfiguration { count })?;

  // Byes thinned the first round, so fold its dropouts into the second.
  if byes > 0 && dropouts.len() > 1 {
    let first = dropouts.remove(0);
    dropouts[0].extend(first);
  }

  // The loser's bracket needs two rounds for every winner's round after the
  // first: one where the new dropouts join, one where only survivors play.
  let mut rounds: Vec<Vec<Entrant>> = Vec::with_capacity(dropouts.len() * 2);
  for (index, losers) in dropouts.into_iter().enumerate() {
    rounds.push(losers.into_iter().map(Entrant::Slot).collect());
    if index > 0 {
      rounds.push(Vec::new());
    }
  }

  // Flip every fourth slot as it stands now, before any survivors arrive.
  // Slots 4, 8 and on are still empty here, so only the first dropouts flip.
  for entrants in rounds.iter_mut().step_by(4) {
    entrants.reverse();
  }

  let mut losers_champion = None;
  let mut index = 0;
  while index < rounds.len() {
    let mut entrants = std::mem::take(&mut rounds[index]);
    let survivors = if entrants.len() > 1 {
      entrants.resize(entrants.len().next_power_of_two(), Entrant::Bye);
      builder.play_round(BracketSide::Losers, index as u32 + 1, &entrants).0
    } else {
      entrants
    };
    if let [only] = survivors.as_slice() {
      losers_champion = only.slot();
    }
    if index + 1 < rounds.len() {
      rounds[index + 1].extend(survivors);
    } else if survivors.len() > 1 {
      rounds.push(survivors);
    }
    index += 1;
  }
  let losers_champion = losers_champion.ok_or(BracketError::InvalidConfiguration { count })?;

  // The winner's-bracket champion sits on the left; the reset check relies on it.
  let finals = builder.push_match(BracketSide::Finals, 1, winners_champion, losers_champion);
  let (reset, champion) = if bracket_reset {
    let (winner, loser) = {
      let node = builder.node(finals);
      (node.winner, node.loser)
    };
    let reset = builder.push_match(BracketSide::Reset, 1, winner, loser);
    (Some(reset), builder.node(reset).winner)
  } else {
    (None, builder.node(finals).winner)
  };

  debug!(
    competitors = count,
    bracket_size,
    byes,
    winners_rounds = round,
    losers_rounds = rounds.len(),
    matches = builder.matches.len(),
    "built double elimination bracket"
  );

  Ok(Bracket {
    slots: builder.slots,
    matches: builder.matches,
    finals,
    reset,
    champion,
    seeded,
    bracket_size,
    byes,
  })
}
