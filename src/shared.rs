use std::sync::{Arc, RwLock};

use crate::error::BracketError;
use crate::match_node::MatchId;
use crate::tournament::{Competitor, Tournament, TournamentSnapshot};

/// A tournament shared between threads.
///
/// Resolves take the write lock, so they are serialised along with the reset
/// check they may trigger. Queries share the read lock.
pub struct SharedTournament<C> {
  inner: Arc<RwLock<Tournament<C>>>,
}

impl<C> Clone for SharedTournament<C> {
  fn clone(&self) -> Self {
    SharedTournament {
      inner: Arc::clone(&self.inner),
    }
  }
}

impl<C: Competitor> SharedTournament<C> {
  pub fn new(tournament: Tournament<C>) -> Self {
    SharedTournament {
      inner: Arc::new(RwLock::new(tournament)),
    }
  }

  /// Take the read lock and call `f`.
  pub fn read<F, R>(&self, f: F) -> Result<R, BracketError>
  where
    F: FnOnce(&Tournament<C>) -> R,
  {
    let guard = self.inner.read().map_err(|_| BracketError::LockPoisoned)?;
    Ok(f(&guard))
  }

  /// Take the write lock and call `f`.
  pub fn write<F, R>(&self, f: F) -> Result<R, BracketError>
  where
    F: FnOnce(&mut Tournament<C>) -> Result<R, BracketError>,
  {
    let mut guard = self.inner.write().map_err(|_| BracketError::LockPoisoned)?;
    f(&mut guard)
  }

  pub fn resolve(&self, match_id: MatchId, competitor: &C) -> Result<(), BracketError> {
    self.write(|t| t.resolve(match_id, competitor))
  }

  pub fn add_win(&self, competitor: &C) -> Result<MatchId, BracketError> {
    self.write(|t| t.add_win(competitor))
  }

  pub fn active_matches(&self) -> Result<Vec<MatchId>, BracketError> {
    self.read(|t| t.active_matches().iter().map(|node| node.id()).collect())
  }

  pub fn winners(&self) -> Result<Option<Vec<C>>, BracketError> {
    self.read(|t| t.winners())
  }

  pub fn snapshot(&self) -> Result<TournamentSnapshot<C>, BracketError> {
    self.read(|t| t.snapshot())
  }
}
