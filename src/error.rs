//! Typed errors for bracket construction, match resolution and configuration.

use std::path::PathBuf;

use thiserror::Error;

use crate::match_node::MatchId;
use crate::slot::SlotId;

/// Errors raised while building or progressing a bracket.
///
/// All of them are deterministic consequences of caller input; none are
/// worth retrying and none leave partial state behind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BracketError {
  #[error("a bracket needs at least two competitors, got {count}")]
  InvalidConfiguration { count: usize },

  #[error("match {match_id} is not ready to be played")]
  NotReady { match_id: MatchId },

  #[error("competitor is not playing in match {match_id}")]
  UnknownCompetitor { match_id: MatchId },

  /// A decided slot was written again. Points at a builder or caller defect.
  #[error("slot {slot} is already bound")]
  InvalidRebind { slot: SlotId },

  #[error("match {match_id} does not exist in this bracket")]
  UnknownMatch { match_id: MatchId },

  #[error("competitor has no playable match")]
  NoActiveMatch,

  #[error("tournament lock poisoned")]
  LockPoisoned,

  #[error("simulation stopped after {limit} matches with matches still playable")]
  StepLimit { limit: usize },
}

/// Errors raised while loading configuration, persisting logs or installing logging.
#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("read or write {}: {source}", path.display())]
  Io {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("parse {}: {source}", path.display())]
  Parse {
    path: PathBuf,
    #[source]
    source: serde_json::Error,
  },

  #[error("serialize: {0}")]
  Serialize(#[from] serde_json::Error),

  #[error("bracket config has no entrants")]
  NoEntrants,

  #[error("install logging: {0}")]
  Logging(String),

  #[error(transparent)]
  Bracket(#[from] BracketError),
}
