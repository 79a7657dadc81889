//! Decision log for persisting and rehydrating a tournament.
//!
//! Construction is deterministic, so the ordered list of caller decisions is
//! all that needs to be stored. Rebuilding from the same field and replaying
//! the log reproduces every slot.

use std::fs;
use std::path::Path;

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::match_node::MatchId;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Decision<C> {
  pub match_id: MatchId,
  pub winner: C,
  /// Informational only, never consulted on replay.
  #[serde(default)]
  pub recorded_at_ms: i64,
}

impl<C> Decision<C> {
  pub fn new(match_id: MatchId, winner: C) -> Self {
    Decision {
      match_id,
      winner,
      recorded_at_ms: Utc::now().timestamp_millis(),
    }
  }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionLog<C> {
  #[serde(default = "Vec::new")]
  pub decisions: Vec<Decision<C>>,
}

impl<C> Default for DecisionLog<C> {
  fn default() -> Self {
    DecisionLog { decisions: Vec::new() }
  }
}

impl<C> DecisionLog<C> {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn push(&mut self, decision: Decision<C>) {
    self.decisions.push(decision);
  }

  pub fn iter(&self) -> std::slice::Iter<'_, Decision<C>> {
    self.decisions.iter()
  }

  pub fn len(&self) -> usize {
    self.decisions.len()
  }

  pub fn is_empty(&self) -> bool {
    self.decisions.is_empty()
  }

  /// `(match, winner)` pairs without timestamps.
  pub fn outcomes(&self) -> Vec<(MatchId, &C)> {
    self.decisions.iter().map(|d| (d.match_id, &d.winner)).collect()
  }
}

impl<C> FromIterator<Decision<C>> for DecisionLog<C> {
  fn from_iter<I: IntoIterator<Item = Decision<C>>>(iter: I) -> Self {
    DecisionLog {
      decisions: iter.into_iter().collect(),
    }
  }
}

impl<'a, C> IntoIterator for &'a DecisionLog<C> {
  type Item = &'a Decision<C>;
  type IntoIter = std::slice::Iter<'a, Decision<C>>;

  fn into_iter(self) -> Self::IntoIter {
    self.decisions.iter()
  }
}

impl<C: Serialize> DecisionLog<C> {
  pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
    let payload = serde_json::to_string_pretty(self)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
      fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
        path: parent.to_path_buf(),
        source,
      })?;
    }
    fs::write(path, payload).map_err(|source| ConfigError::Io {
      path: path.to_path_buf(),
      source,
    })
  }
}

impl<C: DeserializeOwned> DecisionLog<C> {
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    let data = fs::read_to_string(path).map_err(|source| ConfigError::Io {
      path: path.to_path_buf(),
      source,
    })?;
    serde_json::from_str(&data).map_err(|source| ConfigError::Parse {
      path: path.to_path_buf(),
      source,
    })
  }
}
