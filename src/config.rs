use std::{collections::HashSet, env, fs, path::Path};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ConfigError;

pub const BRACKET_RESET_ENV: &str = "DOUBLE_ELIM_BRACKET_RESET";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BracketSettings {
  /// Play a second finals match when the loser's-bracket champion wins the first.
  pub bracket_reset: bool,
}

impl Default for BracketSettings {
  fn default() -> Self {
    BracketSettings { bracket_reset: true }
  }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntrantConfig {
  pub id: String,
  #[serde(default)]
  pub seed: Option<u32>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BracketConfig {
  pub entrants: Vec<EntrantConfig>,
  #[serde(default)]
  pub settings: BracketSettings,
}

impl BracketConfig {
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    let data = fs::read_to_string(path).map_err(|source| ConfigError::Io {
      path: path.to_path_buf(),
      source,
    })?;
    serde_json::from_str::<BracketConfig>(&data).map_err(|source| ConfigError::Parse {
      path: path.to_path_buf(),
      source,
    })
  }

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

  pub fn apply_env_overrides(self) -> Self {
    self.apply_overrides_from(|key| env::var(key).ok())
  }

  pub fn apply_overrides_from<F>(mut self, lookup: F) -> Self
  where
    F: Fn(&str) -> Option<String>,
  {
    if let Some(value) = lookup(BRACKET_RESET_ENV) {
      let value = value.trim().to_ascii_lowercase();
      if !value.is_empty() {
        self.settings.bracket_reset = flag_true(&value);
      }
    }
    self
  }

  /// Entrant ids ordered best seed first.
  ///
  /// A positive seed nobody else claimed first is kept. Missing, zero and
  /// repeated seeds are replaced by the lowest free seeds in entrant order.
  pub fn competitors(&self) -> Result<Vec<String>, ConfigError> {
    if self.entrants.is_empty() {
      return Err(ConfigError::NoEntrants);
    }

    let mut taken = HashSet::new();
    let requested = self
      .entrants
      .iter()
      .map(|entrant| match entrant.seed {
        Some(seed) if seed > 0 && taken.insert(seed) => Some(seed),
        Some(seed) => {
          warn!(entrant = %entrant.id, seed, "ignoring unusable seed");
          None
        }
        None => None,
      })
      .collect::<Vec<_>>();

    let mut free = 0u32;
    let mut ranked = self
      .entrants
      .iter()
      .zip(requested)
      .map(|(entrant, seed)| {
        let seed = seed.unwrap_or_else(|| {
          free += 1;
          while taken.contains(&free) {
            free += 1;
          }
          free
        });
        (seed, entrant.id.clone())
      })
      .collect::<Vec<_>>();
    ranked.sort_by_key(|(seed, _)| *seed);
    Ok(ranked.into_iter().map(|(_, id)| id).collect())
  }
}

fn flag_true(value: &str) -> bool {
  matches!(value, "1" | "true" | "yes" | "on")
}
