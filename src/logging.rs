use std::{fs, path::PathBuf};

use serde::{Deserialize, Serialize};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::error::ConfigError;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LogConfig {
  /// Used when `RUST_LOG` is unset or invalid.
  pub default_filter: String,
  /// Write to a daily rolling file here instead of stderr.
  pub directory: Option<PathBuf>,
  pub file_prefix: String,
  pub ansi: bool,
}

impl Default for LogConfig {
  fn default() -> Self {
    LogConfig {
      default_filter: "info".to_string(),
      directory: None,
      file_prefix: "bracket.log".to_string(),
      ansi: true,
    }
  }
}

/// Install the global tracing subscriber.
///
/// Keep the returned guard alive for as long as file logging should flush.
pub fn init_logging(config: &LogConfig) -> Result<Option<WorkerGuard>, ConfigError> {
  let filter = EnvFilter::try_from_default_env()
    .unwrap_or_else(|_| EnvFilter::new(&config.default_filter));

  match &config.directory {
    Some(dir) => {
      fs::create_dir_all(dir).map_err(|source| ConfigError::Io {
        path: dir.clone(),
        source,
      })?;
      let file_appender = tracing_appender::rolling::daily(dir, &config.file_prefix);
      let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
      tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(non_blocking)
        .with_ansi(false)
        .try_init()
        .map_err(|e| ConfigError::Logging(e.to_string()))?;
      Ok(Some(guard))
    }
    None => {
      tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(config.ansi)
        .try_init()
        .map_err(|e| ConfigError::Logging(e.to_string()))?;
      Ok(None)
    }
  }
}
