//! Client configuration
//!
//! Settings come from `config.json` in the data directory when present,
//! then from command-line flags (which also read `EXPLORER_API_URL` and
//! `EXPLORER_TIMEOUT`).

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Overrides the data directory
pub const DATA_DIR_ENV: &str = "EXPLORER_DIR";

const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
  /// Base URL of the aggregation API (e.g., "http://localhost:5000")
  #[serde(default = "default_base_url")]
  pub base_url: String,
  /// Per-request timeout in seconds
  #[serde(default = "default_timeout_secs")]
  pub timeout_secs: u64,
}

fn default_base_url() -> String {
  "http://localhost:5000".to_string()
}

fn default_timeout_secs() -> u64 {
  30
}

impl Default for ClientConfig {
  fn default() -> Self {
    Self { base_url: default_base_url(), timeout_secs: default_timeout_secs() }
  }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ConfigFile {
  #[serde(default)]
  api: ClientConfig,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExplorerConfig {
  pub api: ClientConfig,
  pub data_dir: PathBuf,
}

impl ExplorerConfig {
  /// `$EXPLORER_DIR`, else `~/.explorer`, else `./.explorer`
  pub fn default_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
      if !dir.trim().is_empty() {
        return PathBuf::from(dir);
      }
    }

    dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")).join(".explorer")
  }

  pub fn load() -> Result<Self> {
    Self::load_from(Self::default_data_dir())
  }

  /// Read `config.json` from `data_dir`; a missing file means defaults
  pub fn load_from(data_dir: impl AsRef<Path>) -> Result<Self> {
    let data_dir = data_dir.as_ref().to_path_buf();
    let config_path = data_dir.join(CONFIG_FILE);

    let file = if config_path.exists() {
      let content = std::fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read {}", config_path.display()))?;
      serde_json::from_str::<ConfigFile>(&content)
        .with_context(|| format!("Invalid configuration in {}", config_path.display()))?
    } else {
      ConfigFile::default()
    };

    Ok(Self { api: file.api, data_dir })
  }

  pub fn with_overrides(mut self, base_url: Option<String>, timeout_secs: Option<u64>) -> Self {
    if let Some(base_url) = base_url {
      self.api.base_url = base_url;
    }
    if let Some(timeout_secs) = timeout_secs {
      self.api.timeout_secs = timeout_secs;
    }
    self
  }

  /// Directory holding the persisted settings
  pub fn state_dir(&self) -> PathBuf {
    self.data_dir.join("state")
  }
}
