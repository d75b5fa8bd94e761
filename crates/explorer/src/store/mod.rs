//! Persistent settings: theme, privacy mode, recent and saved searches
//!
//! Each setting lives under its own key in a [`KeyValueStore`]. The four
//! keys are read once into a snapshot at startup and written through on
//! every change. Writes are atomic per key; there is no ordering between keys.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::error::StoreError;
use crate::platform::SearchResults;

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

pub const THEME_KEY: &str = "themePreference";
pub const PRIVACY_KEY: &str = "privacyMode";
pub const RECENT_KEY: &str = "recentSearches";
pub const SAVED_KEY: &str = "savedSearches";

/// Durable string key-value medium
pub trait KeyValueStore: Send + Sync {
  fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

  fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

  fn remove(&self, key: &str) -> Result<(), StoreError>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
  #[default]
  Light,
  Dark,
}

impl Theme {
  pub fn as_str(&self) -> &'static str {
    match self {
      Theme::Light => "light",
      Theme::Dark => "dark",
    }
  }

  pub fn toggled(&self) -> Self {
    match self {
      Theme::Light => Theme::Dark,
      Theme::Dark => Theme::Light,
    }
  }

  /// Anything other than `dark` reads as light
  pub fn parse(value: &str) -> Self {
    if value == "dark" {
      Theme::Dark
    } else {
      Theme::Light
    }
  }
}

impl fmt::Display for Theme {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// A query together with its full result snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedSearch {
  pub keyword: String,
  /// Epoch milliseconds at save time
  pub timestamp: i64,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub results: Option<SearchResults>,
}

/// Values of the four settings as read at startup
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
  pub theme: Theme,
  pub privacy_mode: bool,
  pub recent_searches: Vec<String>,
  pub saved_searches: Vec<SavedSearch>,
}

/// Typed, write-through access to the settings keys
pub struct PersistentStore {
  backend: Box<dyn KeyValueStore>,
  initial: Snapshot,
}

impl PersistentStore {
  /// Read the snapshot from `backend`. Absent or unreadable keys fall back to defaults.
  pub fn load(backend: impl KeyValueStore + 'static) -> Arc<Self> {
    let backend: Box<dyn KeyValueStore> = Box::new(backend);

    let theme = read_raw(backend.as_ref(), THEME_KEY).map(|v| Theme::parse(&v)).unwrap_or_default();
    let privacy_mode = read_raw(backend.as_ref(), PRIVACY_KEY).is_some_and(|v| v == "true");
    let recent_searches = read_json(backend.as_ref(), RECENT_KEY).unwrap_or_default();
    let saved_searches = read_json(backend.as_ref(), SAVED_KEY).unwrap_or_default();

    let initial = Snapshot { theme, privacy_mode, recent_searches, saved_searches };
    tracing::debug!(
      theme = %initial.theme,
      privacy = initial.privacy_mode,
      recent = initial.recent_searches.len(),
      saved = initial.saved_searches.len(),
      "loaded persisted settings"
    );

    Arc::new(Self { backend, initial })
  }

  /// In-memory store with default settings
  pub fn ephemeral() -> Arc<Self> {
    Self::load(MemoryStore::new())
  }

  /// The snapshot taken at load time
  pub fn snapshot(&self) -> &Snapshot {
    &self.initial
  }

  pub fn write_theme(&self, theme: Theme) -> Result<(), StoreError> {
    self.backend.set(THEME_KEY, theme.as_str())
  }

  pub fn write_privacy_mode(&self, enabled: bool) -> Result<(), StoreError> {
    self.backend.set(PRIVACY_KEY, if enabled { "true" } else { "false" })
  }

  pub fn write_recent_searches(&self, terms: &[String]) -> Result<(), StoreError> {
    self.write_json(RECENT_KEY, &terms)
  }

  pub fn write_saved_searches(&self, searches: &[SavedSearch]) -> Result<(), StoreError> {
    self.write_json(SAVED_KEY, &searches)
  }

  fn write_json<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
    let json = serde_json::to_string(value).map_err(|e| StoreError::encode(key, e))?;
    self.backend.set(key, &json)
  }
}

fn read_raw(backend: &dyn KeyValueStore, key: &str) -> Option<String> {
  match backend.get(key) {
    Ok(value) => value,
    Err(e) => {
      tracing::warn!(key, error = %e, "failed to read persisted setting, using default");
      None
    }
  }
}

fn read_json<T: DeserializeOwned>(backend: &dyn KeyValueStore, key: &str) -> Option<T> {
  let raw = read_raw(backend, key)?;
  match serde_json::from_str(&raw) {
    Ok(value) => Some(value),
    Err(e) => {
      tracing::warn!(key, error = %e, "persisted setting is not valid JSON, using default");
      None
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_defaults_when_keys_absent() {
    let store = PersistentStore::ephemeral();
    assert_eq!(store.snapshot(), &Snapshot::default());
    assert_eq!(store.snapshot().theme, Theme::Light);
    assert!(!store.snapshot().privacy_mode);
  }

  #[test]
  fn test_snapshot_reads_each_key() {
    let backend = MemoryStore::new();
    backend.set(THEME_KEY, "dark").unwrap();
    backend.set(PRIVACY_KEY, "true").unwrap();
    backend.set(RECENT_KEY, r#"["rust","tokio"]"#).unwrap();
    backend.set(SAVED_KEY, r#"[{"keyword":"rust","timestamp":1700000000000}]"#).unwrap();

    let store = PersistentStore::load(backend);
    let snapshot = store.snapshot();
    assert_eq!(snapshot.theme, Theme::Dark);
    assert!(snapshot.privacy_mode);
    assert_eq!(snapshot.recent_searches, vec!["rust", "tokio"]);
    assert_eq!(snapshot.saved_searches.len(), 1);
    assert!(snapshot.saved_searches[0].results.is_none());
  }

  #[test]
  fn test_malformed_value_falls_back_to_default() {
    let backend = MemoryStore::new();
    backend.set(RECENT_KEY, "not json").unwrap();
    backend.set(THEME_KEY, "sepia").unwrap();

    let store = PersistentStore::load(backend);
    assert!(store.snapshot().recent_searches.is_empty());
    assert_eq!(store.snapshot().theme, Theme::Light);
  }

  #[test]
  fn test_writes_go_through_to_backend() {
    let backend = MemoryStore::new();
    let store = PersistentStore::load(backend.clone());

    store.write_theme(Theme::Dark).unwrap();
    store.write_privacy_mode(false).unwrap();
    store.write_recent_searches(&["a".to_string()]).unwrap();

    assert_eq!(backend.get(THEME_KEY).unwrap().as_deref(), Some("dark"));
    assert_eq!(backend.get(PRIVACY_KEY).unwrap().as_deref(), Some("false"));
    assert_eq!(backend.get(RECENT_KEY).unwrap().as_deref(), Some(r#"["a"]"#));
  }
}
