use std::fs;
use std::path::{Path, PathBuf};

use super::KeyValueStore;
use crate::error::StoreError;

/// One file per key under a state directory.
///
/// Values are written to a sibling temp file and renamed into place, so a
/// reader never sees a half-written key.
#[derive(Debug, Clone)]
pub struct FileStore {
  state_dir: PathBuf,
}

impl FileStore {
  pub fn new(state_dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
    let state_dir = state_dir.into();
    fs::create_dir_all(&state_dir)
      .map_err(|e| StoreError::io(state_dir.display().to_string(), e))?;
    Ok(Self { state_dir })
  }

  pub fn state_dir(&self) -> &Path {
    &self.state_dir
  }

  fn key_path(&self, key: &str) -> PathBuf {
    let file_name: String = key
      .chars()
      .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
      .collect();
    self.state_dir.join(format!("{file_name}.json"))
  }
}

impl KeyValueStore for FileStore {
  fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
    let path = self.key_path(key);
    match fs::read_to_string(&path) {
      Ok(content) => Ok(Some(content)),
      Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
      Err(e) => Err(StoreError::io(key, e)),
    }
  }

  fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
    let path = self.key_path(key);
    let staging = path.with_extension("json.tmp");
    fs::write(&staging, value).map_err(|e| StoreError::io(key, e))?;
    fs::rename(&staging, &path).map_err(|e| StoreError::io(key, e))?;
    Ok(())
  }

  fn remove(&self, key: &str) -> Result<(), StoreError> {
    match fs::remove_file(self.key_path(key)) {
      Ok(()) => Ok(()),
      Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
      Err(e) => Err(StoreError::io(key, e)),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use tempfile::TempDir;

  #[test]
  fn test_missing_key_reads_as_none() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileStore::new(temp_dir.path().join("state")).unwrap();
    assert_eq!(store.get("recentSearches").unwrap(), None);
  }

  #[test]
  fn test_set_get_remove() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileStore::new(temp_dir.path()).unwrap();

    store.set("themePreference", "dark").unwrap();
    assert_eq!(store.get("themePreference").unwrap().as_deref(), Some("dark"));
    assert!(temp_dir.path().join("themePreference.json").exists());
    assert!(!temp_dir.path().join("themePreference.json.tmp").exists());

    store.set("themePreference", "light").unwrap();
    assert_eq!(store.get("themePreference").unwrap().as_deref(), Some("light"));

    store.remove("themePreference").unwrap();
    assert_eq!(store.get("themePreference").unwrap(), None);
    store.remove("themePreference").unwrap();
  }

  #[test]
  fn test_keys_are_sanitized_into_file_names() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileStore::new(temp_dir.path()).unwrap();
    store.set("../escape", "x").unwrap();
    assert!(temp_dir.path().join("___escape.json").exists());
  }
}
