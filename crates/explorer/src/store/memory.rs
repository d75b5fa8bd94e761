use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use super::KeyValueStore;
use crate::error::StoreError;

/// Process-local store. Clones share the same entries.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
  entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn len(&self) -> usize {
    self.entries.lock().unwrap_or_else(PoisonError::into_inner).len()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }
}

impl KeyValueStore for MemoryStore {
  fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
    let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
    Ok(entries.get(key).cloned())
  }

  fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
    let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
    entries.insert(key.to_string(), value.to_string());
    Ok(())
  }

  fn remove(&self, key: &str) -> Result<(), StoreError> {
    let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
    entries.remove(key);
    Ok(())
  }
}
