use std::sync::Arc;

use crate::error::StoreError;
use crate::store::PersistentStore;

/// Most recent queries kept for quick re-issue
pub const MAX_RECENT_SEARCHES: usize = 5;

/// Bounded, deduplicated, most-recent-first list of query terms
pub struct RecentSearchHistory {
  terms: Vec<String>,
  store: Arc<PersistentStore>,
}

impl RecentSearchHistory {
  /// Start from the list in the store's startup snapshot
  pub fn open(store: Arc<PersistentStore>) -> Self {
    let mut terms = store.snapshot().recent_searches.clone();
    terms.truncate(MAX_RECENT_SEARCHES);
    Self { terms, store }
  }

  /// Move `term` to the front (inserting it if new), cap the list, and persist it.
  /// A failed write leaves the list as it was.
  pub fn record(&mut self, term: &str) -> Result<&[String], StoreError> {
    let mut updated: Vec<String> =
      self.terms.iter().filter(|existing| *existing != term).cloned().collect();
    updated.insert(0, term.to_string());
    updated.truncate(MAX_RECENT_SEARCHES);

    self.store.write_recent_searches(&updated)?;
    self.terms = updated;
    Ok(&self.terms)
  }

  pub fn terms(&self) -> &[String] {
    &self.terms
  }

  pub fn is_empty(&self) -> bool {
    self.terms.is_empty()
  }
}
