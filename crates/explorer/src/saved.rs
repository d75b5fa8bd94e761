use std::sync::Arc;

use crate::error::StoreError;
use crate::platform::SearchResults;
use crate::session::{SearchSession, SessionState};
use crate::store::{PersistentStore, SavedSearch};

/// Saved searches kept at most
pub const MAX_SAVED_SEARCHES: usize = 10;

/// Bounded list of result snapshots, unique by keyword, most-recently-saved first
pub struct SavedSearchStore {
  searches: Vec<SavedSearch>,
  store: Arc<PersistentStore>,
}

impl SavedSearchStore {
  pub fn open(store: Arc<PersistentStore>) -> Self {
    let mut searches = store.snapshot().saved_searches.clone();
    searches.truncate(MAX_SAVED_SEARCHES);
    Self { searches, store }
  }

  /// Save a snapshot of `current`. Without a current result this is a no-op.
  ///
  /// An existing entry with the same keyword is replaced and moves to the front.
  pub fn save(&mut self, current: Option<&SearchResults>) -> Result<&[SavedSearch], StoreError> {
    let Some(results) = current else {
      return Ok(&self.searches);
    };

    let entry = SavedSearch {
      keyword: results.keyword.clone(),
      timestamp: chrono::Utc::now().timestamp_millis(),
      results: Some(results.clone()),
    };

    let mut updated: Vec<SavedSearch> =
      self.searches.iter().filter(|saved| saved.keyword != entry.keyword).cloned().collect();
    updated.insert(0, entry);
    updated.truncate(MAX_SAVED_SEARCHES);

    self.store.write_saved_searches(&updated)?;
    self.searches = updated;
    tracing::debug!(keyword = %results.keyword, total = self.searches.len(), "saved search");
    Ok(&self.searches)
  }

  /// Remove every entry whose keyword equals `keyword` exactly. Never loads anything.
  ///
  /// Memory is only updated once the write succeeds.
  pub fn remove(&mut self, keyword: &str) -> Result<&[SavedSearch], StoreError> {
    let updated: Vec<SavedSearch> =
      self.searches.iter().filter(|saved| saved.keyword != keyword).cloned().collect();
    self.store.write_saved_searches(&updated)?;
    self.searches = updated;
    Ok(&self.searches)
  }

  /// Show a saved entry: the cached snapshot when present, otherwise a fresh query
  pub async fn load(&self, entry: &SavedSearch, session: &SearchSession) -> SessionState {
    match &entry.results {
      Some(results) => session.show(&entry.keyword, results.clone()).await,
      None => session.execute(&entry.keyword).await,
    }
  }

  pub fn is_saved(&self, keyword: &str) -> bool {
    self.searches.iter().any(|saved| saved.keyword == keyword)
  }

  pub fn find(&self, keyword: &str) -> Option<&SavedSearch> {
    self.searches.iter().find(|saved| saved.keyword == keyword)
  }

  pub fn entries(&self) -> &[SavedSearch] {
    &self.searches
  }

  pub fn len(&self) -> usize {
    self.searches.len()
  }

  pub fn is_empty(&self) -> bool {
    self.searches.is_empty()
  }
}
