//! Query lifecycle for one search session
//!
//! `execute` may be called again while a previous query is still in flight.
//! Each call takes a new generation number; a completion whose generation
//! is no longer current is dropped, so a slow, older query never overwrites
//! the state produced by a newer one.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::api::SearchApi;
use crate::error::SearchError;
use crate::history::RecentSearchHistory;
use crate::platform::SearchResults;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum SessionState {
  #[default]
  Idle,
  Loading,
  Success(SearchResults),
  Failed(String),
}

impl SessionState {
  pub fn is_loading(&self) -> bool {
    matches!(self, SessionState::Loading)
  }

  pub fn results(&self) -> Option<&SearchResults> {
    match self {
      SessionState::Success(results) => Some(results),
      _ => None,
    }
  }

  pub fn error(&self) -> Option<&str> {
    match self {
      SessionState::Failed(message) => Some(message),
      _ => None,
    }
  }
}

#[derive(Debug, Default)]
struct Current {
  state: SessionState,
  keyword: String,
}

pub struct SearchSession {
  api: Arc<dyn SearchApi>,
  current: Mutex<Current>,
  history: Mutex<RecentSearchHistory>,
  generation: AtomicU64,
}

impl SearchSession {
  pub fn new(api: Arc<dyn SearchApi>, history: RecentSearchHistory) -> Self {
    Self {
      api,
      current: Mutex::new(Current::default()),
      history: Mutex::new(history),
      generation: AtomicU64::new(0),
    }
  }

  /// Run one query for `term` and return the state it settled in.
  ///
  /// A blank term fails validation without touching the network. Otherwise
  /// the API is called exactly once; on success `term` becomes the session
  /// keyword and is recorded in the recent-search history.
  pub async fn execute(&self, term: &str) -> SessionState {
    if term.trim().is_empty() {
      let mut current = self.current.lock().await;
      current.state = SessionState::from(&SearchError::Validation);
      return current.state.clone();
    }

    let generation = {
      let mut current = self.current.lock().await;
      current.state = SessionState::Loading;
      self.generation.fetch_add(1, Ordering::SeqCst) + 1
    };

    let outcome = self.api.search(term).await;

    let settled = {
      let mut current = self.current.lock().await;
      if self.generation.load(Ordering::SeqCst) != generation {
        tracing::debug!(keyword = term, generation, "discarding stale search completion");
        return current.state.clone();
      }

      match outcome {
        Ok(results) => {
          current.state = SessionState::Success(results);
          current.keyword = term.to_string();
        }
        Err(e) => {
          tracing::error!(keyword = term, error = %e, "search failed");
          current.state = SessionState::from(&e);
        }
      }
      current.state.clone()
    };

    if matches!(settled, SessionState::Success(_)) {
      self.record_recent(term).await;
    }

    settled
  }

  /// Show an already-fetched payload without a network call.
  ///
  /// Supersedes any query still in flight.
  pub async fn show(&self, keyword: &str, results: SearchResults) -> SessionState {
    let mut current = self.current.lock().await;
    self.generation.fetch_add(1, Ordering::SeqCst);
    current.state = SessionState::Success(results);
    current.keyword = keyword.to_string();
    current.state.clone()
  }

  async fn record_recent(&self, term: &str) {
    let mut history = self.history.lock().await;
    if let Err(e) = history.record(term) {
      tracing::warn!(keyword = term, error = %e, "failed to persist recent searches");
    }
  }

  pub async fn state(&self) -> SessionState {
    self.current.lock().await.state.clone()
  }

  /// The keyword of the result on display, as the user typed it
  pub async fn keyword(&self) -> String {
    self.current.lock().await.keyword.clone()
  }

  pub async fn results(&self) -> Option<SearchResults> {
    self.current.lock().await.state.results().cloned()
  }

  pub async fn recent_searches(&self) -> Vec<String> {
    self.history.lock().await.terms().to_vec()
  }

  pub fn generation(&self) -> u64 {
    self.generation.load(Ordering::SeqCst)
  }

  pub fn api(&self) -> &Arc<dyn SearchApi> {
    &self.api
  }
}

impl From<&SearchError> for SessionState {
  fn from(err: &SearchError) -> Self {
    SessionState::Failed(err.user_message().to_string())
  }
}
