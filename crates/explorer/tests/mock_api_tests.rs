use async_trait::async_trait;
use explorer::{
  HealthStatus, PersistentStore, RecentSearchHistory, SavedSearch, SavedSearchStore, SearchApi,
  SearchError, SearchResults, SearchSession, SessionState,
};
use mockall::mock;
use std::sync::Arc;

mock! {
  pub Api {}

  #[async_trait]
  impl SearchApi for Api {
    async fn search(&self, keyword: &str) -> Result<SearchResults, SearchError>;
    async fn health(&self) -> Result<HealthStatus, SearchError>;
  }
}

fn session_with(api: MockApi) -> SearchSession {
  SearchSession::new(Arc::new(api), RecentSearchHistory::open(PersistentStore::ephemeral()))
}

#[tokio::test]
async fn test_each_execute_calls_api_once() {
  let mut api = MockApi::new();
  api
    .expect_search()
    .withf(|keyword: &str| keyword == "rust")
    .times(2)
    .returning(|keyword| Ok(SearchResults::empty(keyword)));

  let session = session_with(api);
  session.execute("rust").await;
  session.execute("rust").await;
  assert_eq!(session.recent_searches().await, vec!["rust"]);
}

#[tokio::test]
async fn test_validation_skips_api() {
  let mut api = MockApi::new();
  api.expect_search().times(0);

  let session = session_with(api);
  let state = session.execute("  ").await;
  assert_eq!(state, SessionState::from(&SearchError::Validation));
  assert_eq!(state.error(), Some(SearchError::Validation.user_message()));
}

#[tokio::test]
async fn test_cached_saved_search_loads_without_network() {
  let mut api = MockApi::new();
  api.expect_search().times(0);

  let session = session_with(api);
  let saved = SavedSearchStore::open(PersistentStore::ephemeral());
  let entry = SavedSearch {
    keyword: "rust".to_string(),
    timestamp: 1_700_000_000_000,
    results: Some(SearchResults::empty("rust")),
  };

  let state = saved.load(&entry, &session).await;
  assert_eq!(state.results().unwrap().keyword, "rust");
  assert_eq!(session.keyword().await, "rust");
}

#[tokio::test]
async fn test_saved_search_without_snapshot_reissues_query() {
  let mut api = MockApi::new();
  api
    .expect_search()
    .withf(|keyword: &str| keyword == "tokio")
    .times(1)
    .returning(|keyword| Ok(SearchResults::empty(keyword)));

  let session = session_with(api);
  let saved = SavedSearchStore::open(PersistentStore::ephemeral());
  let entry = SavedSearch { keyword: "tokio".to_string(), timestamp: 0, results: None };

  let state = saved.load(&entry, &session).await;
  assert_eq!(state.results().unwrap().keyword, "tokio");
}
