use async_trait::async_trait;
use explorer::{
  HealthStatus, PersistentStore, RecentSearchHistory, SearchApi, SearchError, SearchResults,
  SearchSession, SessionState,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// Each keyword blocks until its gate is opened
#[derive(Default)]
struct GatedApi {
  gates: Mutex<HashMap<String, Arc<Notify>>>,
}

impl GatedApi {
  fn gate(&self, keyword: &str) -> Arc<Notify> {
    self.gates.lock().unwrap().entry(keyword.to_string()).or_default().clone()
  }

  fn open(&self, keyword: &str) {
    self.gate(keyword).notify_one();
  }
}

#[async_trait]
impl SearchApi for GatedApi {
  async fn search(&self, keyword: &str) -> Result<SearchResults, SearchError> {
    self.gate(keyword).notified().await;
    if keyword == "broken" {
      return Err(SearchError::transport("connection reset"));
    }
    Ok(SearchResults::empty(keyword))
  }

  async fn health(&self) -> Result<HealthStatus, SearchError> {
    Err(SearchError::transport("not available"))
  }
}

fn setup() -> (Arc<GatedApi>, Arc<SearchSession>) {
  let api = Arc::new(GatedApi::default());
  let history = RecentSearchHistory::open(PersistentStore::ephemeral());
  let session = Arc::new(SearchSession::new(api.clone(), history));
  (api, session)
}

async fn wait_for_generation(session: &SearchSession, generation: u64) {
  while session.generation() < generation {
    tokio::task::yield_now().await;
  }
}

fn spawn_search(
  session: &Arc<SearchSession>,
  term: &'static str,
) -> tokio::task::JoinHandle<SessionState> {
  let session = session.clone();
  tokio::spawn(async move { session.execute(term).await })
}

#[tokio::test]
async fn test_loading_while_in_flight() {
  let (api, session) = setup();

  let pending = spawn_search(&session, "rust");
  wait_for_generation(&session, 1).await;
  assert!(session.state().await.is_loading());

  api.open("rust");
  let state = pending.await.unwrap();
  assert_eq!(state.results().unwrap().keyword, "rust");
  assert_eq!(session.keyword().await, "rust");
}

#[tokio::test]
async fn test_older_completion_does_not_overwrite_newer() {
  let (api, session) = setup();

  let slow = spawn_search(&session, "slow");
  wait_for_generation(&session, 1).await;
  let fast = spawn_search(&session, "fast");
  wait_for_generation(&session, 2).await;

  api.open("fast");
  assert_eq!(fast.await.unwrap().results().unwrap().keyword, "fast");

  api.open("slow");
  let stale = slow.await.unwrap();
  assert_eq!(stale.results().unwrap().keyword, "fast");

  assert_eq!(session.keyword().await, "fast");
  assert_eq!(session.recent_searches().await, vec!["fast"]);
}

#[tokio::test]
async fn test_stale_failure_is_dropped_too() {
  let (api, session) = setup();

  let broken = spawn_search(&session, "broken");
  wait_for_generation(&session, 1).await;
  let good = spawn_search(&session, "good");
  wait_for_generation(&session, 2).await;

  api.open("broken");
  assert!(broken.await.unwrap().is_loading());

  api.open("good");
  assert_eq!(good.await.unwrap().results().unwrap().keyword, "good");
  assert!(session.state().await.error().is_none());
}

#[tokio::test]
async fn test_show_supersedes_query_in_flight() {
  let (api, session) = setup();

  let pending = spawn_search(&session, "rust");
  wait_for_generation(&session, 1).await;

  session.show("cached", SearchResults::empty("cached")).await;
  api.open("rust");
  pending.await.unwrap();

  assert_eq!(session.keyword().await, "cached");
  assert!(session.recent_searches().await.is_empty());
}

#[tokio::test]
async fn test_failure_keeps_previous_keyword() {
  let (api, session) = setup();

  api.open("rust");
  session.execute("rust").await;

  api.open("broken");
  let state = session.execute("broken").await;
  assert!(state.error().is_some());
  assert!(session.results().await.is_none());
  assert_eq!(session.keyword().await, "rust");
}
