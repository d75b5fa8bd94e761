use async_trait::async_trait;
use explorer::display::boundary::FALLBACK_TITLE;
use explorer::{
  Explorer, HealthStatus, PersistentStore, SearchApi, SearchError, SearchResults,
};
use serde_json::json;
use std::sync::Arc;

/// Returns a payload whose wikipedia section has no title for "broken"
struct PayloadApi;

#[async_trait]
impl SearchApi for PayloadApi {
  async fn search(&self, keyword: &str) -> Result<SearchResults, SearchError> {
    let mut results = SearchResults::empty(keyword);
    if keyword == "broken" {
      results.wikipedia = Some(json!({"summary": "a summary without a title"}));
    }
    Ok(results)
  }

  async fn health(&self) -> Result<HealthStatus, SearchError> {
    Ok(HealthStatus {
      status: "healthy".to_string(),
      timestamp: String::new(),
      cache_size: 0,
      memory_usage: String::new(),
    })
  }
}

fn explorer() -> Explorer {
  colored::control::set_override(false);
  Explorer::with_parts(Arc::new(PayloadApi), PersistentStore::ephemeral())
}

#[tokio::test]
async fn test_nothing_to_render_before_first_search() {
  let mut app = explorer();
  assert_eq!(app.render_results().await, None);
}

#[tokio::test]
async fn test_render_failure_shows_fallback_until_retry() {
  let mut app = explorer();

  app.search("broken").await;
  let text = app.render_results().await.unwrap();
  assert!(text.contains(FALLBACK_TITLE));
  assert!(app.results_failed());

  app.search("rust").await;
  let text = app.render_results().await.unwrap();
  assert!(text.contains(FALLBACK_TITLE));

  assert!(app.retry());
  let text = app.render_results().await.unwrap();
  assert!(text.starts_with("Results for rust"));
  assert!(!app.results_failed());
  assert!(!app.retry());
}

#[tokio::test]
async fn test_session_keeps_working_while_results_failed() {
  let mut app = explorer();

  app.search("broken").await;
  app.render_results().await;
  assert!(app.results_failed());

  app.search("tokio").await;
  assert_eq!(app.session().keyword().await, "tokio");
  assert_eq!(app.session().recent_searches().await, vec!["tokio", "broken"]);
  assert_eq!(app.save_current().await.unwrap().as_deref(), Some("tokio"));
  assert!(app.set_theme(None).is_ok());
}

#[tokio::test]
async fn test_retrying_same_bad_payload_fails_again() {
  let mut app = explorer();

  app.search("broken").await;
  app.render_results().await;
  assert!(app.retry());

  let text = app.render_results().await.unwrap();
  assert!(text.contains(FALLBACK_TITLE));
  assert!(app.results_failed());
}
