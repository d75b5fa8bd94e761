use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::SearchError;
use crate::platform::SearchResults;

pub mod http;

pub use http::HttpSearchApi;

/// Backend health as reported by `GET /health`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
  pub status: String,
  #[serde(default)]
  pub timestamp: String,
  #[serde(default)]
  pub cache_size: u64,
  #[serde(default)]
  pub memory_usage: String,
}

impl HealthStatus {
  pub fn is_healthy(&self) -> bool {
    self.status == "healthy"
  }
}

/// The remote aggregation API
#[async_trait]
pub trait SearchApi: Send + Sync {
  /// Query every platform for `keyword`. Issued once; never retried.
  async fn search(&self, keyword: &str) -> Result<SearchResults, SearchError>;

  /// Probe the API's health endpoint
  async fn health(&self) -> Result<HealthStatus, SearchError>;
}
