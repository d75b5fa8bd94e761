//! HTTP client for the aggregation API

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

use super::{HealthStatus, SearchApi};
use crate::config::ClientConfig;
use crate::error::SearchError;
use crate::platform::SearchResults;

pub struct HttpSearchApi {
  client: Client,
  config: ClientConfig,
}

impl HttpSearchApi {
  pub fn with_config(config: ClientConfig) -> Result<Self, SearchError> {
    let client = Client::builder().timeout(Duration::from_secs(config.timeout_secs)).build()?;
    Ok(Self { client, config })
  }

  fn endpoint(&self, path: &str, params: &[(&str, &str)]) -> Result<Url, SearchError> {
    let raw = format!("{}/{}", self.config.base_url.trim_end_matches('/'), path);
    let parsed = if params.is_empty() { Url::parse(&raw) } else { Url::parse_with_params(&raw, params) };
    parsed.map_err(|e| SearchError::transport(format!("Invalid API URL '{raw}': {e}")))
  }

  async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, SearchError> {
    let status = response.status();
    if !status.is_success() {
      let body = response.text().await.unwrap_or_default();
      return Err(SearchError::transport(format!("HTTP {status}: {body}")));
    }
    Ok(response.json().await?)
  }
}

#[async_trait]
impl SearchApi for HttpSearchApi {
  async fn search(&self, keyword: &str) -> Result<SearchResults, SearchError> {
    let url = self.endpoint("search", &[("keyword", keyword)])?;
    tracing::debug!(%url, "issuing search request");

    let response = self.client.get(url).send().await?;
    Self::decode(response).await
  }

  async fn health(&self) -> Result<HealthStatus, SearchError> {
    let url = self.endpoint("health", &[])?;
    let response = self.client.get(url).send().await?;
    Self::decode(response).await
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_endpoint_encodes_keyword() {
    let api = HttpSearchApi::with_config(ClientConfig {
      base_url: "http://localhost:5000/".to_string(),
      timeout_secs: 5,
    })
    .unwrap();

    let url = api.endpoint("search", &[("keyword", "c++ & rust")]).unwrap();
    assert_eq!(url.as_str(), "http://localhost:5000/search?keyword=c%2B%2B+%26+rust");
  }

  #[test]
  fn test_endpoint_rejects_bad_base_url() {
    let api = HttpSearchApi::with_config(ClientConfig {
      base_url: "not a url".to_string(),
      timeout_secs: 5,
    })
    .unwrap();

    assert!(matches!(api.endpoint("search", &[]), Err(SearchError::Transport { .. })));
  }
}
