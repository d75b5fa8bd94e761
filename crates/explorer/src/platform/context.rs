//! Cross-platform context matches as delivered by the aggregation API
//!
//! The API groups related items under keys like `match_1`, `match_2`.
//! Group order is the order the keys appear in the payload and is kept
//! through deserialization and serialization.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;

use super::Platform;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GitHubMatch {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub stars: Option<u64>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub forks: Option<u64>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct YouTubeMatch {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub views: Option<u64>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub likes: Option<u64>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub comments: Option<u64>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub duration: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StackOverflowMatch {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub votes: Option<i64>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub answers: Option<u64>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub views: Option<u64>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub is_answered: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArxivMatch {
  #[serde(default)]
  pub authors: Vec<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub published: Option<String>,
  #[serde(default)]
  pub categories: Vec<String>,
}

/// Per-platform metadata, keyed by the item's `platform` tag
#[derive(Debug, Clone, PartialEq)]
pub enum MatchMetadata {
  GitHub(GitHubMatch),
  YouTube(YouTubeMatch),
  StackOverflow(StackOverflowMatch),
  Arxiv(ArxivMatch),
  /// Unknown platform, or a bag that does not fit its platform's shape
  Other { platform: String, raw: Value },
}

fn decode<T: for<'de> Deserialize<'de> + Default>(raw: &Value) -> Option<T> {
  if raw.is_null() {
    return Some(T::default());
  }
  serde_json::from_value(raw.clone()).ok()
}

impl MatchMetadata {
  pub fn from_parts(platform: &str, raw: Value) -> Self {
    let decoded = match platform {
      "github" => decode(&raw).map(MatchMetadata::GitHub),
      "youtube" => decode(&raw).map(MatchMetadata::YouTube),
      "stackoverflow" => decode(&raw).map(MatchMetadata::StackOverflow),
      "arxiv" => decode(&raw).map(MatchMetadata::Arxiv),
      _ => None,
    };

    decoded.unwrap_or_else(|| {
      tracing::debug!(platform, "context match metadata kept untyped");
      MatchMetadata::Other { platform: platform.to_string(), raw }
    })
  }

  pub fn platform_name(&self) -> &str {
    match self {
      MatchMetadata::GitHub(_) => "github",
      MatchMetadata::YouTube(_) => "youtube",
      MatchMetadata::StackOverflow(_) => "stackoverflow",
      MatchMetadata::Arxiv(_) => "arxiv",
      MatchMetadata::Other { platform, .. } => platform,
    }
  }

  pub fn platform(&self) -> Platform {
    Platform::from_name(self.platform_name())
  }

  fn to_value(&self) -> Value {
    let encoded = match self {
      MatchMetadata::GitHub(m) => serde_json::to_value(m),
      MatchMetadata::YouTube(m) => serde_json::to_value(m),
      MatchMetadata::StackOverflow(m) => serde_json::to_value(m),
      MatchMetadata::Arxiv(m) => serde_json::to_value(m),
      MatchMetadata::Other { raw, .. } => return raw.clone(),
    };
    encoded.unwrap_or(Value::Null)
  }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawContextMatchItem {
  platform: String,
  title: String,
  url: String,
  #[serde(default)]
  similarity: f64,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  match_reasons: Option<Vec<String>>,
  #[serde(default)]
  metadata: Value,
}

/// An item the API judged related to the primary result set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawContextMatchItem", into = "RawContextMatchItem")]
pub struct ContextMatchItem {
  pub title: String,
  pub url: String,
  /// Similarity in `[0, 1]`, computed upstream
  pub similarity: f64,
  pub match_reasons: Option<Vec<String>>,
  pub metadata: MatchMetadata,
}

impl ContextMatchItem {
  pub fn platform(&self) -> Platform {
    self.metadata.platform()
  }

  pub fn reasons(&self) -> &[String] {
    self.match_reasons.as_deref().unwrap_or(&[])
  }
}

impl From<RawContextMatchItem> for ContextMatchItem {
  fn from(raw: RawContextMatchItem) -> Self {
    Self {
      metadata: MatchMetadata::from_parts(&raw.platform, raw.metadata),
      title: raw.title,
      url: raw.url,
      similarity: raw.similarity,
      match_reasons: raw.match_reasons,
    }
  }
}

impl From<ContextMatchItem> for RawContextMatchItem {
  fn from(item: ContextMatchItem) -> Self {
    Self {
      platform: item.metadata.platform_name().to_string(),
      metadata: item.metadata.to_value(),
      title: item.title,
      url: item.url,
      similarity: item.similarity,
      match_reasons: item.match_reasons,
    }
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContextMatchGroup {
  pub key: String,
  pub items: Vec<ContextMatchItem>,
}

/// Context-match groups in payload order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContextMatches {
  groups: Vec<ContextMatchGroup>,
}

impl ContextMatches {
  pub fn new() -> Self {
    Self::default()
  }

  /// Add a group at the end, or replace the items of an existing key in place
  pub fn insert(&mut self, key: impl Into<String>, items: Vec<ContextMatchItem>) {
    let key = key.into();
    match self.groups.iter_mut().find(|group| group.key == key) {
      Some(group) => group.items = items,
      None => self.groups.push(ContextMatchGroup { key, items }),
    }
  }

  pub fn get(&self, key: &str) -> Option<&[ContextMatchItem]> {
    self.groups.iter().find(|group| group.key == key).map(|group| group.items.as_slice())
  }

  pub fn iter(&self) -> std::slice::Iter<'_, ContextMatchGroup> {
    self.groups.iter()
  }

  pub fn keys(&self) -> impl Iterator<Item = &str> {
    self.groups.iter().map(|group| group.key.as_str())
  }

  pub fn len(&self) -> usize {
    self.groups.len()
  }

  pub fn is_empty(&self) -> bool {
    self.groups.is_empty()
  }
}

impl<'a> IntoIterator for &'a ContextMatches {
  type Item = &'a ContextMatchGroup;
  type IntoIter = std::slice::Iter<'a, ContextMatchGroup>;

  fn into_iter(self) -> Self::IntoIter {
    self.groups.iter()
  }
}

impl<K: Into<String>> FromIterator<(K, Vec<ContextMatchItem>)> for ContextMatches {
  fn from_iter<I: IntoIterator<Item = (K, Vec<ContextMatchItem>)>>(iter: I) -> Self {
    let mut matches = ContextMatches::new();
    for (key, items) in iter {
      matches.insert(key, items);
    }
    matches
  }
}

impl Serialize for ContextMatches {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(self.groups.len()))?;
    for group in &self.groups {
      map.serialize_entry(&group.key, &group.items)?;
    }
    map.end()
  }
}

struct ContextMatchesVisitor;

impl<'de> Visitor<'de> for ContextMatchesVisitor {
  type Value = ContextMatches;

  fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
    formatter.write_str("a map of group keys to context match items")
  }

  fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
    let mut matches = ContextMatches::new();
    while let Some((key, items)) = access.next_entry::<String, Vec<ContextMatchItem>>()? {
      matches.insert(key, items);
    }
    Ok(matches)
  }
}

impl<'de> Deserialize<'de> for ContextMatches {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    deserializer.deserialize_map(ContextMatchesVisitor)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn test_group_order_follows_payload() {
    let text = r#"{
      "match_3": [],
      "match_1": [],
      "match_2": []
    }"#;
    let matches: ContextMatches = serde_json::from_str(text).unwrap();
    let keys: Vec<&str> = matches.keys().collect();
    assert_eq!(keys, vec!["match_3", "match_1", "match_2"]);

    let encoded = serde_json::to_string(&matches).unwrap();
    assert_eq!(encoded, r#"{"match_3":[],"match_1":[],"match_2":[]}"#);
  }

  #[test]
  fn test_metadata_is_typed_by_platform() {
    let item: ContextMatchItem = serde_json::from_value(json!({
      "platform": "github",
      "title": "tokio",
      "url": "https://github.com/tokio-rs/tokio",
      "similarity": 0.8,
      "metadata": {"stars": 25000, "forks": 2000, "updated_at": "2024-01-01"}
    }))
    .unwrap();

    assert_eq!(item.platform(), Platform::GitHub);
    match &item.metadata {
      MatchMetadata::GitHub(meta) => assert_eq!(meta.stars, Some(25000)),
      other => panic!("unexpected metadata: {other:?}"),
    }
    assert!(item.reasons().is_empty());
  }

  #[test]
  fn test_unknown_platform_keeps_raw_bag() {
    let item: ContextMatchItem = serde_json::from_value(json!({
      "platform": "mastodon",
      "title": "toot",
      "url": "https://example.social/1",
      "similarity": 0.7,
      "match_reasons": ["shared_tag"],
      "metadata": {"boosts": 3}
    }))
    .unwrap();

    assert_eq!(item.platform(), Platform::Other("mastodon".to_string()));
    assert_eq!(item.reasons(), ["shared_tag".to_string()]);

    let back = serde_json::to_value(&item).unwrap();
    assert_eq!(back["platform"], "mastodon");
    assert_eq!(back["metadata"]["boosts"], 3);
  }

  #[test]
  fn test_mistyped_bag_falls_back_to_other() {
    let item: ContextMatchItem = serde_json::from_value(json!({
      "platform": "youtube",
      "title": "talk",
      "url": "https://youtube.com/watch?v=1",
      "similarity": 0.7,
      "metadata": {"views": "lots"}
    }))
    .unwrap();

    assert!(matches!(item.metadata, MatchMetadata::Other { .. }));
    assert_eq!(item.platform(), Platform::YouTube);
  }
}
