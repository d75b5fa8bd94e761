//! Scoring and badge extraction for context-match groups
//!
//! Groups arrive already formed by the API. This module only derives what
//! the view shows: a confidence badge per group (the best similarity in it),
//! a match percent per item, and metadata badges picked by platform tag.

use crate::format::{format_number, format_views};
use crate::platform::{ContextMatchGroup, ContextMatchItem, ContextMatches, MatchMetadata, Platform};

/// Similarity in `[0, 1]` as a rounded integer percent
pub fn percent(similarity: f64) -> u32 {
  (similarity.clamp(0.0, 1.0) * 100.0).round() as u32
}

/// Best similarity in the group as a percent. Groups from the API are never empty;
/// an empty one yields `None`.
pub fn group_confidence(items: &[ContextMatchItem]) -> Option<u32> {
  items.iter().map(|item| item.similarity).reduce(f64::max).map(percent)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeKind {
  Views,
  Stars,
  Votes,
}

impl BadgeKind {
  pub fn symbol(&self) -> &'static str {
    match self {
      BadgeKind::Views => "👁️",
      BadgeKind::Stars => "⭐",
      BadgeKind::Votes => "▲",
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchBadge {
  pub kind: BadgeKind,
  pub label: String,
}

impl MatchBadge {
  fn views(views: u64) -> Self {
    Self { kind: BadgeKind::Views, label: format_views(views) }
  }

  fn stars(stars: u64) -> Self {
    Self { kind: BadgeKind::Stars, label: format_number(stars as f64) }
  }

  fn votes(votes: i64) -> Self {
    Self { kind: BadgeKind::Votes, label: format_number(votes as f64) }
  }
}

/// Badges for an item, in views, stars, votes order. Zero counts are not shown.
pub fn item_badges(item: &ContextMatchItem) -> Vec<MatchBadge> {
  let nonzero = |n: &u64| *n != 0;

  match &item.metadata {
    MatchMetadata::YouTube(meta) => meta.views.filter(nonzero).map(MatchBadge::views).into_iter().collect(),
    MatchMetadata::GitHub(meta) => meta.stars.filter(nonzero).map(MatchBadge::stars).into_iter().collect(),
    MatchMetadata::StackOverflow(meta) => {
      let mut badges = Vec::new();
      if let Some(views) = meta.views.filter(nonzero) {
        badges.push(MatchBadge::views(views));
      }
      if let Some(votes) = meta.votes.filter(|v| *v != 0) {
        badges.push(MatchBadge::votes(votes));
      }
      badges
    }
    MatchMetadata::Arxiv(_) | MatchMetadata::Other { .. } => Vec::new(),
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ItemSummary {
  pub platform: Platform,
  pub title: String,
  pub url: String,
  pub match_percent: u32,
  pub badges: Vec<MatchBadge>,
  pub reasons: Vec<String>,
}

impl ItemSummary {
  pub fn from_item(item: &ContextMatchItem) -> Self {
    Self {
      platform: item.platform(),
      title: item.title.clone(),
      url: item.url.clone(),
      match_percent: percent(item.similarity),
      badges: item_badges(item),
      reasons: item.reasons().to_vec(),
    }
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GroupSummary {
  pub key: String,
  pub confidence: Option<u32>,
  pub items: Vec<ItemSummary>,
}

impl GroupSummary {
  pub fn from_group(group: &ContextMatchGroup) -> Self {
    Self {
      key: group.key.clone(),
      confidence: group_confidence(&group.items),
      items: group.items.iter().map(ItemSummary::from_item).collect(),
    }
  }
}

pub struct ContextMatchAggregator;

impl ContextMatchAggregator {
  /// Summaries in the payload's group order; no re-sorting by confidence
  pub fn summarize(matches: &ContextMatches) -> Vec<GroupSummary> {
    matches.iter().map(GroupSummary::from_group).collect()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::platform::context::{GitHubMatch, StackOverflowMatch, YouTubeMatch};

  fn item(similarity: f64, metadata: MatchMetadata) -> ContextMatchItem {
    ContextMatchItem {
      title: "item".to_string(),
      url: "https://example.com".to_string(),
      similarity,
      match_reasons: None,
      metadata,
    }
  }

  fn github(similarity: f64) -> ContextMatchItem {
    item(similarity, MatchMetadata::GitHub(GitHubMatch::default()))
  }

  #[test]
  fn test_group_confidence_is_max_similarity() {
    let items = vec![github(0.42), github(0.91), github(0.77)];
    assert_eq!(group_confidence(&items), Some(91));

    let percents: Vec<u32> = items.iter().map(|i| percent(i.similarity)).collect();
    assert_eq!(percents, vec![42, 91, 77]);
  }

  #[test]
  fn test_group_confidence_empty_group() {
    assert_eq!(group_confidence(&[]), None);
  }

  #[test]
  fn test_percent_rounding() {
    assert_eq!(percent(0.0), 0);
    assert_eq!(percent(0.666), 67);
    assert_eq!(percent(0.005), 1);
    assert_eq!(percent(1.0), 100);
  }

  #[test]
  fn test_badges_follow_platform_tag() {
    let video = item(
      0.7,
      MatchMetadata::YouTube(YouTubeMatch { views: Some(1_500), ..Default::default() }),
    );
    assert_eq!(
      item_badges(&video),
      vec![MatchBadge { kind: BadgeKind::Views, label: "1.5K views".to_string() }]
    );

    let repo = item(
      0.7,
      MatchMetadata::GitHub(GitHubMatch { stars: Some(12_345), ..Default::default() }),
    );
    assert_eq!(item_badges(&repo)[0].label, "12,345");

    let question = item(
      0.7,
      MatchMetadata::StackOverflow(StackOverflowMatch {
        votes: Some(42),
        views: Some(2_300_000),
        ..Default::default()
      }),
    );
    let kinds: Vec<BadgeKind> = item_badges(&question).iter().map(|b| b.kind).collect();
    assert_eq!(kinds, vec![BadgeKind::Views, BadgeKind::Votes]);
  }

  #[test]
  fn test_zero_counts_hide_badges() {
    let repo = item(0.7, MatchMetadata::GitHub(GitHubMatch { stars: Some(0), ..Default::default() }));
    assert!(item_badges(&repo).is_empty());
  }

  #[test]
  fn test_summarize_keeps_group_order() {
    let matches: ContextMatches =
      vec![("match_2", vec![github(0.3)]), ("match_1", vec![github(0.9), github(0.95)])]
        .into_iter()
        .collect();

    let summaries = ContextMatchAggregator::summarize(&matches);
    let keys: Vec<&str> = summaries.iter().map(|s| s.key.as_str()).collect();
    assert_eq!(keys, vec!["match_2", "match_1"]);
    assert_eq!(summaries[1].confidence, Some(95));
  }
}
