use serde::{Deserialize, Serialize};

pub mod context;

pub use context::{ContextMatchGroup, ContextMatchItem, ContextMatches, MatchMetadata};

/// Content platforms the aggregation API reports on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Platform {
  GitHub,
  YouTube,
  StackOverflow,
  Arxiv,
  Wikipedia,
  Google,
  Other(String),
}

impl Platform {
  pub fn from_name(name: &str) -> Self {
    match name {
      "github" => Platform::GitHub,
      "youtube" => Platform::YouTube,
      "stackoverflow" => Platform::StackOverflow,
      "arxiv" => Platform::Arxiv,
      "wikipedia" => Platform::Wikipedia,
      "google" => Platform::Google,
      other => Platform::Other(other.to_string()),
    }
  }

  pub fn name(&self) -> &str {
    match self {
      Platform::GitHub => "github",
      Platform::YouTube => "youtube",
      Platform::StackOverflow => "stackoverflow",
      Platform::Arxiv => "arxiv",
      Platform::Wikipedia => "wikipedia",
      Platform::Google => "google",
      Platform::Other(name) => name,
    }
  }

  pub fn display_name(&self) -> &str {
    match self {
      Platform::GitHub => "GitHub",
      Platform::YouTube => "YouTube",
      Platform::StackOverflow => "Stack Overflow",
      Platform::Arxiv => "arXiv",
      Platform::Wikipedia => "Wikipedia",
      Platform::Google => "Knowledge Graph",
      Platform::Other(name) => name,
    }
  }

  /// Icon asset path, if the platform has one
  pub fn icon(&self) -> Option<&'static str> {
    match self {
      Platform::GitHub => Some("/assets/github-mark.png"),
      Platform::YouTube => Some("/assets/youtube-icon.png"),
      Platform::StackOverflow => Some("/assets/stackoverflow-icon.png"),
      Platform::Arxiv => Some("/assets/arxiv-icon.png"),
      Platform::Wikipedia => Some("/assets/wikipedia-icon.png"),
      Platform::Google => Some("/assets/google-icon.png"),
      Platform::Other(_) => None,
    }
  }

  /// Brand color as a hex string
  pub fn color(&self) -> &'static str {
    match self {
      Platform::GitHub => "#181717",
      Platform::YouTube => "#FF0000",
      Platform::StackOverflow => "#F48024",
      Platform::Arxiv => "#B31B1B",
      _ => "#6B7280",
    }
  }

  /// Brand color as RGB, for truecolor terminals
  pub fn rgb(&self) -> (u8, u8, u8) {
    let hex = self.color().trim_start_matches('#');
    let channel = |range: std::ops::Range<usize>| {
      hex.get(range).and_then(|h| u8::from_str_radix(h, 16).ok()).unwrap_or(0x80)
    };
    (channel(0..2), channel(2..4), channel(4..6))
  }

  /// Single-letter stand-in used when no icon is available
  pub fn fallback_initial(&self) -> String {
    self.name().chars().next().map(|c| c.to_uppercase().collect()).unwrap_or_default()
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateLimit {
  pub remaining: u64,
  pub limit: u64,
  pub reset: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Repository {
  pub name: String,
  #[serde(default)]
  pub description: Option<String>,
  pub url: String,
  #[serde(default)]
  pub stars: u64,
  #[serde(default)]
  pub language: Option<String>,
  #[serde(default)]
  pub updated_at: String,
  #[serde(default)]
  pub owner: String,
  #[serde(default)]
  pub forks: u64,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub topics: Vec<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub license: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub open_issues: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GitHubResults {
  #[serde(default)]
  pub repositories: Vec<Repository>,
  #[serde(default)]
  pub code_results: u64,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub rate_limit: Option<RateLimit>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YouTubeVideo {
  pub title: String,
  #[serde(default)]
  pub description: String,
  pub url: String,
  #[serde(default)]
  pub thumbnail: String,
  #[serde(default)]
  pub channel: String,
  #[serde(default)]
  pub published_at: String,
  #[serde(default)]
  pub views: u64,
  #[serde(default)]
  pub duration: String,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub tags: Vec<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub likes: Option<u64>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub comments: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackOverflowQuestion {
  pub title: String,
  pub url: String,
  #[serde(default)]
  pub answers: u64,
  #[serde(default)]
  pub votes: i64,
  #[serde(default)]
  pub tags: Vec<String>,
  #[serde(default)]
  pub body: String,
  #[serde(default)]
  pub creation_date: i64,
  #[serde(default)]
  pub view_count: u64,
  #[serde(default)]
  pub is_answered: bool,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub accepted_answer_id: Option<u64>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub owner: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArxivPaper {
  pub title: String,
  #[serde(default)]
  pub authors: Vec<String>,
  #[serde(default)]
  pub published: String,
  #[serde(default)]
  pub summary: String,
  pub url: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub doi: Option<String>,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub categories: Vec<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub pdf_url: Option<String>,
}

/// Per-platform result blocks; a platform the API could not reach is absent
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlatformResults {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub github: Option<GitHubResults>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub youtube: Option<Vec<YouTubeVideo>>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub stackoverflow: Option<Vec<StackOverflowQuestion>>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub arxiv: Option<Vec<ArxivPaper>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchMetadata {
  pub timestamp: String,
  pub processing_time: f64,
}

/// One completed query as returned by the aggregation API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResults {
  pub keyword: String,
  #[serde(default)]
  pub results: PlatformResults,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub context_matches: Option<ContextMatches>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub wikipedia: Option<serde_json::Value>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub knowledge_graph: Option<serde_json::Value>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub metadata: Option<SearchMetadata>,
}

impl SearchResults {
  /// An empty payload for `keyword`
  pub fn empty(keyword: impl Into<String>) -> Self {
    Self {
      keyword: keyword.into(),
      results: PlatformResults::default(),
      context_matches: None,
      wikipedia: None,
      knowledge_graph: None,
      metadata: None,
    }
  }
}
