//! Terminal rendering of a result payload
//!
//! Typed platform blocks always render. The `wikipedia` and
//! `knowledge_graph` sections are loose JSON; a required field missing
//! there is reported as a [`RenderError`] instead of being papered over.

use colored::{ColoredString, Colorize};
use serde_json::Value;

use crate::aggregate::{ContextMatchAggregator, GroupSummary, ItemSummary};
use crate::error::RenderError;
use crate::format::{format_date, format_duration, format_number, format_views, DateValue};
use crate::platform::{
  ArxivPaper, GitHubResults, Platform, SearchResults, StackOverflowQuestion, YouTubeVideo,
};
use crate::store::{SavedSearch, Theme};

/// Wikipedia summaries arrive cut at this many characters
const SUMMARY_LIMIT: usize = 500;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewOptions {
  pub theme: Theme,
  pub show_debug: bool,
}

struct Canvas {
  lines: Vec<String>,
  theme: Theme,
}

impl Canvas {
  fn new(theme: Theme) -> Self {
    Self { lines: Vec::new(), theme }
  }

  fn line(&mut self, text: impl Into<String>) {
    self.lines.push(text.into());
  }

  fn blank(&mut self) {
    self.lines.push(String::new());
  }

  fn accent(&self, text: &str) -> ColoredString {
    match self.theme {
      Theme::Light => text.blue().bold(),
      Theme::Dark => text.bright_cyan().bold(),
    }
  }

  fn muted(&self, text: &str) -> ColoredString {
    match self.theme {
      Theme::Light => text.bright_black(),
      Theme::Dark => text.white().dimmed(),
    }
  }

  fn section(&mut self, platform: &Platform, badge: &str) {
    self.blank();
    let title = format!("{} {}", platform_icon(platform), platform.display_name().bold());
    if badge.is_empty() {
      self.line(title);
    } else {
      let badge = self.muted(&format!("({badge})"));
      self.line(format!("{title}  {badge}"));
    }
  }

  fn finish(self) -> String {
    self.lines.join("\n")
  }
}

/// Brand-colored label; platforms without an icon get their initial
pub fn platform_icon(platform: &Platform) -> ColoredString {
  let (r, g, b) = platform.rgb();
  let label = match platform.icon() {
    Some(_) => platform.display_name().to_string(),
    None => platform.fallback_initial(),
  };
  format!("[{label}]").truecolor(r, g, b).bold()
}

pub struct ResultView;

impl ResultView {
  pub fn render(results: &SearchResults, options: &ViewOptions) -> Result<String, RenderError> {
    let mut canvas = Canvas::new(options.theme);
    let title = format!("Results for {}", canvas.accent(&results.keyword));
    canvas.line(title);

    if options.show_debug {
      render_debug(&mut canvas, results)?;
    }

    if let Some(matches) = results.context_matches.as_ref().filter(|m| !m.is_empty()) {
      render_context_matches(&mut canvas, &ContextMatchAggregator::summarize(matches));
    }
    if let Some(wikipedia) = &results.wikipedia {
      render_wikipedia(&mut canvas, wikipedia)?;
    }
    if let Some(graph) = &results.knowledge_graph {
      render_knowledge_graph(&mut canvas, graph)?;
    }

    let platforms = &results.results;
    if let Some(github) = &platforms.github {
      render_github(&mut canvas, github);
    }
    if let Some(videos) = &platforms.youtube {
      render_youtube(&mut canvas, videos);
    }
    if let Some(questions) = &platforms.stackoverflow {
      render_stackoverflow(&mut canvas, questions);
    }
    if let Some(papers) = &platforms.arxiv {
      render_arxiv(&mut canvas, papers);
    }

    Ok(canvas.finish())
  }
}

fn render_debug(canvas: &mut Canvas, results: &SearchResults) -> Result<(), RenderError> {
  if let Some(metadata) = &results.metadata {
    let pretty = serde_json::to_string_pretty(metadata)
      .map_err(|_| RenderError::invalid("metadata", "payload"))?;
    canvas.blank();
    for line in pretty.lines() {
      let muted = canvas.muted(line).to_string();
      canvas.line(muted);
    }
  }
  Ok(())
}

fn render_context_matches(canvas: &mut Canvas, groups: &[GroupSummary]) {
  canvas.blank();
  let heading = format!(
    "🔗 {}  {}",
    "Contextual Matches".bold(),
    canvas.muted("Related content across platforms")
  );
  canvas.line(heading);

  for group in groups {
    canvas.blank();
    match group.confidence {
      Some(confidence) => {
        let badge = canvas.accent(&format!("Confidence: {confidence}%"));
        canvas.line(format!("  Related Items  {badge}"));
      }
      None => canvas.line("  Related Items"),
    }

    for item in &group.items {
      render_match_item(canvas, item);
    }
  }
}

fn render_match_item(canvas: &mut Canvas, item: &ItemSummary) {
  let mut header = format!("    {} {}", platform_icon(&item.platform), item.platform.name());
  if item.match_percent > 0 {
    header.push_str(&format!("  {}% match", item.match_percent));
  }
  canvas.line(header);
  canvas.line(format!("      {}", item.title.bold()));
  let url = canvas.muted(&item.url).to_string();
  canvas.line(format!("      {url}"));

  if !item.badges.is_empty() {
    let badges: Vec<String> =
      item.badges.iter().map(|badge| format!("{} {}", badge.kind.symbol(), badge.label)).collect();
    canvas.line(format!("      {}", badges.join("  ")));
  }
  if !item.reasons.is_empty() {
    canvas.line(format!("      Matched because: {}", item.reasons.join(", ")));
  }
}

fn object<'a>(value: &'a Value, section: &'static str) -> Result<&'a serde_json::Map<String, Value>, RenderError> {
  value.as_object().ok_or_else(|| RenderError::invalid(section, "payload"))
}

fn required_str<'a>(
  fields: &'a serde_json::Map<String, Value>,
  section: &'static str,
  field: &'static str,
) -> Result<&'a str, RenderError> {
  match fields.get(field) {
    None | Some(Value::Null) => Err(RenderError::missing(section, field)),
    Some(Value::String(text)) => Ok(text),
    Some(_) => Err(RenderError::invalid(section, field)),
  }
}

fn optional_str<'a>(fields: &'a serde_json::Map<String, Value>, field: &str) -> Option<&'a str> {
  fields.get(field).and_then(Value::as_str).filter(|text| !text.is_empty())
}

fn render_wikipedia(canvas: &mut Canvas, wikipedia: &Value) -> Result<(), RenderError> {
  let fields = object(wikipedia, "wikipedia")?;
  let title = required_str(fields, "wikipedia", "title")?;
  let summary = required_str(fields, "wikipedia", "summary")?;

  canvas.section(&Platform::Wikipedia, "Authoritative Source");

  let mut header = format!("  {}", title.bold());
  if let Some(edited) = fields.get("last_edited").and_then(DateValue::from_json) {
    let edited = canvas.muted(&format!("Last edited: {}", format_date(edited)));
    header.push_str(&format!("  {edited}"));
  }
  canvas.line(header);

  let ellipsis = if summary.chars().count() >= SUMMARY_LIMIT { "..." } else { "" };
  canvas.line(format!("  {summary}{ellipsis}"));

  if let Some(categories) = fields.get("categories").and_then(Value::as_array) {
    let shown: Vec<&str> = categories
      .iter()
      .filter_map(Value::as_str)
      .take(3)
      .map(|category| category.strip_prefix("Category:").unwrap_or(category))
      .collect();
    if !shown.is_empty() {
      canvas.line(format!("  Categories: {}", shown.join(", ")));
    }
  }

  if let Some(url) = optional_str(fields, "url") {
    canvas.line(format!("  Read more on Wikipedia: {url}"));
  }
  Ok(())
}

fn render_knowledge_graph(canvas: &mut Canvas, graph: &Value) -> Result<(), RenderError> {
  let fields = object(graph, "knowledge_graph")?;

  canvas.section(&Platform::Google, "");
  canvas.line(format!("  {}", optional_str(fields, "title").unwrap_or_default().bold()));
  if let Some(description) = optional_str(fields, "description") {
    canvas.line(format!("  {description}"));
  }
  if let Some(image) = optional_str(fields, "image") {
    canvas.line(format!("  Image: {image}"));
  }
  if let Some(url) = optional_str(fields, "url") {
    canvas.line(format!("  {url}"));
  }
  Ok(())
}

fn render_github(canvas: &mut Canvas, github: &GitHubResults) {
  let mut badge = format!(
    "{} repos · {} code results",
    github.repositories.len(),
    format_number(github.code_results as f64)
  );
  if let Some(limit) = &github.rate_limit {
    badge.push_str(&format!(" · {}/{} API calls left", limit.remaining, limit.limit));
  }
  canvas.section(&Platform::GitHub, &badge);

  for repo in &github.repositories {
    let mut header = format!("  {}  ⭐ {}", repo.name.bold(), format_number(repo.stars as f64));
    if let Some(language) = repo.language.as_deref().filter(|l| !l.is_empty()) {
      header.push_str(&format!("  {language}"));
    }
    canvas.line(header);

    if let Some(description) = repo.description.as_deref().filter(|d| !d.is_empty()) {
      canvas.line(format!("    {description}"));
    }
    if !repo.topics.is_empty() {
      let topics: Vec<&str> = repo.topics.iter().take(5).map(String::as_str).collect();
      canvas.line(format!("    Topics: {}", topics.join(", ")));
    }
    let footer = format!(
      "by {} · {} forks · Updated {}",
      repo.owner,
      format_number(repo.forks as f64),
      format_date(&repo.updated_at)
    );
    let footer = canvas.muted(&footer);
    canvas.line(format!("    {footer}"));
    canvas.line(format!("    {}", repo.url));
  }
}

fn render_youtube(canvas: &mut Canvas, videos: &[YouTubeVideo]) {
  canvas.section(&Platform::YouTube, &format!("{} videos", videos.len()));

  for video in videos {
    canvas.line(format!("  {}", video.title.bold()));
    let stats = format!(
      "{} · {} · {} · {}",
      video.channel,
      format_views(video.views),
      format_duration(&video.duration),
      format_date(&video.published_at)
    );
    let stats = canvas.muted(&stats);
    canvas.line(format!("    {stats}"));
    if !video.tags.is_empty() {
      let tags: Vec<&str> = video.tags.iter().take(3).map(String::as_str).collect();
      canvas.line(format!("    Tags: {}", tags.join(", ")));
    }
    canvas.line(format!("    {}", video.url));
  }
}

fn render_stackoverflow(canvas: &mut Canvas, questions: &[StackOverflowQuestion]) {
  canvas.section(&Platform::StackOverflow, &format!("{} questions", questions.len()));

  for question in questions {
    let answered = if question.is_answered { " ✓" } else { "" };
    canvas.line(format!(
      "  {} votes · {} answers{answered}  {}",
      format_number(question.votes as f64),
      format_number(question.answers as f64),
      question.title.bold()
    ));
    if !question.tags.is_empty() {
      canvas.line(format!("    Tags: {}", question.tags.join(", ")));
    }

    let mut footer = String::new();
    if let Some(owner) = &question.owner {
      footer.push_str(&format!("by {owner} · "));
    }
    footer.push_str(&format!(
      "{} · asked {}",
      format_views(question.view_count),
      format_date(question.creation_date)
    ));
    let footer = canvas.muted(&footer);
    canvas.line(format!("    {footer}"));
    canvas.line(format!("    {}", question.url));
  }
}

fn render_arxiv(canvas: &mut Canvas, papers: &[ArxivPaper]) {
  canvas.section(&Platform::Arxiv, &format!("{} papers", papers.len()));

  for paper in papers {
    canvas.line(format!("  {}", paper.title.bold()));
    if let Some(doi) = &paper.doi {
      canvas.line(format!("    DOI: {doi}"));
    }

    let mut authors = paper.authors.iter().take(3).cloned().collect::<Vec<_>>().join(", ");
    if paper.authors.len() > 3 {
      authors.push_str(" et al.");
    }
    let byline = canvas.muted(&format!("{authors} · {}", format_date(&paper.published)));
    canvas.line(format!("    {byline}"));

    if !paper.summary.is_empty() {
      let excerpt: String = paper.summary.chars().take(200).collect();
      canvas.line(format!("    {excerpt}..."));
    }
    if !paper.categories.is_empty() {
      let categories: Vec<&str> = paper.categories.iter().take(5).map(String::as_str).collect();
      canvas.line(format!("    Categories: {}", categories.join(", ")));
    }
    canvas.line(format!("    {}", paper.url));
  }
}

/// Notice shown while privacy mode is on
pub fn render_privacy_notice(show_details: bool) -> String {
  let mut lines = vec![format!("🔒 {}", "Privacy Mode Active".bold())];
  if show_details {
    lines.push("  - No personal data is collected".to_string());
    lines.push("  - All searches are processed anonymously".to_string());
    lines.push("  - No cookies are used for tracking".to_string());
  }
  lines.join("\n")
}

pub fn render_recent(terms: &[String]) -> Option<String> {
  if terms.is_empty() {
    return None;
  }
  Some(format!("Recent: {}", terms.join(" · ")))
}

/// Saved-searches panel, newest first
pub fn render_saved(searches: &[SavedSearch]) -> String {
  if searches.is_empty() {
    return "No saved searches".to_string();
  }

  let mut lines = vec!["Saved Searches".bold().to_string()];
  for (index, search) in searches.iter().enumerate() {
    let saved_at = chrono::DateTime::from_timestamp_millis(search.timestamp)
      .map(|dt| dt.with_timezone(&chrono::Local).format("%Y-%m-%d %H:%M").to_string())
      .unwrap_or_else(|| crate::format::INVALID_DATE.to_string());
    lines.push(format!("  {:>2}. {}  {}", index + 1, search.keyword, saved_at.bright_black()));
  }
  lines.join("\n")
}
