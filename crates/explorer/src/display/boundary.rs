//! Failure containment for the results section
//!
//! A render failure replaces the results area with a fallback and keeps
//! it there until the user retries. Everything outside the results area
//! (search input, history, saved panel) keeps working.

use colored::Colorize;

use super::view::{ResultView, ViewOptions};
use crate::error::RenderError;
use crate::platform::SearchResults;

pub const FALLBACK_TITLE: &str = "Something went wrong";
pub const FALLBACK_HINT: &str = "Please try refreshing the page or try a different search.";
pub const RETRY_LABEL: &str = "Try again";

/// Handed out with a fallback; consuming it clears the caught failure
#[derive(Debug)]
pub struct RetryHandle {
  error: RenderError,
}

impl RetryHandle {
  pub fn error(&self) -> &RenderError {
    &self.error
  }
}

#[derive(Debug)]
pub enum Guarded {
  Ok(String),
  Failed(RetryHandle),
}

impl Guarded {
  pub fn is_failed(&self) -> bool {
    matches!(self, Guarded::Failed(_))
  }
}

#[derive(Debug, Default)]
pub struct ResultsBoundary {
  caught: Option<RenderError>,
}

impl ResultsBoundary {
  pub fn new() -> Self {
    Self::default()
  }

  /// Run `render` unless a failure is already caught
  pub fn render_with<F>(&mut self, render: F) -> Guarded
  where
    F: FnOnce() -> Result<String, RenderError>,
  {
    if let Some(error) = &self.caught {
      return Guarded::Failed(RetryHandle { error: error.clone() });
    }

    match render() {
      Ok(text) => Guarded::Ok(text),
      Err(error) => {
        tracing::error!(%error, "results failed to render");
        self.caught = Some(error.clone());
        Guarded::Failed(RetryHandle { error })
      }
    }
  }

  pub fn render(&mut self, results: &SearchResults, options: &ViewOptions) -> Guarded {
    self.render_with(|| ResultView::render(results, options))
  }

  /// Clear the caught failure so the next render tries again
  pub fn retry(&mut self, handle: RetryHandle) {
    tracing::debug!(error = %handle.error, "retrying results render");
    self.caught = None;
  }

  pub fn is_failed(&self) -> bool {
    self.caught.is_some()
  }

  pub fn caught(&self) -> Option<&RenderError> {
    self.caught.as_ref()
  }
}

/// Text shown in place of the results area
pub fn fallback_text() -> String {
  format!("⚠️  {}\n{}\n[{}]", FALLBACK_TITLE.red().bold(), FALLBACK_HINT, RETRY_LABEL)
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::cell::Cell;

  #[test]
  fn test_failure_sticks_until_retry() {
    let mut boundary = ResultsBoundary::new();
    let calls = Cell::new(0);

    let first = boundary.render_with(|| {
      calls.set(calls.get() + 1);
      Err(RenderError::missing("wikipedia", "title"))
    });
    assert!(first.is_failed());
    assert!(boundary.is_failed());

    let second = boundary.render_with(|| {
      calls.set(calls.get() + 1);
      Ok("fine".to_string())
    });
    assert!(second.is_failed());
    assert_eq!(calls.get(), 1);

    let Guarded::Failed(handle) = second else { panic!("expected fallback") };
    assert_eq!(handle.error(), &RenderError::missing("wikipedia", "title"));
    boundary.retry(handle);
    assert!(!boundary.is_failed());

    match boundary.render_with(|| Ok("fine".to_string())) {
      Guarded::Ok(text) => assert_eq!(text, "fine"),
      Guarded::Failed(_) => panic!("retry should clear the failure"),
    }
  }

  #[test]
  fn test_fallback_text() {
    colored::control::set_override(false);
    let text = fallback_text();
    assert!(text.contains(FALLBACK_TITLE));
    assert!(text.contains(FALLBACK_HINT));
    assert!(text.contains("[Try again]"));
  }
}
