//! One running client: session, saved searches, preferences and the results boundary
//!
//! Commands and the interactive shell drive the client only through this type.

use anyhow::{Context, Result};
use std::sync::Arc;

use crate::api::{HttpSearchApi, SearchApi};
use crate::config::ExplorerConfig;
use crate::display::{
  fallback_text, render_privacy_notice, Guarded, ResultsBoundary, RetryHandle, ViewOptions,
};
use crate::history::RecentSearchHistory;
use crate::saved::SavedSearchStore;
use crate::session::{SearchSession, SessionState};
use crate::store::{FileStore, PersistentStore, SavedSearch, Theme};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Preferences {
  pub theme: Theme,
  pub privacy_mode: bool,
  pub show_privacy_details: bool,
  pub show_debug: bool,
  pub show_saved: bool,
}

impl Preferences {
  pub fn view_options(&self) -> ViewOptions {
    ViewOptions { theme: self.theme, show_debug: self.show_debug }
  }
}

pub struct Explorer {
  store: Arc<PersistentStore>,
  session: SearchSession,
  saved: SavedSearchStore,
  boundary: ResultsBoundary,
  pending_retry: Option<RetryHandle>,
  prefs: Preferences,
}

impl Explorer {
  /// Client backed by the HTTP API and the on-disk settings in `config.data_dir`
  pub fn open(config: &ExplorerConfig) -> Result<Self> {
    let backend = FileStore::new(config.state_dir())
      .with_context(|| format!("Failed to open state directory {}", config.state_dir().display()))?;
    let api = HttpSearchApi::with_config(config.api.clone()).context("Failed to build HTTP client")?;
    Ok(Self::with_parts(Arc::new(api), PersistentStore::load(backend)))
  }

  pub fn with_parts(api: Arc<dyn SearchApi>, store: Arc<PersistentStore>) -> Self {
    let snapshot = store.snapshot();
    let prefs = Preferences {
      theme: snapshot.theme,
      privacy_mode: snapshot.privacy_mode,
      ..Default::default()
    };

    let history = RecentSearchHistory::open(store.clone());
    let saved = SavedSearchStore::open(store.clone());
    Self {
      session: SearchSession::new(api, history),
      saved,
      boundary: ResultsBoundary::new(),
      pending_retry: None,
      prefs,
      store,
    }
  }

  pub fn session(&self) -> &SearchSession {
    &self.session
  }

  pub fn saved(&self) -> &SavedSearchStore {
    &self.saved
  }

  pub fn preferences(&self) -> Preferences {
    self.prefs
  }

  pub async fn search(&self, term: &str) -> SessionState {
    self.session.execute(term).await
  }

  /// Snapshot the result on display. Returns the saved keyword, if any.
  pub async fn save_current(&mut self) -> Result<Option<String>> {
    let current = self.session.results().await;
    self.saved.save(current.as_ref()).context("Failed to persist saved searches")?;
    Ok(current.map(|results| results.keyword))
  }

  /// Whether the result on display is already saved; save is only offered when it is not
  pub async fn current_is_saved(&self) -> bool {
    match self.session.results().await {
      Some(results) => self.saved.is_saved(&results.keyword),
      None => false,
    }
  }

  /// Show the saved entry for `keyword`; `None` when nothing is saved under it
  pub async fn load_saved(&mut self, keyword: &str) -> Option<SessionState> {
    let entry: SavedSearch = self.saved.find(keyword)?.clone();
    self.prefs.show_saved = false;
    Some(self.saved.load(&entry, &self.session).await)
  }

  pub fn remove_saved(&mut self, keyword: &str) -> Result<usize> {
    let before = self.saved.len();
    self.saved.remove(keyword).context("Failed to persist saved searches")?;
    Ok(before - self.saved.len())
  }

  /// Set the theme, or flip it when `theme` is `None`
  pub fn set_theme(&mut self, theme: Option<Theme>) -> Result<Theme> {
    let theme = theme.unwrap_or_else(|| self.prefs.theme.toggled());
    self.store.write_theme(theme).context("Failed to persist theme")?;
    self.prefs.theme = theme;
    Ok(theme)
  }

  /// Set privacy mode, or flip it when `enabled` is `None`
  pub fn set_privacy(&mut self, enabled: Option<bool>) -> Result<bool> {
    let enabled = enabled.unwrap_or(!self.prefs.privacy_mode);
    self.store.write_privacy_mode(enabled).context("Failed to persist privacy mode")?;
    self.prefs.privacy_mode = enabled;
    Ok(enabled)
  }

  pub fn toggle_privacy_details(&mut self) -> bool {
    self.prefs.show_privacy_details = !self.prefs.show_privacy_details;
    self.prefs.show_privacy_details
  }

  pub fn toggle_debug(&mut self) -> bool {
    self.prefs.show_debug = !self.prefs.show_debug;
    self.prefs.show_debug
  }

  pub fn toggle_saved_panel(&mut self) -> bool {
    self.prefs.show_saved = !self.prefs.show_saved;
    self.prefs.show_saved
  }

  pub fn set_debug(&mut self, enabled: bool) {
    self.prefs.show_debug = enabled;
  }

  pub fn privacy_notice(&self) -> Option<String> {
    self.prefs.privacy_mode.then(|| render_privacy_notice(self.prefs.show_privacy_details))
  }

  /// Results area for the current state, or the fallback while the boundary is failed
  pub async fn render_results(&mut self) -> Option<String> {
    let results = self.session.results().await?;
    match self.boundary.render(&results, &self.prefs.view_options()) {
      Guarded::Ok(text) => Some(text),
      Guarded::Failed(handle) => {
        self.pending_retry = Some(handle);
        Some(fallback_text())
      }
    }
  }

  /// Clear a caught render failure. Returns false when there was none.
  pub fn retry(&mut self) -> bool {
    match self.pending_retry.take() {
      Some(handle) => {
        self.boundary.retry(handle);
        true
      }
      None => false,
    }
  }

  pub fn results_failed(&self) -> bool {
    self.boundary.is_failed()
  }
}
