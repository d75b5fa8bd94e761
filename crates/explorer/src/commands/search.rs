use anyhow::{bail, Result};

use crate::app::Explorer;
use crate::display::{output, render_recent};
use crate::session::SessionState;

pub async fn handle(app: &mut Explorer, term: String, save: bool, debug: bool) -> Result<()> {
  app.set_debug(debug);

  output::info(&format!("Searching for \"{}\"...", term.trim()));
  let state = app.search(&term).await;
  if let SessionState::Failed(message) = &state {
    bail!("{message}");
  }
  show_state(app, &state).await;

  if save {
    match app.save_current().await? {
      Some(keyword) => output::success(&format!("Saved \"{keyword}\"")),
      None => output::warn("Nothing to save"),
    }
  }
  Ok(())
}

/// Print a settled state: the error line, or the privacy notice, results and recent line
pub async fn show_state(app: &mut Explorer, state: &SessionState) {
  match state {
    SessionState::Failed(message) => output::error(message),
    SessionState::Success(_) => {
      if let Some(notice) = app.privacy_notice() {
        println!("{notice}\n");
      }
      if let Some(text) = app.render_results().await {
        println!("{text}");
      }
      if let Some(recent) = render_recent(&app.session().recent_searches().await) {
        println!("\n{recent}");
      }
    }
    SessionState::Idle | SessionState::Loading => {}
  }
}
