//! Interactive loop over stdin
//!
//! One session and one results boundary live for the whole loop, so a
//! render failure stays on screen until `retry`.

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use super::{preferences, saved, search};
use crate::app::Explorer;
use crate::display::{output, render_saved};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
  Search(String),
  Save,
  Saved,
  Load(String),
  Remove(String),
  Recent,
  Theme,
  Privacy,
  Details,
  Debug,
  Retry,
  Help,
  Quit,
  Empty,
}

impl ShellCommand {
  /// Anything that is not a known command word is searched for as typed
  pub fn parse(line: &str) -> Self {
    let trimmed = line.trim();
    let (word, rest) = match trimmed.split_once(char::is_whitespace) {
      Some((word, rest)) => (word, rest.trim()),
      None => (trimmed, ""),
    };

    match (word, rest) {
      ("", _) => ShellCommand::Empty,
      ("search", term) => ShellCommand::Search(term.to_string()),
      ("save", "") => ShellCommand::Save,
      ("saved", "") => ShellCommand::Saved,
      ("load", keyword) if !keyword.is_empty() => ShellCommand::Load(keyword.to_string()),
      ("remove", keyword) if !keyword.is_empty() => ShellCommand::Remove(keyword.to_string()),
      ("recent", "") => ShellCommand::Recent,
      ("theme", "") => ShellCommand::Theme,
      ("privacy", "") => ShellCommand::Privacy,
      ("details", "") => ShellCommand::Details,
      ("debug", "") => ShellCommand::Debug,
      ("retry", "") => ShellCommand::Retry,
      ("help", "") => ShellCommand::Help,
      ("quit", "") | ("exit", "") => ShellCommand::Quit,
      _ => ShellCommand::Search(trimmed.to_string()),
    }
  }
}

const HELP: &str = "\
  <term> | search <term>   run a query
  save                     save the result on display
  saved                    show or hide saved searches
  load <keyword>           show a saved search
  remove <keyword>         delete a saved search
  recent                   list recent searches
  theme | privacy          toggle theme or privacy mode
  details                  expand or collapse the privacy notice
  debug                    show or hide debug info
  retry                    re-render after a display failure
  quit                     leave";

pub async fn handle(app: &mut Explorer) -> Result<()> {
  output::announce("Knowledge Explorer");
  if let Some(notice) = app.privacy_notice() {
    println!("{notice}");
  }

  let mut lines = BufReader::new(tokio::io::stdin()).lines();
  let mut stdout = tokio::io::stdout();

  loop {
    stdout.write_all(b"explorer> ").await.context("Failed to write prompt")?;
    stdout.flush().await.context("Failed to write prompt")?;

    let Some(line) = lines.next_line().await.context("Failed to read input")? else {
      break;
    };

    if !dispatch(app, ShellCommand::parse(&line)).await? {
      break;
    }
  }

  Ok(())
}

/// Run one command. Returns false when the loop should stop.
async fn dispatch(app: &mut Explorer, command: ShellCommand) -> Result<bool> {
  match command {
    ShellCommand::Empty => {}
    ShellCommand::Quit => return Ok(false),
    ShellCommand::Help => println!("{HELP}"),
    ShellCommand::Search(term) => {
      let state = app.search(&term).await;
      search::show_state(app, &state).await;
    }
    ShellCommand::Save => {
      if app.current_is_saved().await {
        output::info("Already saved");
      } else {
        match app.save_current().await {
          Ok(Some(keyword)) => output::success(&format!("Saved \"{keyword}\"")),
          Ok(None) => output::warn("Nothing to save"),
          Err(e) => output::error(&format!("{e:#}")),
        }
      }
    }
    ShellCommand::Saved => {
      if app.toggle_saved_panel() {
        println!("{}", render_saved(app.saved().entries()));
      }
    }
    ShellCommand::Load(keyword) => {
      if let Err(e) = saved::load(app, &keyword).await {
        output::warn(&e.to_string());
      }
    }
    ShellCommand::Remove(keyword) => {
      if let Err(e) = saved::remove(app, &keyword) {
        output::error(&format!("{e:#}"));
      }
    }
    ShellCommand::Recent => super::recent::handle(app).await?,
    ShellCommand::Theme => {
      if let Err(e) = preferences::theme(app, None) {
        output::error(&format!("{e:#}"));
      }
    }
    ShellCommand::Privacy => {
      if let Err(e) = preferences::privacy(app, None) {
        output::error(&format!("{e:#}"));
      }
    }
    ShellCommand::Details => {
      app.toggle_privacy_details();
      match app.privacy_notice() {
        Some(notice) => println!("{notice}"),
        None => output::info("Privacy mode is off"),
      }
    }
    ShellCommand::Debug => {
      let enabled = app.toggle_debug();
      output::info(&format!("Debug info {}", if enabled { "shown" } else { "hidden" }));
    }
    ShellCommand::Retry => {
      if app.retry() {
        if let Some(text) = app.render_results().await {
          println!("{text}");
        }
      } else {
        output::info("Nothing to retry");
      }
    }
  }

  Ok(true)
}
