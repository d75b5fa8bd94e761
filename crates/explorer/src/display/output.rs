//! Prefixed status lines on stderr
//!
//! Results go to stdout; everything the user should notice about the
//! run itself (progress, warnings, failures) goes through here.

use colored::{Color, Colorize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
  Info,
  Warn,
  Error,
  Success,
}

impl Level {
  fn tag(&self) -> &'static str {
    match self {
      Level::Info => "info",
      Level::Warn => "warn",
      Level::Error => "error",
      Level::Success => "done",
    }
  }

  fn color(&self) -> Color {
    match self {
      Level::Info => Color::Blue,
      Level::Warn => Color::Yellow,
      Level::Error => Color::Red,
      Level::Success => Color::Green,
    }
  }
}

/// `[info]  message`, padded so multi-line messages stay aligned
pub fn prefixed(level: Level, message: &str) -> String {
  let tag = level.tag();
  let padding = " ".repeat(7usize.saturating_sub(tag.len() + 2));
  let prefix = format!("[{}]{padding}", tag.color(level.color()).bold());
  message.lines().map(|line| format!("{prefix} {line}")).collect::<Vec<_>>().join("\n")
}

fn emit(level: Level, message: &str) {
  eprintln!("{}", prefixed(level, message));
}

pub fn info(message: &str) {
  emit(Level::Info, message);
}

pub fn warn(message: &str) {
  emit(Level::Warn, message);
}

pub fn error(message: &str) {
  emit(Level::Error, message);
}

pub fn success(message: &str) {
  emit(Level::Success, message);
}

/// Current terminal width, bounded to something readable
pub fn terminal_width() -> usize {
  let (_, columns) = console::Term::stdout().size();
  usize::from(columns).clamp(40, 100)
}

pub fn banner_line(length: usize, ch: char) -> String {
  ch.to_string().repeat(length)
}

/// Title framed by rule lines
pub fn banner(title: &str, width: usize, ch: char) -> String {
  let rule = banner_line(width, ch);
  format!("{rule}\n{title}\n{rule}")
}

/// Banner on stderr for section starts
pub fn announce(title: &str) {
  let text = banner(title, terminal_width().min(60), '-');
  eprintln!("{}", text.blue().bold());
}
