use anyhow::{bail, Result};

use crate::app::Explorer;
use crate::display::output;
use crate::store::Theme;

pub fn theme(app: &mut Explorer, value: Option<String>) -> Result<()> {
  let requested = match value.as_deref() {
    None => None,
    Some("light") => Some(Theme::Light),
    Some("dark") => Some(Theme::Dark),
    Some(other) => bail!("Unknown theme '{other}'. Use 'light' or 'dark'."),
  };

  let theme = app.set_theme(requested)?;
  output::success(&format!("Theme: {theme}"));
  Ok(())
}

pub fn privacy(app: &mut Explorer, value: Option<String>) -> Result<()> {
  let requested = match value.as_deref() {
    None => None,
    Some("on") => Some(true),
    Some("off") => Some(false),
    Some(other) => bail!("Unknown privacy setting '{other}'. Use 'on' or 'off'."),
  };

  let enabled = app.set_privacy(requested)?;
  output::success(&format!("Privacy mode: {}", if enabled { "on" } else { "off" }));
  if let Some(notice) = app.privacy_notice() {
    println!("{notice}");
  }
  Ok(())
}
