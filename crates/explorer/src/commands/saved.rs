use anyhow::{anyhow, Result};

use crate::app::Explorer;
use crate::display::{output, render_saved};

pub fn list(app: &Explorer) -> Result<()> {
  println!("{}", render_saved(app.saved().entries()));
  Ok(())
}

pub async fn load(app: &mut Explorer, keyword: &str) -> Result<()> {
  let state = app
    .load_saved(keyword)
    .await
    .ok_or_else(|| anyhow!("No saved search named \"{keyword}\". Use 'explorer saved list' to see them."))?;

  super::search::show_state(app, &state).await;
  Ok(())
}

pub fn remove(app: &mut Explorer, keyword: &str) -> Result<()> {
  let removed = app.remove_saved(keyword)?;
  if removed == 0 {
    output::warn(&format!("No saved search named \"{keyword}\""));
  } else {
    output::success(&format!("Removed \"{keyword}\""));
  }
  Ok(())
}
