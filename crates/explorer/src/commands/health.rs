use anyhow::{Context, Result};

use crate::app::Explorer;
use crate::display::output;

pub async fn handle(app: &Explorer) -> Result<()> {
  let health = app.session().api().health().await.context("Health check failed")?;

  if health.is_healthy() {
    output::success(&format!("API is {}", health.status));
  } else {
    output::warn(&format!("API reports status '{}'", health.status));
  }
  output::info(&format!("Cache entries: {}", health.cache_size));
  if !health.memory_usage.is_empty() {
    output::info(&format!("Memory usage: {}", health.memory_usage));
  }
  if !health.timestamp.is_empty() {
    output::info(&format!("Checked at: {}", health.timestamp));
  }
  Ok(())
}
