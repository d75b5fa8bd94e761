use anyhow::Result;

use crate::app::Explorer;
use crate::display::{output, render_recent};

pub async fn handle(app: &Explorer) -> Result<()> {
  match render_recent(&app.session().recent_searches().await) {
    Some(line) => println!("{line}"),
    None => output::info("No recent searches"),
  }
  Ok(())
}
