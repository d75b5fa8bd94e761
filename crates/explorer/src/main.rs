use anyhow::Result;
use clap::{Parser, Subcommand};

use explorer::app::Explorer;
use explorer::commands;
use explorer::config::ExplorerConfig;

#[derive(Parser)]
#[command(name = "explorer")]
#[command(about = "Search GitHub, YouTube, Stack Overflow and arXiv from one place")]
#[command(version)]
struct Cli {
  /// Base URL of the aggregation API (or use EXPLORER_API_URL env var)
  #[arg(long, env = "EXPLORER_API_URL")]
  api_url: Option<String>,

  /// Request timeout in seconds (or use EXPLORER_TIMEOUT env var)
  #[arg(long, env = "EXPLORER_TIMEOUT")]
  timeout: Option<u64>,

  /// Enable debug logging
  #[arg(short, long)]
  verbose: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Search every platform for a keyword
  Search {
    /// Keyword to search for
    term: String,
    /// Save the result after it loads
    #[arg(long)]
    save: bool,
    /// Show debug info with the result
    #[arg(long)]
    debug: bool,
  },
  /// List recent searches
  Recent,
  /// Manage saved searches
  Saved {
    #[command(subcommand)]
    action: SavedAction,
  },
  /// Show or change the theme (toggles when no value is given)
  Theme {
    /// light or dark
    value: Option<String>,
  },
  /// Show or change privacy mode (toggles when no value is given)
  Privacy {
    /// on or off
    value: Option<String>,
  },
  /// Check that the API is reachable
  Health,
  /// Interactive search shell
  Shell,
}

#[derive(Subcommand)]
enum SavedAction {
  /// List saved searches
  List,
  /// Show a saved search
  Load {
    keyword: String,
  },
  /// Delete a saved search
  Remove {
    keyword: String,
  },
}

#[tokio::main]
async fn main() -> Result<()> {
  let cli = Cli::parse();
  explorer::logging::init(cli.verbose);

  let config = ExplorerConfig::load()?.with_overrides(cli.api_url, cli.timeout);
  tracing::debug!(api = %config.api.base_url, data_dir = %config.data_dir.display(), "configuration loaded");
  let mut app = Explorer::open(&config)?;

  match cli.command {
    Commands::Search { term, save, debug } => {
      commands::search::handle(&mut app, term, save, debug).await
    }
    Commands::Recent => commands::recent::handle(&app).await,
    Commands::Saved { action } => match action {
      SavedAction::List => commands::saved::list(&app),
      SavedAction::Load { keyword } => commands::saved::load(&mut app, &keyword).await,
      SavedAction::Remove { keyword } => commands::saved::remove(&mut app, &keyword),
    },
    Commands::Theme { value } => commands::preferences::theme(&mut app, value),
    Commands::Privacy { value } => commands::preferences::privacy(&mut app, value),
    Commands::Health => commands::health::handle(&app).await,
    Commands::Shell => commands::shell::handle(&mut app).await,
  }
}
