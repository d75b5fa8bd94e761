pub mod aggregate;
pub mod api;
pub mod app;
pub mod commands;
pub mod config;
pub mod display;
pub mod error;
pub mod format;
pub mod history;
pub mod logging;
pub mod platform;
pub mod saved;
pub mod session;
pub mod store;

// Re-export commonly used types for easier testing
pub use aggregate::ContextMatchAggregator;
pub use api::{HealthStatus, HttpSearchApi, SearchApi};
pub use app::{Explorer, Preferences};
pub use config::{ClientConfig, ExplorerConfig};
pub use error::{RenderError, SearchError, StoreError};
pub use history::RecentSearchHistory;
pub use platform::{ContextMatches, Platform, SearchResults};
pub use saved::SavedSearchStore;
pub use session::{SearchSession, SessionState};
pub use store::{FileStore, KeyValueStore, MemoryStore, PersistentStore, SavedSearch, Theme};
