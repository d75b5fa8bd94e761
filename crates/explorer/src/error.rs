use thiserror::Error;

/// Message shown when a query is issued with an empty keyword
pub const EMPTY_KEYWORD_MESSAGE: &str = "Please enter a keyword";

/// Message shown for every transport failure, whatever its cause
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch results. See console for details.";

#[derive(Error, Debug)]
pub enum SearchError {
  #[error("{}", EMPTY_KEYWORD_MESSAGE)]
  Validation,

  #[error("Search request failed: {message}")]
  Transport { message: String },
}

impl SearchError {
  pub fn transport(message: impl Into<String>) -> Self {
    Self::Transport { message: message.into() }
  }

  /// The message surfaced to the user. Transport failures are not classified further.
  pub fn user_message(&self) -> &'static str {
    match self {
      SearchError::Validation => EMPTY_KEYWORD_MESSAGE,
      SearchError::Transport { .. } => FETCH_FAILED_MESSAGE,
    }
  }
}

impl From<reqwest::Error> for SearchError {
  fn from(err: reqwest::Error) -> Self {
    Self::transport(err.to_string())
  }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
  #[error("{section} payload is missing field '{field}'")]
  MissingField { section: &'static str, field: &'static str },

  #[error("{section} payload has an invalid '{field}' field")]
  InvalidField { section: &'static str, field: &'static str },
}

impl RenderError {
  pub fn missing(section: &'static str, field: &'static str) -> Self {
    Self::MissingField { section, field }
  }

  pub fn invalid(section: &'static str, field: &'static str) -> Self {
    Self::InvalidField { section, field }
  }
}

#[derive(Error, Debug)]
pub enum StoreError {
  #[error("Failed to access state for '{key}': {source}")]
  Io {
    key: String,
    #[source]
    source: std::io::Error,
  },

  #[error("Failed to encode '{key}': {source}")]
  Encode {
    key: String,
    #[source]
    source: serde_json::Error,
  },
}

impl StoreError {
  pub fn io(key: impl Into<String>, source: std::io::Error) -> Self {
    Self::Io { key: key.into(), source }
  }

  pub fn encode(key: impl Into<String>, source: serde_json::Error) -> Self {
    Self::Encode { key: key.into(), source }
  }
}
