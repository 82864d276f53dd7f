use std::path::PathBuf;
use thiserror::Error;

/// Failures reported by a text-generation backend
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GenerationError {
  /// The backend refused the request because credits for this model ran out
  #[error("quota exhausted for {model}: {message}")]
  QuotaExceeded { model: String, message: String },

  /// Anything else: timeouts, 5xx, model loading, unparseable bodies
  #[error("generation failed for {model}: {message}")]
  Transient { model: String, message: String },
}

impl GenerationError {
  pub fn quota_exceeded(model: impl Into<String>, message: impl Into<String>) -> Self {
    Self::QuotaExceeded { model: model.into(), message: message.into() }
  }

  pub fn transient(model: impl Into<String>, message: impl Into<String>) -> Self {
    Self::Transient { model: model.into(), message: message.into() }
  }

  pub fn is_quota_exceeded(&self) -> bool {
    matches!(self, Self::QuotaExceeded { .. })
  }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SearchError {
  #[error("search request failed: {0}")]
  Network(String),
}

#[derive(Error, Debug)]
pub enum StoreError {
  #[error("persisted ideas at {path} are malformed: {message}")]
  MalformedPersistedState { path: PathBuf, message: String },

  #[error("failed to access idea store: {0}")]
  Io(#[from] std::io::Error),

  #[error("failed to encode ideas: {0}")]
  Encode(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum ConfigError {
  #[error("failed to read config {path}: {source}")]
  Read { path: PathBuf, source: std::io::Error },

  #[error("failed to parse config {path}: {source}")]
  Parse { path: PathBuf, source: serde_json::Error },

  #[error("invalid config: {0}")]
  Invalid(String),
}
