use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::details::IdeaDetails;
use crate::generation::ModelId;
use crate::ideas::{GenerationReport, IdeaRecord};
use crate::market::MarketSummary;

/// Everything one brainstorming round has produced so far.
///
/// Operations take a session by value and hand back the updated one, so the
/// commands decide when it is persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
  pub interest: String,
  pub region: String,
  pub ideas: Vec<IdeaRecord>,
  #[serde(default)]
  pub market: Option<MarketSummary>,
  /// Last model that answered a generation request successfully
  #[serde(default)]
  pub model: Option<ModelId>,
  #[serde(default)]
  pub details: Vec<IdeaDetails>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl Session {
  pub fn new(interest: impl Into<String>, region: impl Into<String>) -> Self {
    let now = Utc::now();
    Self {
      interest: interest.into(),
      region: region.into(),
      ideas: Vec::new(),
      market: None,
      model: None,
      details: Vec::new(),
      created_at: now,
      updated_at: now,
    }
  }

  /// Replace the ideas with a fresh run; details of the previous ideas no longer apply
  pub fn with_generation(mut self, report: &GenerationReport) -> Self {
    self.ideas = report.ideas.clone();
    self.details.clear();
    if report.last_model.is_some() {
      self.model = report.last_model.clone();
    }
    self.updated_at = Utc::now();
    self
  }

  pub fn with_market(mut self, summary: MarketSummary) -> Self {
    self.market = Some(summary);
    self.updated_at = Utc::now();
    self
  }

  /// Store details for an idea, replacing earlier details for the same idea
  pub fn with_details(mut self, details: IdeaDetails) -> Self {
    match self.details.iter_mut().find(|d| d.idea == details.idea) {
      Some(existing) => *existing = details,
      None => self.details.push(details),
    }
    self.updated_at = Utc::now();
    self
  }

  /// Model for follow-up calls: explicit override, else the session's last good model,
  /// else the first configured one
  pub fn detail_model(&self, explicit: Option<ModelId>, configured: &[ModelId]) -> Option<ModelId> {
    explicit.or_else(|| self.model.clone()).or_else(|| configured.first().cloned())
  }

  pub fn has_ideas(&self) -> bool {
    !self.ideas.is_empty()
  }
}

/// Persists the current session between command invocations
pub struct SessionManager {
  session_dir: PathBuf,
}

impl SessionManager {
  /// Uses `MUSE_DIR` when set, otherwise `.muse` in the working directory
  pub fn new() -> Result<Self> {
    let session_dir = match std::env::var_os("MUSE_DIR") {
      Some(dir) => PathBuf::from(dir),
      None => std::env::current_dir()?.join(".muse"),
    };
    Ok(Self::at(session_dir))
  }

  pub fn at(session_dir: impl Into<PathBuf>) -> Self {
    Self { session_dir: session_dir.into() }
  }

  fn session_file(&self) -> PathBuf {
    self.session_dir.join("session.json")
  }

  pub fn session_exists(&self) -> bool {
    self.session_file().exists()
  }

  pub fn save_session(&self, session: &Session) -> Result<()> {
    std::fs::create_dir_all(&self.session_dir)?;
    let json = serde_json::to_string_pretty(session)?;
    std::fs::write(self.session_file(), json)?;
    Ok(())
  }

  pub fn load_session(&self) -> Result<Option<Session>> {
    let session_file = self.session_file();
    if !session_file.exists() {
      return Ok(None);
    }

    let json = std::fs::read_to_string(session_file)?;
    let session: Session = serde_json::from_str(&json)?;
    Ok(Some(session))
  }

  pub fn clear_session(&self) -> Result<()> {
    let session_file = self.session_file();
    if session_file.exists() {
      std::fs::remove_file(session_file)?;
    }
    Ok(())
  }
}
