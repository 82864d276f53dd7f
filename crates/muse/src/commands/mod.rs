use anyhow::{anyhow, Result};

use crate::session::{Session, SessionManager};

pub mod analyze;
pub mod clear;
pub mod details;
pub mod export;
pub mod generate;
pub mod history;
pub mod save;
pub mod status;

/// The current session, or an error telling the user how to start one
pub fn require_session(manager: &SessionManager) -> Result<Session> {
  manager.load_session()?.ok_or_else(|| anyhow!("No active session. Use 'muse generate' to begin."))
}

/// Like `require_session`, but the session must also hold generated ideas
pub fn require_ideas(manager: &SessionManager) -> Result<Session> {
  let session = require_session(manager)?;
  if !session.has_ideas() {
    return Err(anyhow!("The current session has no ideas. Run 'muse generate' first."));
  }
  Ok(session)
}
