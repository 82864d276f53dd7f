use anyhow::Result;

use crate::commands::require_ideas;
use crate::report;
use crate::session::SessionManager;
use crate::store::IdeaStore;

pub fn handle(store: &IdeaStore, manager: &SessionManager) -> Result<usize> {
  let session = require_ideas(manager)?;
  let total = store.append(&session.ideas)?;
  report::success(&format!(
    "Ideas saved! {} added, {} stored in {}",
    session.ideas.len(),
    total,
    store.path().display()
  ));
  Ok(total)
}
