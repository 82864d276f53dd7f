use anyhow::Result;

use crate::report;
use crate::session::SessionManager;

pub fn handle(manager: &SessionManager) -> Result<()> {
  if !manager.session_exists() {
    report::info("No active session to clear");
    return Ok(());
  }
  manager.clear_session()?;
  report::success("Session cleared");
  Ok(())
}
