use anyhow::{Context, Result};
use std::path::Path;

use crate::commands::require_session;
use crate::export::render_markdown;
use crate::report;
use crate::session::SessionManager;

pub fn handle(manager: &SessionManager, output: &Path) -> Result<String> {
  let session = require_session(manager)?;
  let markdown = render_markdown(&session);

  if let Some(parent) = output.parent() {
    if !parent.as_os_str().is_empty() {
      std::fs::create_dir_all(parent)?;
    }
  }
  std::fs::write(output, &markdown)
    .with_context(|| format!("Failed to write report to {}", output.display()))?;

  report::success(&format!("Report written to {}", output.display()));
  Ok(markdown)
}
