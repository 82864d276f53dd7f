use anyhow::Result;

use crate::commands::require_session;
use crate::display::format_timestamp;
use crate::report;
use crate::session::SessionManager;

pub fn handle(manager: &SessionManager) -> Result<()> {
  let session = require_session(manager)?;

  report::announce("Session Status");
  println!("Interest: {}", session.interest);
  println!("Region: {}", session.region);
  println!("Ideas: {}", session.ideas.len());
  println!("Detailed ideas: {}", session.details.len());

  match &session.model {
    Some(model) => println!("Last model: {model}"),
    None => println!("Last model: none"),
  }

  match &session.market {
    Some(market) => println!("Market: {} competitors, {} saturation", market.count, market.saturation),
    None => report::info("Market not analyzed yet. Use 'muse analyze'."),
  }

  report::info(&format!("Session created: {}", format_timestamp(session.created_at)));
  report::info(&format!("Last updated: {}", format_timestamp(session.updated_at)));
  Ok(())
}
