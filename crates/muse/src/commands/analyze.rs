use anyhow::Result;

use crate::commands::require_ideas;
use crate::config::Config;
use crate::display;
use crate::market::{MarketAnalyzer, MarketSummary};
use crate::report;
use crate::search::{CompetitorExtractor, SearchClient};
use crate::session::SessionManager;

pub async fn handle(
  config: &Config,
  search: &dyn SearchClient,
  manager: &SessionManager,
) -> Result<MarketSummary> {
  let session = require_ideas(manager)?;

  report::announce("Market Analyzer");
  report::info(&format!("Analyzing market for {} ({})...", session.interest, session.region));

  let extractor = CompetitorExtractor::new(search, config.search_base_url.as_str());
  let analyzer = MarketAnalyzer::new(extractor, config.max_competitors);
  let summary = analyzer.summarize(&session.interest, &session.region).await;

  let session = session.with_market(summary.clone());
  manager.save_session(&session)?;

  display::display_market(&summary);
  Ok(summary)
}
