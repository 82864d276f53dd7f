//! Markdown report of a session's ideas and market analysis.

use crate::market::MarketSummary;
use crate::session::Session;

pub fn competitors_line(summary: &MarketSummary) -> String {
  if summary.competitors.is_empty() {
    "No competitors found".to_string()
  } else {
    summary.competitors.join(", ")
  }
}

pub fn render_markdown(session: &Session) -> String {
  let mut out = format!(
    "# Startup Ideas\n\n**Interest**: {}\n**Region**: {}\n\n",
    session.interest, session.region
  );

  for (i, record) in session.ideas.iter().enumerate() {
    out.push_str(&format!("## Idea {}\n{}\n", i + 1, record.idea));
  }

  if let Some(market) = &session.market {
    out.push_str(&format!(
      "\n## Market Analysis\n\
**Scope**: {}\n\
**Estimated Revenue Potential**: {}\n\
**Target Audience Size**: {}\n\
**Competitors**: {}\n\
**Saturation**: {}\n",
      market.scope,
      market.estimated_revenue,
      market.target_audience,
      competitors_line(market),
      market.saturation
    ));
  }

  out
}
