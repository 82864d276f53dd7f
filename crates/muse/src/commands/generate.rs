use anyhow::{anyhow, Result};

use crate::config::Config;
use crate::display;
use crate::generation::TextGenerator;
use crate::ideas::{GenerationReport, IdeaGenerator};
use crate::report;
use crate::session::{Session, SessionManager};

pub async fn handle(
  config: &Config,
  generator: &dyn TextGenerator,
  manager: &SessionManager,
  interest: &str,
  region: &str,
  count: Option<usize>,
) -> Result<GenerationReport> {
  let interest = interest.trim();
  let region = region.trim();
  if interest.is_empty() || region.is_empty() {
    return Err(anyhow!("Please enter both interest and region."));
  }

  report::announce("Idea Generator");
  let plan = config.generation_plan(count);
  report::info(&format!(
    "Generating {} ideas for {interest} ({region}) using {} model(s)...",
    plan.target_count,
    plan.models.len()
  ));

  let result = IdeaGenerator::new(generator).generate(interest, region, &plan).await;

  // A rerun for the same market keeps its analysis
  let session = match manager.load_session()? {
    Some(existing) if existing.interest == interest && existing.region == region => existing,
    _ => Session::new(interest, region),
  };
  let session = session.with_generation(&result);
  manager.save_session(&session)?;

  if result.is_complete() {
    report::success(&format!("Generated {} unique ideas", result.ideas.len()));
  }
  display::display_ideas(&result.ideas);

  Ok(result)
}
