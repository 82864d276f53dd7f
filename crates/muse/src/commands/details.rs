use anyhow::{anyhow, Result};

use crate::commands::require_ideas;
use crate::config::Config;
use crate::details::{Aspect, DetailExpander, IdeaDetails};
use crate::display;
use crate::generation::{ModelId, TextGenerator};
use crate::report;
use crate::session::SessionManager;

pub struct DetailsRequest {
  /// 1-based idea number; every idea when `None`
  pub idea: Option<usize>,
  pub aspects: Vec<Aspect>,
  pub model: Option<String>,
}

pub async fn handle(
  config: &Config,
  generator: &dyn TextGenerator,
  manager: &SessionManager,
  request: DetailsRequest,
) -> Result<Vec<IdeaDetails>> {
  let mut session = require_ideas(manager)?;

  let model = session
    .detail_model(request.model.map(ModelId::new), &config.model_ids())
    .ok_or_else(|| anyhow!("No model available for idea details"))?;

  let selected: Vec<(usize, String)> = match request.idea {
    Some(n) if n == 0 || n > session.ideas.len() => {
      return Err(anyhow!("Idea {} does not exist; the session has {} ideas", n, session.ideas.len()));
    }
    Some(n) => vec![(n, session.ideas[n - 1].idea.clone())],
    None => session.ideas.iter().enumerate().map(|(i, r)| (i + 1, r.idea.clone())).collect(),
  };

  let aspects = if request.aspects.is_empty() { Aspect::ALL.to_vec() } else { request.aspects };

  report::announce("Idea Details");
  report::info(&format!("Expanding {} idea(s) with {model}", selected.len()));

  let expander = DetailExpander::new(generator, config.detail_sampling());
  let mut produced = Vec::with_capacity(selected.len());
  for (index, idea) in selected {
    let details = expander.expand_details(&idea, &aspects, &model).await;
    display::display_details(index, &details);
    session = session.with_details(details.clone());
    produced.push(details);
  }

  manager.save_session(&session)?;
  Ok(produced)
}
