use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::GenerationError;
use crate::generation::{ModelId, SamplingParams, TextGenerator};
use crate::prompts;

/// Business-model-canvas section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Aspect {
  Problem,
  Solution,
  Revenue,
  Marketing,
}

impl Aspect {
  pub const ALL: [Aspect; 4] = [Aspect::Problem, Aspect::Solution, Aspect::Revenue, Aspect::Marketing];

  pub fn as_str(&self) -> &'static str {
    match self {
      Aspect::Problem => "problem",
      Aspect::Solution => "solution",
      Aspect::Revenue => "revenue",
      Aspect::Marketing => "marketing",
    }
  }

  pub fn title(&self) -> &'static str {
    match self {
      Aspect::Problem => "Problem",
      Aspect::Solution => "Solution",
      Aspect::Revenue => "Revenue",
      Aspect::Marketing => "Marketing",
    }
  }
}

impl fmt::Display for Aspect {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Outcome of one aspect call, kept serializable for the session file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
  pub aspect: Aspect,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub text: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub error: Option<String>,
}

impl Section {
  fn from_result(aspect: Aspect, result: Result<String, GenerationError>) -> Self {
    match result {
      Ok(text) => Self { aspect, text: Some(text), error: None },
      Err(e) => Self { aspect, text: None, error: Some(e.to_string()) },
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdeaDetails {
  pub idea: String,
  pub model: ModelId,
  pub sections: Vec<Section>,
}

pub struct DetailExpander<'a> {
  generator: &'a dyn TextGenerator,
  sampling: SamplingParams,
}

impl<'a> DetailExpander<'a> {
  pub fn new(generator: &'a dyn TextGenerator, sampling: SamplingParams) -> Self {
    Self { generator, sampling }
  }

  /// One call per aspect, in order; a failed aspect leaves the others untouched
  pub async fn expand(
    &self,
    idea: &str,
    aspects: &[Aspect],
    model: &ModelId,
  ) -> Vec<(Aspect, Result<String, GenerationError>)> {
    let mut results = Vec::with_capacity(aspects.len());
    for &aspect in aspects {
      let prompt = prompts::canvas_prompt(idea, aspect);
      let result = self.generator.generate_text(&prompt, model, &self.sampling).await;
      if let Err(e) = &result {
        tracing::warn!(%aspect, error = %e, "detail generation failed");
      }
      results.push((aspect, result));
    }
    results
  }

  /// `expand` shaped for storage in a session
  pub async fn expand_details(&self, idea: &str, aspects: &[Aspect], model: &ModelId) -> IdeaDetails {
    let sections = self
      .expand(idea, aspects, model)
      .await
      .into_iter()
      .map(|(aspect, result)| Section::from_result(aspect, result))
      .collect();

    IdeaDetails { idea: idea.to_string(), model: model.clone(), sections }
  }
}
