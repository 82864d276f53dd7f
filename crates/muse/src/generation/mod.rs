use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::GenerationError;

pub mod huggingface;

pub use huggingface::HuggingFaceGenerator;

/// Name of a generation backend, e.g. `mistralai/Mistral-7B-Instruct-v0.3`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModelId(String);

impl ModelId {
  pub fn new(id: impl Into<String>) -> Self {
    Self(id.into())
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl fmt::Display for ModelId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplingParams {
  #[serde(default = "default_max_new_tokens")]
  pub max_new_tokens: u32,
  #[serde(default = "default_temperature")]
  pub temperature: f32,
  #[serde(default = "default_top_p")]
  pub top_p: f32,
  #[serde(default = "default_top_k")]
  pub top_k: u32,
}

fn default_max_new_tokens() -> u32 {
  200
}
fn default_temperature() -> f32 {
  1.2
}
fn default_top_p() -> f32 {
  0.95
}
fn default_top_k() -> u32 {
  50
}

impl Default for SamplingParams {
  fn default() -> Self {
    Self {
      max_new_tokens: default_max_new_tokens(),
      temperature: default_temperature(),
      top_p: default_top_p(),
      top_k: default_top_k(),
    }
  }
}

/// A backend that turns a prompt into text
#[async_trait::async_trait]
pub trait TextGenerator: Send + Sync {
  async fn generate_text(
    &self,
    prompt: &str,
    model: &ModelId,
    params: &SamplingParams,
  ) -> Result<String, GenerationError>;
}
