//! Configuration for muse
//!
//! Holds the model fallback list, generation loop bounds, sampling parameters and
//! the endpoints and paths the collaborators use. Every field has a default so a
//! partial config file only needs the values it changes.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::ConfigError;
use crate::generation::{ModelId, SamplingParams};
use crate::ideas::GenerationPlan;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
  /// Ordered fallback list, first entry is the primary model
  #[serde(default = "default_models")]
  pub models: Vec<String>,
  #[serde(default = "default_target_count")]
  pub target_count: usize,
  #[serde(default = "default_max_attempts")]
  pub max_attempts: usize,
  #[serde(default = "default_retries_per_model")]
  pub retries_per_model: usize,
  /// Delay between retries against the same model
  #[serde(default = "default_backoff_ms")]
  pub backoff_ms: u64,
  #[serde(default)]
  pub sampling: SamplingParams,
  #[serde(default = "default_detail_max_new_tokens")]
  pub detail_max_new_tokens: u32,
  #[serde(default = "default_inference_base_url")]
  pub inference_base_url: String,
  #[serde(default = "default_search_base_url")]
  pub search_base_url: String,
  #[serde(default = "default_max_competitors")]
  pub max_competitors: usize,
  #[serde(default = "default_store_path")]
  pub store_path: PathBuf,
  #[serde(default = "default_export_path")]
  pub export_path: PathBuf,
}

fn default_models() -> Vec<String> {
  vec![
    "mistralai/Mistral-7B-Instruct-v0.3".to_string(),
    "meta-llama/Llama-3.2-3B-Instruct".to_string(),
    "mistralai/Mixtral-8x7B-Instruct-v0.1".to_string(),
    "google/gemma-2-9b-it".to_string(),
    "EleutherAI/gpt-neo-2.7B".to_string(),
    "bigscience/bloom-7b1".to_string(),
  ]
}
fn default_target_count() -> usize {
  10
}
fn default_max_attempts() -> usize {
  50
}
fn default_retries_per_model() -> usize {
  3
}
fn default_backoff_ms() -> u64 {
  2000
}
fn default_detail_max_new_tokens() -> u32 {
  150
}
fn default_inference_base_url() -> String {
  "https://api-inference.huggingface.co".to_string()
}
fn default_search_base_url() -> String {
  "https://html.duckduckgo.com/html/".to_string()
}
fn default_max_competitors() -> usize {
  5
}
fn default_store_path() -> PathBuf {
  PathBuf::from("data").join("ideas.json")
}
fn default_export_path() -> PathBuf {
  PathBuf::from("ideas_report.md")
}

impl Default for Config {
  fn default() -> Self {
    Self {
      models: default_models(),
      target_count: default_target_count(),
      max_attempts: default_max_attempts(),
      retries_per_model: default_retries_per_model(),
      backoff_ms: default_backoff_ms(),
      sampling: SamplingParams::default(),
      detail_max_new_tokens: default_detail_max_new_tokens(),
      inference_base_url: default_inference_base_url(),
      search_base_url: default_search_base_url(),
      max_competitors: default_max_competitors(),
      store_path: default_store_path(),
      export_path: default_export_path(),
    }
  }
}

impl Config {
  pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
      .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
    let config: Config = serde_json::from_str(&content)
      .map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })?;
    config.validate()?;
    Ok(config)
  }

  /// Explicit path first, then the working directory, then the user config dir
  pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
    if let Some(path) = explicit {
      return Self::load_from_file(path);
    }

    let mut candidates: Vec<PathBuf> =
      [".muse.json", "muse.json", ".muse/config.json"].iter().map(PathBuf::from).collect();
    if let Some(config_dir) = dirs::config_dir() {
      candidates.push(config_dir.join("muse").join("config.json"));
    }

    for path in candidates {
      if path.exists() {
        tracing::debug!(path = %path.display(), "loading config");
        return Self::load_from_file(path);
      }
    }

    Ok(Config::default())
  }

  pub fn validate(&self) -> Result<(), ConfigError> {
    if self.models.is_empty() {
      return Err(ConfigError::Invalid("at least one model must be configured".to_string()));
    }
    if self.models.iter().any(|m| m.trim().is_empty()) {
      return Err(ConfigError::Invalid("model identifiers cannot be blank".to_string()));
    }
    if self.retries_per_model == 0 {
      return Err(ConfigError::Invalid("retries_per_model must be at least 1".to_string()));
    }
    Ok(())
  }

  pub fn model_ids(&self) -> Vec<ModelId> {
    self.models.iter().map(|m| ModelId::new(m.as_str())).collect()
  }

  pub fn backoff(&self) -> Duration {
    Duration::from_millis(self.backoff_ms)
  }

  /// Loop bounds for one generation run; `target_count` overrides the configured one
  pub fn generation_plan(&self, target_count: Option<usize>) -> GenerationPlan {
    GenerationPlan {
      target_count: target_count.unwrap_or(self.target_count),
      models: self.model_ids(),
      max_attempts: self.max_attempts,
      retries_per_model: self.retries_per_model,
      backoff: self.backoff(),
      sampling: self.sampling.clone(),
    }
  }

  pub fn detail_sampling(&self) -> SamplingParams {
    SamplingParams { max_new_tokens: self.detail_max_new_tokens, ..self.sampling.clone() }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use tempfile::TempDir;

  #[test]
  fn test_defaults_match_generation_loop() {
    let config = Config::default();
    assert_eq!(config.models.len(), 6);
    assert_eq!(config.target_count, 10);
    assert_eq!(config.max_attempts, 50);
    assert_eq!(config.retries_per_model, 3);
    assert_eq!(config.backoff(), Duration::from_secs(2));
    assert_eq!(config.max_competitors, 5);
  }

  #[test]
  fn test_partial_file_keeps_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("muse.json");
    std::fs::write(&path, r#"{"models": ["a/b"], "backoff_ms": 0}"#).unwrap();

    let config = Config::load(Some(&path)).unwrap();
    assert_eq!(config.models, vec!["a/b".to_string()]);
    assert_eq!(config.backoff_ms, 0);
    assert_eq!(config.max_attempts, 50);
    assert_eq!(config.sampling.top_k, 50);
  }

  #[test]
  fn test_empty_model_list_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("muse.json");
    std::fs::write(&path, r#"{"models": []}"#).unwrap();

    assert!(matches!(Config::load(Some(&path)), Err(ConfigError::Invalid(_))));
  }

  #[test]
  fn test_unparseable_file_reports_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("muse.json");
    std::fs::write(&path, "{not json").unwrap();

    let err = Config::load(Some(&path)).unwrap_err();
    assert!(err.to_string().contains("muse.json"));
  }

  #[test]
  fn test_generation_plan_override() {
    let config = Config::default();
    let plan = config.generation_plan(Some(3));
    assert_eq!(plan.target_count, 3);
    assert_eq!(plan.models.len(), 6);
    assert_eq!(plan.models[0].as_str(), "mistralai/Mistral-7B-Instruct-v0.3");
  }

  #[test]
  fn test_detail_sampling_uses_shorter_budget() {
    let config = Config::default();
    assert_eq!(config.detail_sampling().max_new_tokens, 150);
  }

  #[test]
  fn test_detail_sampling_keeps_configured_sampling() {
    let mut config = Config::default();
    config.sampling.temperature = 0.3;
    config.sampling.top_p = 0.8;
    config.sampling.top_k = 5;

    let sampling = config.detail_sampling();
    assert_eq!(sampling.max_new_tokens, 150);
    assert_eq!(sampling.temperature, 0.3);
    assert_eq!(sampling.top_p, 0.8);
    assert_eq!(sampling.top_k, 5);
  }
}
