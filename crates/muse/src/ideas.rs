//! Idea generation with model fallback and content-hash deduplication.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use std::time::Duration;

use crate::error::GenerationError;
use crate::generation::{ModelId, SamplingParams, TextGenerator};
use crate::prompts;
use crate::report;

/// Ideas shorter than this (after cleaning) are treated as noise
pub const MIN_IDEA_CHARS: usize = 20;

/// Bullet and numbering characters stripped from the front of each line
const DECORATION: &[char] = &['•', '-', '.', '0', '1', '2', '3', '4', '5', '6', '7', '8', '9'];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdeaRecord {
  pub idea: String,
  pub interest: String,
  pub region: String,
  #[serde(deserialize_with = "deserialize_flexible_timestamp")]
  pub timestamp: DateTime<Utc>,
}

/// RFC 3339, or a naive `2025-06-01 12:34:56.123456` read as local time
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, String> {
  let raw = raw.trim();
  if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
    return Ok(ts.with_timezone(&Utc));
  }

  let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f")
    .map_err(|e| format!("invalid timestamp {raw:?}: {e}"))?;
  Ok(match Local.from_local_datetime(&naive).earliest() {
    Some(local) => local.with_timezone(&Utc),
    None => naive.and_utc(),
  })
}

fn deserialize_flexible_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
  D: Deserializer<'de>,
{
  let raw = String::deserialize(deserializer)?;
  parse_timestamp(&raw).map_err(serde::de::Error::custom)
}

impl IdeaRecord {
  pub fn new(idea: impl Into<String>, interest: impl Into<String>, region: impl Into<String>) -> Self {
    Self { idea: idea.into(), interest: interest.into(), region: region.into(), timestamp: Utc::now() }
  }
}

/// SHA-256 of the trimmed idea text, hex encoded
pub fn fingerprint(idea: &str) -> String {
  hex::encode(Sha256::digest(idea.trim().as_bytes()))
}

/// Strip leading bullet/numeral decoration and surrounding whitespace
pub fn clean_line(line: &str) -> &str {
  line.trim_start_matches(|c: char| c.is_whitespace() || DECORATION.contains(&c)).trim_end()
}

fn is_meaningful(idea: &str) -> bool {
  idea.chars().count() > MIN_IDEA_CHARS
}

/// Bounds and parameters for one generation run
#[derive(Debug, Clone)]
pub struct GenerationPlan {
  pub target_count: usize,
  pub models: Vec<ModelId>,
  pub max_attempts: usize,
  pub retries_per_model: usize,
  pub backoff: Duration,
  pub sampling: SamplingParams,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationState {
  Running,
  ModelExhausted,
  TargetReached,
  AttemptsExhausted,
}

#[derive(Debug, Clone)]
pub struct GenerationReport {
  pub ideas: Vec<IdeaRecord>,
  pub outcome: GenerationState,
  /// Completed outer iterations
  pub attempts: usize,
  /// Number of quota-exhaustion fallbacks taken
  pub exhausted_models: usize,
  /// Model that produced the most recent successful response
  pub last_model: Option<ModelId>,
  pub target_count: usize,
}

impl GenerationReport {
  pub fn shortfall(&self) -> usize {
    self.target_count.saturating_sub(self.ideas.len())
  }

  pub fn is_complete(&self) -> bool {
    self.outcome == GenerationState::TargetReached
  }

  /// How far a partial run fell short; `None` once the target is met
  pub fn shortfall_notice(&self) -> Option<String> {
    if self.is_complete() {
      return None;
    }
    Some(format!(
      "Generated only {} unique ideas after {} attempts.",
      self.ideas.len(),
      self.attempts
    ))
  }
}

/// Loop state private to one `generate` call
struct Run {
  ideas: Vec<IdeaRecord>,
  fingerprints: HashSet<String>,
  attempts: usize,
  model_index: usize,
  exhausted_models: usize,
  last_model: Option<ModelId>,
}

impl Run {
  fn new() -> Self {
    Self {
      ideas: Vec::new(),
      fingerprints: HashSet::new(),
      attempts: 0,
      model_index: 0,
      exhausted_models: 0,
      last_model: None,
    }
  }

  fn state(&self, plan: &GenerationPlan) -> GenerationState {
    if self.ideas.len() >= plan.target_count {
      GenerationState::TargetReached
    } else if self.model_index >= plan.models.len() {
      GenerationState::ModelExhausted
    } else if self.attempts >= plan.max_attempts {
      GenerationState::AttemptsExhausted
    } else {
      GenerationState::Running
    }
  }

  /// Accept new, meaningful lines from one response until the target is met
  fn absorb(&mut self, raw: &str, interest: &str, region: &str, target_count: usize) -> usize {
    let mut accepted = 0;
    for line in raw.trim().lines() {
      if self.ideas.len() >= target_count {
        break;
      }
      let idea = clean_line(line);
      if !is_meaningful(idea) {
        continue;
      }
      if self.fingerprints.insert(fingerprint(idea)) {
        self.ideas.push(IdeaRecord::new(idea, interest, region));
        accepted += 1;
      }
    }
    accepted
  }
}

/// Drives generation across the configured model fallback list
pub struct IdeaGenerator<'a> {
  generator: &'a dyn TextGenerator,
}

impl<'a> IdeaGenerator<'a> {
  pub fn new(generator: &'a dyn TextGenerator) -> Self {
    Self { generator }
  }

  pub async fn generate(&self, interest: &str, region: &str, plan: &GenerationPlan) -> GenerationReport {
    let prompt = prompts::idea_prompt(interest, region);
    let mut run = Run::new();

    let mut state = run.state(plan);
    while state == GenerationState::Running {
      self.attempt(&mut run, &prompt, interest, region, plan).await;

      // The run ends without counting the iteration that exhausted the last model
      if run.model_index < plan.models.len() {
        run.attempts += 1;
      }
      state = run.state(plan);
    }

    tracing::info!(
      accepted = run.ideas.len(),
      attempts = run.attempts,
      exhausted_models = run.exhausted_models,
      outcome = ?state,
      "generation run finished"
    );

    let result = GenerationReport {
      ideas: run.ideas,
      outcome: state,
      attempts: run.attempts,
      exhausted_models: run.exhausted_models,
      last_model: run.last_model,
      target_count: plan.target_count,
    };

    if state == GenerationState::ModelExhausted {
      report::error("All models exhausted due to API credit limits. Upgrade the account or try again later.");
    }
    if let Some(notice) = result.shortfall_notice() {
      report::warn(&notice);
    }

    result
  }

  /// One outer iteration: up to `retries_per_model` calls against the current model
  async fn attempt(&self, run: &mut Run, prompt: &str, interest: &str, region: &str, plan: &GenerationPlan) {
    let model = plan.models[run.model_index].clone();

    for _ in 0..plan.retries_per_model {
      match self.generator.generate_text(prompt, &model, &plan.sampling).await {
        Ok(raw) => {
          let accepted = run.absorb(&raw, interest, region, plan.target_count);
          tracing::debug!(model = %model, accepted, "generation response absorbed");
          run.last_model = Some(model);
          return;
        }
        Err(err @ GenerationError::QuotaExceeded { .. }) => {
          run.model_index += 1;
          run.exhausted_models += 1;
          if let Some(next) = plan.models.get(run.model_index) {
            report::warn(&format!("API error for {model}: {err}. Switching to {next}..."));
          }
          return;
        }
        Err(err) => {
          report::warn(&format!("API error for {model}: {err}. Retrying..."));
          tokio::time::sleep(plan.backoff).await;
        }
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_clean_line_strips_leading_decoration() {
    assert_eq!(clean_line("1. A marketplace for campus tutors"), "A marketplace for campus tutors");
    assert_eq!(clean_line("  • - 12) idea"), ") idea");
    assert_eq!(clean_line("- Bullet point idea   "), "Bullet point idea");
    assert_eq!(clean_line("Ends with a year 2025."), "Ends with a year 2025.");
    assert_eq!(clean_line("...."), "");
  }

  #[test]
  fn test_parse_timestamp_accepts_rfc3339_and_naive_local() {
    let utc = parse_timestamp("2025-06-01T12:34:56Z").unwrap();
    assert_eq!(utc.to_rfc3339(), "2025-06-01T12:34:56+00:00");

    let naive = NaiveDateTime::parse_from_str("2025-06-01 12:34:56", "%Y-%m-%d %H:%M:%S").unwrap();
    let expected = Local.from_local_datetime(&naive).earliest().unwrap().with_timezone(&Utc);
    assert_eq!(parse_timestamp("2025-06-01 12:34:56").unwrap(), expected);
    assert_eq!(
      parse_timestamp("2025-06-01 12:34:56.123456").unwrap().timestamp(),
      expected.timestamp()
    );

    assert!(parse_timestamp("yesterday").is_err());
  }

  #[test]
  fn test_record_round_trips_through_json() {
    let record = IdeaRecord::new("An idea that is long enough", "edtech", "india");
    let json = serde_json::to_string(&record).unwrap();
    assert_eq!(serde_json::from_str::<IdeaRecord>(&json).unwrap(), record);
  }

  #[test]
  fn test_fingerprint_ignores_surrounding_whitespace() {
    assert_eq!(fingerprint("same idea"), fingerprint("  same idea \n"));
    assert_ne!(fingerprint("same idea"), fingerprint("Same idea"));
    assert_eq!(fingerprint("x").len(), 64);
  }

  #[test]
  fn test_absorb_filters_short_and_duplicate_lines() {
    let mut run = Run::new();
    let raw = "1. Short one\n2. A long enough idea about study groups\n3. A long enough idea about study groups\n\n4. Another long enough idea about mentors";
    let accepted = run.absorb(raw, "edtech", "india", 10);

    assert_eq!(accepted, 2);
    assert_eq!(run.ideas[0].idea, "A long enough idea about study groups");
    assert_eq!(run.ideas[1].idea, "Another long enough idea about mentors");
    assert_eq!(run.ideas[0].interest, "edtech");
    assert_eq!(run.ideas[0].region, "india");
  }

  #[test]
  fn test_absorb_respects_target() {
    let mut run = Run::new();
    let raw = "First idea that is long enough\nSecond idea that is long enough\nThird idea that is long enough";
    assert_eq!(run.absorb(raw, "i", "r", 2), 2);
    assert_eq!(run.ideas.len(), 2);
  }

  #[test]
  fn test_exactly_twenty_chars_rejected() {
    assert!(!is_meaningful("12345678901234567890"));
    assert!(is_meaningful("123456789012345678901"));
  }

  #[test]
  fn test_state_precedence() {
    let plan = GenerationPlan {
      target_count: 0,
      models: vec![],
      max_attempts: 0,
      retries_per_model: 1,
      backoff: Duration::ZERO,
      sampling: SamplingParams::default(),
    };
    let run = Run::new();
    assert_eq!(run.state(&plan), GenerationState::TargetReached);

    let plan = GenerationPlan { target_count: 1, ..plan };
    assert_eq!(run.state(&plan), GenerationState::ModelExhausted);

    let plan = GenerationPlan { models: vec![ModelId::new("m")], ..plan };
    assert_eq!(run.state(&plan), GenerationState::AttemptsExhausted);

    let plan = GenerationPlan { max_attempts: 1, ..plan };
    assert_eq!(run.state(&plan), GenerationState::Running);
  }

  #[test]
  fn test_report_shortfall() {
    let report = GenerationReport {
      ideas: vec![IdeaRecord::new("An idea that is long enough", "i", "r")],
      outcome: GenerationState::AttemptsExhausted,
      attempts: 50,
      exhausted_models: 0,
      last_model: None,
      target_count: 3,
    };
    assert_eq!(report.shortfall(), 2);
    assert!(!report.is_complete());
    assert_eq!(
      report.shortfall_notice().as_deref(),
      Some("Generated only 1 unique ideas after 50 attempts.")
    );
  }

  #[test]
  fn test_shortfall_notice_covers_model_exhaustion() {
    let mut report = GenerationReport {
      ideas: vec![IdeaRecord::new("An idea that is long enough", "i", "r")],
      outcome: GenerationState::ModelExhausted,
      attempts: 2,
      exhausted_models: 2,
      last_model: None,
      target_count: 4,
    };
    assert_eq!(
      report.shortfall_notice().as_deref(),
      Some("Generated only 1 unique ideas after 2 attempts.")
    );

    report.outcome = GenerationState::TargetReached;
    assert_eq!(report.shortfall_notice(), None);
  }
}
