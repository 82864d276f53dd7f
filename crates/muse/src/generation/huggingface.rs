use reqwest::StatusCode;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

use super::{ModelId, SamplingParams, TextGenerator};
use crate::error::GenerationError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Hugging Face serverless inference client
pub struct HuggingFaceGenerator {
  client: reqwest::Client,
  base_url: String,
  token: Option<String>,
}

#[derive(Serialize)]
struct InferenceRequest<'a> {
  inputs: &'a str,
  parameters: InferenceParameters,
}

#[derive(Serialize)]
struct InferenceParameters {
  max_new_tokens: u32,
  temperature: f32,
  top_p: f32,
  top_k: u32,
  return_full_text: bool,
}

impl HuggingFaceGenerator {
  pub fn new(base_url: impl Into<String>, token: Option<String>) -> anyhow::Result<Self> {
    let client = reqwest::Client::builder()
      .timeout(REQUEST_TIMEOUT)
      .user_agent(concat!("muse/", env!("CARGO_PKG_VERSION")))
      .build()?;

    Ok(Self { client, base_url: base_url.into().trim_end_matches('/').to_string(), token })
  }

  fn model_url(&self, model: &ModelId) -> String {
    format!("{}/models/{}", self.base_url, model)
  }
}

#[async_trait::async_trait]
impl TextGenerator for HuggingFaceGenerator {
  async fn generate_text(
    &self,
    prompt: &str,
    model: &ModelId,
    params: &SamplingParams,
  ) -> Result<String, GenerationError> {
    let body = InferenceRequest {
      inputs: prompt,
      parameters: InferenceParameters {
        max_new_tokens: params.max_new_tokens,
        temperature: params.temperature,
        top_p: params.top_p,
        top_k: params.top_k,
        return_full_text: false,
      },
    };

    let mut request = self.client.post(self.model_url(model)).json(&body);
    if let Some(token) = &self.token {
      request = request.bearer_auth(token);
    }

    tracing::debug!(model = %model, "requesting text generation");
    let response =
      request.send().await.map_err(|e| GenerationError::transient(model.as_str(), e.to_string()))?;

    let status = response.status();
    let text =
      response.text().await.map_err(|e| GenerationError::transient(model.as_str(), e.to_string()))?;

    if status == StatusCode::PAYMENT_REQUIRED {
      return Err(GenerationError::quota_exceeded(
        model.as_str(),
        format!("402 Payment Required: {}", text.trim()),
      ));
    }
    if !status.is_success() {
      return Err(GenerationError::transient(model.as_str(), format!("HTTP {status}: {}", text.trim())));
    }

    parse_generated_text(&text).ok_or_else(|| {
      GenerationError::transient(model.as_str(), format!("unexpected response body: {}", text.trim()))
    })
  }
}

/// Accepts `[{"generated_text": ..}]` and a bare `{"generated_text": ..}`
fn parse_generated_text(body: &str) -> Option<String> {
  let value: Value = serde_json::from_str(body).ok()?;
  let entry = match &value {
    Value::Array(items) => items.first()?,
    other => other,
  };
  entry.get("generated_text")?.as_str().map(str::to_string)
}
