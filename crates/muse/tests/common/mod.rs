#![allow(dead_code)]

use async_trait::async_trait;
use muse::error::{GenerationError, SearchError};
use muse::generation::{ModelId, SamplingParams, TextGenerator};
use muse::search::SearchClient;
use std::collections::VecDeque;
use std::sync::Mutex;

/// What a scripted backend should do on a call
#[derive(Clone)]
pub enum Reply {
  Text(String),
  Quota,
  Transient,
}

/// Text generator that replays scripted replies and records every call.
///
/// Once the script runs out the fallback reply repeats forever.
pub struct ScriptedGenerator {
  script: Mutex<VecDeque<Reply>>,
  fallback: Reply,
  pub calls: Mutex<Vec<(String, ModelId, SamplingParams)>>,
}

impl ScriptedGenerator {
  pub fn new(script: Vec<Reply>, fallback: Reply) -> Self {
    Self { script: Mutex::new(script.into()), fallback, calls: Mutex::new(Vec::new()) }
  }

  pub fn always(reply: Reply) -> Self {
    Self::new(Vec::new(), reply)
  }

  pub fn call_count(&self) -> usize {
    self.calls.lock().unwrap().len()
  }

  pub fn models_called(&self) -> Vec<String> {
    self.calls.lock().unwrap().iter().map(|(_, m, _)| m.as_str().to_string()).collect()
  }

  pub fn prompts(&self) -> Vec<String> {
    self.calls.lock().unwrap().iter().map(|(p, _, _)| p.clone()).collect()
  }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
  async fn generate_text(
    &self,
    prompt: &str,
    model: &ModelId,
    params: &SamplingParams,
  ) -> Result<String, GenerationError> {
    self.calls.lock().unwrap().push((prompt.to_string(), model.clone(), params.clone()));
    let reply = self.script.lock().unwrap().pop_front().unwrap_or_else(|| self.fallback.clone());
    match reply {
      Reply::Text(text) => Ok(text),
      Reply::Quota => Err(GenerationError::quota_exceeded(model.as_str(), "402 Payment Required")),
      Reply::Transient => Err(GenerationError::transient(model.as_str(), "503 Service Unavailable")),
    }
  }
}

/// Search client returning a canned page, or failing
pub struct StaticSearch {
  page: Option<String>,
  pub urls: Mutex<Vec<String>>,
}

impl StaticSearch {
  pub fn page(html: &str) -> Self {
    Self { page: Some(html.to_string()), urls: Mutex::new(Vec::new()) }
  }

  pub fn failing() -> Self {
    Self { page: None, urls: Mutex::new(Vec::new()) }
  }

  pub fn empty() -> Self {
    Self::page("<html><body>No results.</body></html>")
  }
}

#[async_trait]
impl SearchClient for StaticSearch {
  async fn fetch(&self, url: &str) -> Result<String, SearchError> {
    self.urls.lock().unwrap().push(url.to_string());
    self.page.clone().ok_or_else(|| SearchError::Network("connection refused".to_string()))
  }
}

/// Numbered list of `n` distinct ideas, each comfortably over the length floor
pub fn numbered_ideas(n: usize, tag: &str) -> String {
  (1..=n).map(|i| format!("{i}. {tag} idea number {i} for campus learners")).collect::<Vec<_>>().join("\n")
}

pub fn results_page(titles: &[&str]) -> String {
  let mut html = String::from("<html><body><div id=\"links\">");
  for (i, title) in titles.iter().enumerate() {
    html.push_str(&format!(
      "<div class=\"result results_links\"><h2 class=\"result__title\"><a rel=\"nofollow\" class=\"result__a\" href=\"/l/?uddg={i}\">{title}</a></h2><a class=\"result__snippet\" href=\"/l/?uddg={i}\">snippet about learning</a></div>"
    ));
  }
  html.push_str("</div></body></html>");
  html
}
