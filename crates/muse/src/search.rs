//! Competitor discovery from a search engine's HTML results page.
//!
//! Extraction is best effort: a failed fetch yields no competitors rather than an
//! error, and only anchors carrying the organic-result class are considered.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::time::Duration;

use crate::error::SearchError;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64)";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Organic result links on the results page
const RESULT_LINK_SELECTOR: &str = "a.result__a";

static TOPICAL: Lazy<Regex> = Lazy::new(|| {
  Regex::new(r"(?i)(edtech|startup|platform|learning|education)").expect("keyword pattern")
});

/// Fetches a results document for a fully built search URL
#[async_trait::async_trait]
pub trait SearchClient: Send + Sync {
  async fn fetch(&self, url: &str) -> Result<String, SearchError>;
}

pub struct HttpSearchClient {
  client: reqwest::Client,
}

impl HttpSearchClient {
  pub fn new() -> anyhow::Result<Self> {
    let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).user_agent(USER_AGENT).build()?;
    Ok(Self { client })
  }
}

#[async_trait::async_trait]
impl SearchClient for HttpSearchClient {
  async fn fetch(&self, url: &str) -> Result<String, SearchError> {
    let response =
      self.client.get(url).send().await.map_err(|e| SearchError::Network(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
      return Err(SearchError::Network(format!("HTTP {status}")));
    }

    response.text().await.map_err(|e| SearchError::Network(e.to_string()))
  }
}

/// Form-encode `query` onto the search endpoint; spaces become `+`
pub fn search_url(base_url: &str, query: &str) -> String {
  let encoded: String = url::form_urlencoded::byte_serialize(query.as_bytes()).collect();
  format!("{base_url}?q={encoded}")
}

fn text_content(elem: ElementRef<'_>) -> String {
  elem.text().collect::<Vec<_>>().join(" ")
}

fn compact_ws(text: &str) -> String {
  text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Visible titles of the first `limit` organic result links, in document order
pub fn result_titles(html: &str, limit: usize) -> Vec<String> {
  let Ok(selector) = Selector::parse(RESULT_LINK_SELECTOR) else {
    return Vec::new();
  };

  let document = Html::parse_document(html);
  document.select(&selector).take(limit).map(|elem| compact_ws(&text_content(elem))).collect()
}

pub fn is_topical(title: &str) -> bool {
  TOPICAL.is_match(title)
}

pub struct CompetitorExtractor<'a> {
  client: &'a dyn SearchClient,
  base_url: String,
}

impl<'a> CompetitorExtractor<'a> {
  pub fn new(client: &'a dyn SearchClient, base_url: impl Into<String>) -> Self {
    Self { client, base_url: base_url.into() }
  }

  pub async fn extract(&self, query: &str, max_results: usize) -> Vec<String> {
    let url = search_url(&self.base_url, query);
    tracing::debug!(%url, "searching for competitors");

    let html = match self.client.fetch(&url).await {
      Ok(html) => html,
      Err(e) => {
        tracing::warn!(error = %e, "competitor search failed");
        return Vec::new();
      }
    };

    let competitors: Vec<String> =
      result_titles(&html, max_results).into_iter().filter(|title| is_topical(title)).collect();

    tracing::debug!(found = competitors.len(), "competitor search finished");
    competitors
  }
}
