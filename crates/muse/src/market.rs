//! Market summaries: competitor lookup plus canned scope, revenue and audience text.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::search::CompetitorExtractor;

/// Competitors used when the recognized domain/locale search comes back empty
pub const FALLBACK_COMPETITORS: [&str; 6] =
  ["UpGrad", "Scaler Academy", "Collegedunia", "Leverage Edu", "Vedantu", "Physics Wallah"];

const KNOWN_DOMAIN: &str = "edtech";
const KNOWN_LOCALE: &str = "india";
const KNOWN_AUDIENCE: &str = "college students";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Saturation {
  Low,
  Moderate,
  High,
}

impl Saturation {
  pub fn from_count(count: usize) -> Self {
    if count > 50 {
      Saturation::High
    } else if count > 10 {
      Saturation::Moderate
    } else {
      Saturation::Low
    }
  }
}

impl fmt::Display for Saturation {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let label = match self {
      Saturation::Low => "Low",
      Saturation::Moderate => "Moderate",
      Saturation::High => "High",
    };
    f.write_str(label)
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSummary {
  pub scope: String,
  pub estimated_revenue: String,
  pub target_audience: String,
  pub competitors: Vec<String>,
  pub count: usize,
  pub saturation: Saturation,
}

impl MarketSummary {
  /// Saturated vs. unsaturated share on a 100-point scale
  pub fn saturation_split(&self) -> (usize, usize) {
    (self.count, 100usize.saturating_sub(self.count))
  }
}

pub fn competitor_query(interest: &str, region: &str) -> String {
  format!("top {interest} startups in {region} OR {interest} companies in {region}")
}

fn is_known_market(interest: &str, region: &str) -> bool {
  interest.to_lowercase() == KNOWN_DOMAIN && region.to_lowercase().contains(KNOWN_LOCALE)
}

fn scope_text(interest: &str, region: &str, known: bool) -> String {
  if known {
    "The EdTech sector in India, targeting college students, is growing quickly on the back of \
demand for personalized, accessible learning. With 43.3 million students in higher education \
(2021-22), the market is driven by digital adoption, AI integration and hybrid learning models. \
The Indian EdTech market was valued at $163.49 billion in 2024 and is expected to grow at a CAGR \
of ~20%, reaching $30 billion by 2031, with further headroom in higher education."
      .to_string()
  } else {
    format!(
      "The {interest} sector in {region} is evolving with increasing adoption of technology-driven \
solutions. Market growth is driven by digital transformation and demand for scalable, accessible services."
    )
  }
}

fn revenue_text(interest: &str, region: &str, known: bool) -> String {
  if known {
    "Potential revenue for a new EdTech startup targeting college students could range from \
$1-10 million annually within 3-5 years, depending on scale and monetization (e.g., subscriptions, freemium)."
      .to_string()
  } else {
    format!(
      "Potential revenue for a new {interest} startup in {region} varies based on market size and \
business model, typically ranging from $500K to $5M annually within 3-5 years."
    )
  }
}

fn audience_text(interest: &str, region: &str, known: bool) -> String {
  if known && region.to_lowercase().contains(KNOWN_AUDIENCE) {
    "India has ~43.3 million college students (2021-22), with 20.7 million female and 22.6 million \
male students. Approximately 60% own smartphones, and 622 million active internet users in 2020 \
(projected 900 million by 2025) indicate a large, digitally savvy audience."
      .to_string()
  } else {
    format!(
      "The target audience in {region} for {interest} depends on specific demographics and market \
penetration. Smartphone and internet adoption are key drivers for digital solutions."
    )
  }
}

pub struct MarketAnalyzer<'a> {
  extractor: CompetitorExtractor<'a>,
  max_competitors: usize,
}

impl<'a> MarketAnalyzer<'a> {
  pub fn new(extractor: CompetitorExtractor<'a>, max_competitors: usize) -> Self {
    Self { extractor, max_competitors }
  }

  pub async fn summarize(&self, interest: &str, region: &str) -> MarketSummary {
    let query = competitor_query(interest, region);
    let mut competitors = self.extractor.extract(&query, self.max_competitors).await;
    let known = is_known_market(interest, region);

    if competitors.is_empty() && known {
      tracing::info!("no competitors scraped for a known market, using fallback list");
      competitors = FALLBACK_COMPETITORS.iter().map(|c| c.to_string()).collect();
    }

    let count = competitors.len();
    MarketSummary {
      scope: scope_text(interest, region, known),
      estimated_revenue: revenue_text(interest, region, known),
      target_audience: audience_text(interest, region, known),
      competitors,
      count,
      saturation: Saturation::from_count(count),
    }
  }
}
