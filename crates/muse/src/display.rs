use chrono::{DateTime, Local, Utc};
use colored::*;

use crate::details::IdeaDetails;
use crate::export::competitors_line;
use crate::ideas::IdeaRecord;
use crate::market::MarketSummary;
use crate::report;

const WIDTH: usize = 80;
const HEADING_CHARS: usize = 50;

pub fn format_timestamp(utc_time: DateTime<Utc>) -> String {
  let local_time: DateTime<Local> = utc_time.into();
  local_time.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// First `HEADING_CHARS` characters of an idea followed by an ellipsis
pub fn idea_heading(idea: &str) -> String {
  let head: String = idea.chars().take(HEADING_CHARS).collect();
  format!("{head}...")
}

/// Greedy word wrap at `width` columns
pub fn wrap(text: &str, width: usize) -> Vec<String> {
  let mut lines = Vec::new();
  for paragraph in text.lines() {
    let mut current = String::new();
    for word in paragraph.split_whitespace() {
      if !current.is_empty() && current.chars().count() + word.chars().count() + 1 > width {
        lines.push(std::mem::take(&mut current));
      }
      if !current.is_empty() {
        current.push(' ');
      }
      current.push_str(word);
    }
    lines.push(current);
  }
  lines
}

fn print_wrapped(text: &str, indent: &str) {
  for line in wrap(text, WIDTH - indent.len()) {
    println!("{indent}{line}");
  }
}

pub fn display_ideas(ideas: &[IdeaRecord]) {
  println!("{}", "Generated Ideas:".bold());
  for (i, record) in ideas.iter().enumerate() {
    println!();
    println!("{}", format!("Idea {}:", i + 1).bold());
    print_wrapped(&record.idea, "  ");
  }
}

pub fn display_market(summary: &MarketSummary) {
  let fields = [
    ("Market Scope", summary.scope.clone()),
    ("Estimated Revenue Potential", summary.estimated_revenue.clone()),
    ("Target Audience Size", summary.target_audience.clone()),
    ("Competitor Count", summary.count.to_string()),
    ("Top Competitors", competitors_line(summary)),
  ];

  for (label, value) in fields {
    println!("{}", format!("{label}:").bold());
    print_wrapped(&value, "  ");
    println!();
  }

  let (saturated, unsaturated) = summary.saturation_split();
  println!("{} {}", "Saturation:".bold(), summary.saturation);
  println!("  saturated {saturated} / unsaturated {unsaturated}");

  if summary.competitors.is_empty() {
    report::warn("No competitors found; competitor breakdown not displayed.");
  }
}

pub fn display_details(index: usize, details: &IdeaDetails) {
  report::as_banner(
    |line| println!("{line}"),
    &format!("Idea {index}: {}", idea_heading(&details.idea)),
    WIDTH,
    '-',
  );

  for section in &details.sections {
    println!("{}", format!("Idea {index} - {}", section.aspect.title()).bold());
    match (&section.text, &section.error) {
      (Some(text), _) => print_wrapped(text, "  "),
      (None, Some(error)) => println!("  {}", error.red()),
      (None, None) => println!("  {}", "(no output)".dimmed()),
    }
    println!();
  }
}

pub fn display_history(ideas: &[IdeaRecord]) {
  if ideas.is_empty() {
    println!("No ideas saved yet.");
    return;
  }

  for record in ideas {
    println!(
      "{} - {} ({}): {}",
      format_timestamp(record.timestamp).bold(),
      record.interest,
      record.region,
      record.idea
    );
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_idea_heading_truncates_on_chars() {
    let long = "é".repeat(60);
    assert_eq!(idea_heading(&long).chars().count(), 53);
    assert_eq!(idea_heading("short"), "short...");
  }

  #[test]
  fn test_wrap_respects_width() {
    let lines = wrap("one two three four five", 9);
    assert_eq!(lines, vec!["one two", "three", "four five"]);
  }

  #[test]
  fn test_wrap_keeps_long_words_whole() {
    let lines = wrap("supercalifragilistic word", 5);
    assert_eq!(lines, vec!["supercalifragilistic", "word"]);
  }
}
