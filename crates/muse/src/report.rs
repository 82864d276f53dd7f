//! User-facing console output.
//!
//! Every line goes to stderr with a short colored level tag so that stdout stays
//! clean for ideas, summaries and reports. Each call is mirrored into `tracing`
//! so a log subscriber sees the same events.

use colored::*;

fn format_prefix(color: Color, tag: &str) -> String {
  format!("[{}]{:<width$}", tag.color(color).bold(), "", width = 7usize.saturating_sub(tag.len() + 2))
}

fn emit(color: Color, tag: &str, message: &str) {
  let prefix = format_prefix(color, tag);
  for line in message.lines() {
    eprintln!("{prefix} {line}");
  }
}

pub fn banner_line(length: usize, ch: char) -> String {
  ch.to_string().repeat(length)
}

/// Print `message` between two border lines
pub fn as_banner<F>(log_fn: F, message: &str, width: usize, border: char)
where
  F: Fn(&str),
{
  let banner = banner_line(width, border);
  log_fn(&banner);
  log_fn(message);
  log_fn(&banner);
}

pub fn info(message: &str) {
  tracing::info!(target: "muse::report", "{message}");
  emit(Color::Blue, "info", message);
}

pub fn warn(message: &str) {
  tracing::warn!(target: "muse::report", "{message}");
  emit(Color::Yellow, "warn", message);
}

pub fn error(message: &str) {
  tracing::error!(target: "muse::report", "{message}");
  emit(Color::Red, "error", message);
}

pub fn success(message: &str) {
  tracing::info!(target: "muse::report", "{message}");
  emit(Color::Green, "done", message);
}

/// Section heading for a command's output
pub fn announce(message: &str) {
  as_banner(|line| eprintln!("{}", line.blue().bold()), message, 50, '-');
}
