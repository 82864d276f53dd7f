use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::StoreError;
use crate::ideas::IdeaRecord;

/// Append-only JSON array of saved ideas
pub struct IdeaStore {
  path: PathBuf,
}

impl IdeaStore {
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self { path: path.into() }
  }

  pub fn path(&self) -> &Path {
    &self.path
  }

  /// Strict read: a missing file is empty, unreadable or malformed content is an error
  pub fn try_load(&self) -> Result<Vec<IdeaRecord>, StoreError> {
    if !self.path.exists() {
      return Ok(Vec::new());
    }

    let content = fs::read_to_string(&self.path)?;
    serde_json::from_str(&content).map_err(|e| StoreError::MalformedPersistedState {
      path: self.path.clone(),
      message: e.to_string(),
    })
  }

  /// Saved ideas, or an empty list when the file is missing or unreadable
  pub fn load(&self) -> Vec<IdeaRecord> {
    match self.try_load() {
      Ok(ideas) => ideas,
      Err(e) => {
        tracing::warn!(error = %e, "treating idea store as empty");
        Vec::new()
      }
    }
  }

  /// Append `records` after whatever `load` returns; returns the new total
  pub fn append(&self, records: &[IdeaRecord]) -> Result<usize, StoreError> {
    let mut ideas = self.load();
    ideas.extend_from_slice(records);

    if let Some(parent) = self.path.parent() {
      if !parent.as_os_str().is_empty() {
        fs::create_dir_all(parent)?;
      }
    }

    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    ideas.serialize(&mut serializer)?;
    fs::write(&self.path, buf)?;

    Ok(ideas.len())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use tempfile::TempDir;

  fn record(text: &str) -> IdeaRecord {
    IdeaRecord::new(text, "edtech", "india, college students")
  }

  #[test]
  fn test_missing_file_loads_empty() {
    let dir = TempDir::new().unwrap();
    let store = IdeaStore::new(dir.path().join("data").join("ideas.json"));
    assert!(store.load().is_empty());
    assert!(store.try_load().unwrap().is_empty());
  }

  #[test]
  fn test_malformed_file_loads_empty() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("ideas.json");
    fs::write(&path, "{\"not\": \"a list\"").unwrap();

    let store = IdeaStore::new(&path);
    assert!(store.load().is_empty());
    assert!(matches!(store.try_load(), Err(StoreError::MalformedPersistedState { .. })));
  }

  #[test]
  fn test_append_preserves_existing_records() {
    let dir = TempDir::new().unwrap();
    let store = IdeaStore::new(dir.path().join("data").join("ideas.json"));

    assert_eq!(store.append(&[record("First saved idea, long enough")]).unwrap(), 1);
    assert_eq!(
      store
        .append(&[record("Second saved idea, long enough"), record("Third saved idea, long enough")])
        .unwrap(),
      3
    );

    let loaded = store.load();
    let texts: Vec<_> = loaded.iter().map(|r| r.idea.as_str()).collect();
    assert_eq!(
      texts,
      vec!["First saved idea, long enough", "Second saved idea, long enough", "Third saved idea, long enough"]
    );
  }

  #[test]
  fn test_append_keeps_history_with_naive_timestamps() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("ideas.json");
    fs::write(
      &path,
      r#"[{"idea": "Earlier idea saved with a naive clock", "interest": "edtech", "region": "india", "timestamp": "2025-06-01 12:34:56.123456"}]"#,
    )
    .unwrap();

    let store = IdeaStore::new(&path);
    assert_eq!(store.try_load().unwrap().len(), 1);
    assert_eq!(store.append(&[record("Newer idea saved after the first")]).unwrap(), 2);

    let loaded = store.try_load().unwrap();
    assert_eq!(loaded[0].idea, "Earlier idea saved with a naive clock");
    assert_eq!(loaded[1].idea, "Newer idea saved after the first");
  }

  #[test]
  fn test_append_writes_four_space_indent() {
    let dir = TempDir::new().unwrap();
    let store = IdeaStore::new(dir.path().join("ideas.json"));
    store.append(&[record("Indented idea that is long enough")]).unwrap();

    let content = fs::read_to_string(store.path()).unwrap();
    assert!(content.starts_with("[\n    {\n        \"idea\""));
  }

  #[test]
  fn test_append_replaces_malformed_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("ideas.json");
    fs::write(&path, "garbage").unwrap();

    let store = IdeaStore::new(&path);
    assert_eq!(store.append(&[record("Fresh idea after corruption")]).unwrap(), 1);
    assert_eq!(store.try_load().unwrap().len(), 1);
  }
}
