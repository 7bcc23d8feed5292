use anyhow::{Context, Result};
use std::fs::File;
use std::path::PathBuf;

use crate::models::History;
use crate::store::LoadOutcome;

/// Flat-file JSON store for the hashtag history (a plain array of strings)
#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// Load the history from disk.
    ///
    /// A missing file is created holding an empty list. An unparseable file
    /// falls back to an empty history without failing the caller.
    pub fn load(&self) -> Result<LoadOutcome<History>> {
        if !self.path.exists() {
            let empty = History::default();
            self.save(&empty)?;
            return Ok(LoadOutcome::FirstRun(empty));
        }

        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(_) => return Ok(LoadOutcome::Recovered(History::default())),
        };

        match serde_json::from_str(&content) {
            Ok(history) => Ok(LoadOutcome::Loaded(history)),
            Err(_) => Ok(LoadOutcome::Recovered(History::default())),
        }
    }

    /// Overwrite the history file with the given list
    pub fn save(&self, history: &History) -> Result<()> {
        let file = File::create(&self.path)
            .with_context(|| format!("Failed to open history file: {}", self.path.display()))?;
        serde_json::to_writer(file, history)
            .with_context(|| format!("Failed to write history file: {}", self.path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> HistoryStore {
        HistoryStore::new(dir.path().join("history.json"))
    }

    #[test]
    fn test_first_run_creates_empty_history() {
        let tmp = tempfile::tempdir().unwrap();
        let store = store_in(&tmp);

        let outcome = store.load().unwrap();
        assert_eq!(outcome, LoadOutcome::FirstRun(History::default()));
        assert_eq!(
            std::fs::read_to_string(tmp.path().join("history.json")).unwrap(),
            "[]"
        );
    }

    #[test]
    fn test_record_and_reload() {
        let tmp = tempfile::tempdir().unwrap();
        let store = store_in(&tmp);

        let mut history = store.load().unwrap().into_value();
        history.record("#HelloWorld", 10);
        history.record("#Rust", 10);
        store.save(&history).unwrap();

        let reloaded = store.load().unwrap().into_value();
        assert_eq!(reloaded.entries(), ["#Rust", "#HelloWorld"]);
    }

    #[test]
    fn test_corrupt_file_recovers_to_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let store = store_in(&tmp);
        std::fs::write(tmp.path().join("history.json"), "]]]garbage").unwrap();

        let outcome = store.load().unwrap();
        assert!(outcome.is_recovered());
        assert!(outcome.into_value().is_empty());
    }

    #[test]
    fn test_file_persists_legacy_shape() {
        // history file is a flat JSON array of strings
        let tmp = tempfile::tempdir().unwrap();
        let store = store_in(&tmp);
        std::fs::write(
            tmp.path().join("history.json"),
            r##"["#One", "#Two"]"##,
        )
        .unwrap();

        let history = store.load().unwrap().into_value();
        assert_eq!(history.entries(), ["#One", "#Two"]);
    }
}
