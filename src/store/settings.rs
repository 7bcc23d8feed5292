use anyhow::{Context, Result};
use std::fs::File;
use std::path::PathBuf;

use crate::models::Settings;
use crate::store::LoadOutcome;

/// Flat-file JSON store for the user settings record
///
/// The whole record is overwritten on every save; there is no merging and
/// no migration.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// Load settings from disk.
    ///
    /// A missing file is created populated with defaults. An unparseable
    /// file falls back to defaults without failing the caller; the outcome
    /// variant records which path was taken.
    pub fn load(&self) -> Result<LoadOutcome<Settings>> {
        if !self.path.exists() {
            let defaults = Settings::default();
            self.save(&defaults)?;
            return Ok(LoadOutcome::FirstRun(defaults));
        }

        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(_) => return Ok(LoadOutcome::Recovered(Settings::default())),
        };

        match serde_json::from_str(&content) {
            Ok(settings) => Ok(LoadOutcome::Loaded(settings)),
            Err(_) => Ok(LoadOutcome::Recovered(Settings::default())),
        }
    }

    /// Overwrite the settings file with the given record
    pub fn save(&self, settings: &Settings) -> Result<()> {
        let file = File::create(&self.path)
            .with_context(|| format!("Failed to open settings file: {}", self.path.display()))?;
        serde_json::to_writer(file, settings)
            .with_context(|| format!("Failed to write settings file: {}", self.path.display()))?;
        Ok(())
    }
}
