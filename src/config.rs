use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

const DEFAULT_DATA_DIR: &str = "~/.config/tagsmith";

/// Resolves where the settings and history files live.
///
/// Constructed with an explicit directory so callers (and tests) control
/// storage instead of reading ambient global paths.
#[derive(Debug, Clone)]
pub struct StorePaths {
    dir: PathBuf,
}

impl StorePaths {
    /// Use an explicit data directory
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }

    /// Use the default per-user data directory (`~/.config/tagsmith`)
    pub fn default_dir() -> Self {
        Self::new(shellexpand::tilde(DEFAULT_DATA_DIR).into_owned())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn settings_path(&self) -> PathBuf {
        self.dir.join("settings.json")
    }

    pub fn history_path(&self) -> PathBuf {
        self.dir.join("history.json")
    }

    /// Create the data directory if it does not exist yet
    pub fn ensure_dir(&self) -> Result<()> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create data directory: {}", self.dir.display()))
    }
}
