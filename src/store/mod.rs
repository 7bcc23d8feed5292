pub mod history;
pub mod settings;

pub use history::HistoryStore;
pub use settings::SettingsStore;

/// Outcome of loading a persisted value.
///
/// The end result is always usable, but callers can tell a clean read from
/// the two fallback paths: a first run (no file yet, one was created with
/// defaults) and recovery from an unreadable or corrupt file.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome<T> {
    /// File existed and parsed cleanly
    Loaded(T),
    /// No file yet; defaults were written out
    FirstRun(T),
    /// File existed but could not be parsed; defaults substituted
    Recovered(T),
}

impl<T> LoadOutcome<T> {
    pub fn value(&self) -> &T {
        match self {
            LoadOutcome::Loaded(v) | LoadOutcome::FirstRun(v) | LoadOutcome::Recovered(v) => v,
        }
    }

    pub fn into_value(self) -> T {
        match self {
            LoadOutcome::Loaded(v) | LoadOutcome::FirstRun(v) | LoadOutcome::Recovered(v) => v,
        }
    }

    pub fn is_recovered(&self) -> bool {
        matches!(self, LoadOutcome::Recovered(_))
    }
}
