pub mod config;
pub mod hashtag;
pub mod models;
pub mod providers;
pub mod server;
pub mod store;

pub use config::StorePaths;
pub use models::{CompletionRequest, History, ProviderDescriptor, Settings};
pub use providers::{CompletionAdapter, CompletionError, Dispatcher};
pub use store::{HistoryStore, LoadOutcome, SettingsStore};
