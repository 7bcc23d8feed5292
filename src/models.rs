use serde::{Deserialize, Serialize};

/// How generated hashtags are cased
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapitalizationMode {
    /// Keep the input casing as-is
    None,
    /// Title-case each whitespace-delimited word
    #[default]
    First,
    /// Uppercase everything
    AllCaps,
    /// Lowercase everything
    Lowercase,
}

/// UI color theme preference (persisted for front-ends, unused by the core)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// User settings, persisted as one flat JSON record
///
/// Field names match the legacy settings file so existing installs
/// keep their configuration. Every field has a default so partial or
/// older files still parse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub remove_special_chars: bool,
    #[serde(default)]
    pub capitalization_mode: CapitalizationMode,
    #[serde(default = "default_history_max_items")]
    pub history_max_items: usize,
    #[serde(default)]
    pub theme: Theme,
    /// Character limit for input and generated hashtags; 0 = unlimited
    #[serde(default)]
    pub character_limit: usize,
}

fn default_history_max_items() -> usize {
    10
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            remove_special_chars: false,
            capitalization_mode: CapitalizationMode::First,
            history_max_items: 10,
            theme: Theme::Light,
            character_limit: 0,
        }
    }
}

/// Ordered list of previously generated hashtags, most recent first
///
/// Persisted as a flat JSON array of strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct History {
    entries: Vec<String>,
}

impl History {
    /// Record a freshly generated hashtag at the front of the history.
    ///
    /// Empty hashtags and exact duplicates are ignored. After a successful
    /// insert the history is truncated to `max_items`. Returns whether the
    /// hashtag was actually inserted.
    ///
    /// Dedup is case-sensitive on purpose: with the `none` capitalization
    /// mode, differently cased inputs produce distinct hashtags and each is
    /// kept.
    pub fn record(&mut self, hashtag: &str, max_items: usize) -> bool {
        if hashtag.is_empty() || self.entries.iter().any(|h| h == hashtag) {
            return false;
        }
        self.entries.insert(0, hashtag.to_string());
        self.entries.truncate(max_items);
        true
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<Vec<String>> for History {
    fn from(entries: Vec<String>) -> Self {
        Self { entries }
    }
}

/// Extra connection parameter a provider needs beyond an API key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtraField {
    Endpoint,
    Model,
    BaseUrl,
}

/// Static catalog entry describing one LLM provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderDescriptor {
    /// Stable identifier used for dispatch (e.g. "openai")
    pub id: String,
    /// Human-readable display name
    pub name: String,
    /// Default model identifiers offered in the UI
    pub models: Vec<String>,
    /// Label for the credential input; `None` means no key required
    pub api_key_label: Option<String>,
    /// Additional connection parameters this provider requires
    pub extra_fields: Vec<ExtraField>,
}

/// One prompt-in/text-out exchange request, routed by `provider`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub provider: String,
    pub prompt: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default)]
    pub base_url: Option<String>,
}
