use thiserror::Error;

/// Structured failure from a provider completion call.
///
/// Provider failures are always surfaced as a value, never as a panic:
/// transport problems, non-success statuses, and bodies that do not match
/// the provider's documented shape each map to a distinct kind.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CompletionError {
    #[error("Unknown provider: {0}")]
    UnknownProvider(String),

    #[error("Azure endpoint required")]
    MissingEndpoint,

    /// Non-2xx from the provider; the message carries the raw response body
    #[error("{body}")]
    UpstreamHttp { status: u16, body: String },

    /// Transport failure; the message names the URL that was attempted
    #[error("Could not connect to {url}. Is the server running and accessible?")]
    Connection { url: String },

    /// 2xx response whose body did not match the provider's wire format
    #[error("Unexpected response shape: {0}")]
    UnexpectedShape(String),
}

impl CompletionError {
    /// Stable machine-readable kind name, used on the HTTP surface
    pub fn kind(&self) -> &'static str {
        match self {
            CompletionError::UnknownProvider(_) => "unknown_provider",
            CompletionError::MissingEndpoint => "missing_endpoint",
            CompletionError::UpstreamHttp { .. } => "upstream_http_error",
            CompletionError::Connection { .. } => "connection_error",
            CompletionError::UnexpectedShape(_) => "unexpected_response_shape",
        }
    }

    /// Map a reqwest transport error for a request to `url`
    pub fn transport(url: &str, _err: reqwest::Error) -> Self {
        CompletionError::Connection {
            url: url.to_string(),
        }
    }
}
