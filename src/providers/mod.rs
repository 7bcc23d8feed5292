pub mod r#trait;
pub mod error;

pub mod anthropic;
pub mod azure;
pub mod gemini;
pub mod huggingface;
pub mod lmstudio;
pub mod mistral;
pub mod ollama;
pub mod openai;

pub mod dispatcher;
pub mod registry;

pub use dispatcher::Dispatcher;
pub use error::CompletionError;
pub use r#trait::CompletionAdapter;
pub use registry::{catalog, list_models, DiscoveryParams};

use serde::Serialize;
use serde_json::Value;

/// Completion length cap shared by every adapter
pub(crate) const MAX_TOKENS: u32 = 32;

/// Single user message in the OpenAI-style chat body shared by several
/// providers (openai, azure, mistral)
#[derive(Serialize)]
pub(crate) struct ChatMessage {
    role: &'static str,
    content: String,
}

impl ChatMessage {
    pub(crate) fn user(content: &str) -> Self {
        Self {
            role: "user",
            content: content.to_string(),
        }
    }
}

/// Read the response body, turning a non-success status into an
/// `UpstreamHttp` error carrying the raw body as diagnostic text.
pub(crate) async fn success_body(
    url: &str,
    response: reqwest::Response,
) -> Result<String, CompletionError> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| CompletionError::transport(url, e))?;
    if !status.is_success() {
        return Err(CompletionError::UpstreamHttp {
            status: status.as_u16(),
            body,
        });
    }
    Ok(body)
}

/// Parse a 2xx body as JSON; failure carries the raw body
pub(crate) fn parse_json(body: &str) -> Result<Value, CompletionError> {
    serde_json::from_str(body).map_err(|_| CompletionError::UnexpectedShape(body.to_string()))
}
