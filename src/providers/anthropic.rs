use serde::Serialize;
use serde_json::Value;

use crate::models::CompletionRequest;
use crate::providers::r#trait::CompletionAdapter;
use crate::providers::{parse_json, success_body, CompletionError, MAX_TOKENS};

const MESSAGES_URL: &str = "https://api.anthropic.com/v1/messages";
const API_VERSION: &str = "2023-06-01";

/// Anthropic messages adapter. Auth is a custom `x-api-key` header plus a
/// pinned `anthropic-version` header.
pub struct AnthropicAdapter;

#[derive(Serialize)]
struct MessagesBody<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<Message<'a>>,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

/// Normalize the `content` field, which may be a plain string or an array
/// of `{type, text}` blocks. Older responses carry a `completion` string
/// instead.
pub(crate) fn extract_text(data: &Value) -> Option<String> {
    match data.get("content") {
        Some(Value::String(text)) => Some(text.clone()),
        Some(Value::Array(blocks)) => Some(
            blocks
                .iter()
                .filter_map(|b| b.get("text").and_then(Value::as_str))
                .collect::<Vec<_>>()
                .join(""),
        ),
        _ => data
            .get("completion")
            .and_then(Value::as_str)
            .map(str::to_string),
    }
}

#[async_trait::async_trait]
impl CompletionAdapter for AnthropicAdapter {
    fn id(&self) -> &'static str {
        "anthropic"
    }

    async fn complete(
        &self,
        client: &reqwest::Client,
        request: &CompletionRequest,
    ) -> Result<String, CompletionError> {
        let body = MessagesBody {
            model: &request.model,
            max_tokens: MAX_TOKENS,
            messages: vec![Message {
                role: "user",
                content: &request.prompt,
            }],
        };

        let response = client
            .post(MESSAGES_URL)
            .header("x-api-key", request.api_key.as_deref().unwrap_or_default())
            .header("anthropic-version", API_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|e| CompletionError::transport(MESSAGES_URL, e))?;

        let body = success_body(MESSAGES_URL, response).await?;
        let data = parse_json(&body)?;
        extract_text(&data).ok_or(CompletionError::UnexpectedShape(body))
    }
}
