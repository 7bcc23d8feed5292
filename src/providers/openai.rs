use serde::Serialize;
use serde_json::Value;

use crate::models::CompletionRequest;
use crate::providers::r#trait::CompletionAdapter;
use crate::providers::{parse_json, success_body, ChatMessage, CompletionError, MAX_TOKENS};

const CHAT_COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";
const LEGACY_COMPLETIONS_URL: &str = "https://api.openai.com/v1/completions";

/// OpenAI adapter. One provider, two wire shapes: chat models (`gpt*`) go
/// through the chat-completions endpoint, everything else through the
/// legacy completions endpoint.
pub struct OpenAiAdapter;

#[derive(Serialize)]
struct ChatBody<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
}

#[derive(Serialize)]
struct LegacyBody<'a> {
    model: &'a str,
    prompt: &'a str,
    max_tokens: u32,
}

/// Extract completion text from either response shape:
/// `choices[0].message.content` (chat) or `choices[0].text` (legacy).
pub(crate) fn extract_text(data: &Value) -> Option<String> {
    let choice = data.get("choices")?.get(0)?;
    if let Some(content) = choice
        .get("message")
        .and_then(|m| m.get("content"))
        .and_then(Value::as_str)
    {
        return Some(content.to_string());
    }
    choice
        .get("text")
        .and_then(Value::as_str)
        .map(str::to_string)
}

#[async_trait::async_trait]
impl CompletionAdapter for OpenAiAdapter {
    fn id(&self) -> &'static str {
        "openai"
    }

    async fn complete(
        &self,
        client: &reqwest::Client,
        request: &CompletionRequest,
    ) -> Result<String, CompletionError> {
        let api_key = request.api_key.as_deref().unwrap_or_default();
        let is_chat = request.model.starts_with("gpt");
        let url = if is_chat {
            CHAT_COMPLETIONS_URL
        } else {
            LEGACY_COMPLETIONS_URL
        };

        let builder = client.post(url).bearer_auth(api_key);
        let builder = if is_chat {
            builder.json(&ChatBody {
                model: &request.model,
                messages: vec![ChatMessage::user(&request.prompt)],
                max_tokens: MAX_TOKENS,
            })
        } else {
            builder.json(&LegacyBody {
                model: &request.model,
                prompt: &request.prompt,
                max_tokens: MAX_TOKENS,
            })
        };

        let response = builder
            .send()
            .await
            .map_err(|e| CompletionError::transport(url, e))?;
        let body = success_body(url, response).await?;
        let data = parse_json(&body)?;
        extract_text(&data).ok_or(CompletionError::UnexpectedShape(body))
    }
}
