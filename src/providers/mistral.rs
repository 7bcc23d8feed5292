use serde::Serialize;
use serde_json::Value;

use crate::models::CompletionRequest;
use crate::providers::r#trait::CompletionAdapter;
use crate::providers::{parse_json, success_body, ChatMessage, CompletionError, MAX_TOKENS};

const CHAT_COMPLETIONS_URL: &str = "https://api.mistral.ai/v1/chat/completions";

/// Mistral adapter: OpenAI-style chat wire format against a fixed endpoint
pub struct MistralAdapter;

#[derive(Serialize)]
struct ChatBody<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
}

fn extract_text(data: &Value) -> Option<String> {
    data.get("choices")?
        .get(0)?
        .get("message")?
        .get("content")?
        .as_str()
        .map(str::to_string)
}

#[async_trait::async_trait]
impl CompletionAdapter for MistralAdapter {
    fn id(&self) -> &'static str {
        "mistral"
    }

    async fn complete(
        &self,
        client: &reqwest::Client,
        request: &CompletionRequest,
    ) -> Result<String, CompletionError> {
        let body = ChatBody {
            model: &request.model,
            messages: vec![ChatMessage::user(&request.prompt)],
            max_tokens: MAX_TOKENS,
        };

        let response = client
            .post(CHAT_COMPLETIONS_URL)
            .bearer_auth(request.api_key.as_deref().unwrap_or_default())
            .json(&body)
            .send()
            .await
            .map_err(|e| CompletionError::transport(CHAT_COMPLETIONS_URL, e))?;

        let body = success_body(CHAT_COMPLETIONS_URL, response).await?;
        let data = parse_json(&body)?;
        extract_text(&data).ok_or(CompletionError::UnexpectedShape(body))
    }
}
