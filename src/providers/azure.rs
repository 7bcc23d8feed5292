use serde::Serialize;
use serde_json::Value;

use crate::models::CompletionRequest;
use crate::providers::r#trait::CompletionAdapter;
use crate::providers::{parse_json, success_body, ChatMessage, CompletionError, MAX_TOKENS};

/// Azure OpenAI adapter. The full deployment endpoint URL is supplied by
/// the caller; a request without one fails before any network call.
pub struct AzureAdapter;

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
impl CompletionAdapter for AzureAdapter {
    fn id(&self) -> &'static str {
        "azure"
    }

    async fn complete(
        &self,
        client: &reqwest::Client,
        request: &CompletionRequest,
    ) -> Result<String, CompletionError> {
        let endpoint = match request.endpoint.as_deref() {
            Some(endpoint) if !endpoint.is_empty() => endpoint,
            _ => return Err(CompletionError::MissingEndpoint),
        };

        let body = ChatBody {
            model: &request.model,
            messages: vec![ChatMessage::user(&request.prompt)],
            max_tokens: MAX_TOKENS,
        };

        let response = client
            .post(endpoint)
            .header("api-key", request.api_key.as_deref().unwrap_or_default())
            .json(&body)
            .send()
            .await
            .map_err(|e| CompletionError::transport(endpoint, e))?;

        let body = success_body(endpoint, response).await?;
        let data = parse_json(&body)?;
        extract_text(&data).ok_or(CompletionError::UnexpectedShape(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_missing_endpoint_fails_before_any_network_call() {
        let request = CompletionRequest {
            provider: "azure".into(),
            prompt: "hi".into(),
            model: "gpt-4".into(),
            api_key: Some("key".into()),
            ..Default::default()
        };
        let err = AzureAdapter
            .complete(&reqwest::Client::new(), &request)
            .await
            .unwrap_err();
        assert_eq!(err, CompletionError::MissingEndpoint);
    }

    #[tokio::test]
    async fn test_empty_endpoint_counts_as_missing() {
        let request = CompletionRequest {
            provider: "azure".into(),
            prompt: "hi".into(),
            endpoint: Some(String::new()),
            ..Default::default()
        };
        let err = AzureAdapter
            .complete(&reqwest::Client::new(), &request)
            .await
            .unwrap_err();
        assert_eq!(err, CompletionError::MissingEndpoint);
    }

    #[test]
    fn test_extract_chat_content() {
        let data = json!({"choices": [{"message": {"content": "azure says hi"}}]});
        assert_eq!(extract_text(&data), Some("azure says hi".to_string()));
    }

    #[test]
    fn test_extract_rejects_legacy_shape() {
        let data = json!({"choices": [{"text": "nope"}]});
        assert_eq!(extract_text(&data), None);
    }
}
