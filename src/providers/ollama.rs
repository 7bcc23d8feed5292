use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

use crate::models::CompletionRequest;
use crate::providers::r#trait::CompletionAdapter;
use crate::providers::CompletionError;

const GENERATE_PATH: &str = "/api/generate";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Ollama (local server) adapter. No auth; the caller supplies the base
/// URL. The server streams newline-delimited JSON objects even for
/// non-streaming clients, so only the first line of the body is parsed.
pub struct OllamaAdapter;

#[derive(Serialize)]
struct GenerateBody<'a> {
    model: &'a str,
    prompt: &'a str,
}

/// Parse an Ollama response body: take the first newline-delimited JSON
/// object and read its `response` field. A body that does not look like
/// JSON at all is an unexpected shape.
pub(crate) fn parse_stream_body(text: &str) -> Result<String, CompletionError> {
    let text = text.trim();
    if !text.starts_with('{') {
        return Err(CompletionError::UnexpectedShape(
            "Ollama returned unexpected response format.".to_string(),
        ));
    }
    let first_line = text.lines().next().unwrap_or_default();
    let data: Value = serde_json::from_str(first_line)
        .map_err(|_| CompletionError::UnexpectedShape(text.to_string()))?;
    Ok(data
        .get("response")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string())
}

#[async_trait::async_trait]
impl CompletionAdapter for OllamaAdapter {
    fn id(&self) -> &'static str {
        "ollama"
    }

    async fn complete(
        &self,
        client: &reqwest::Client,
        request: &CompletionRequest,
    ) -> Result<String, CompletionError> {
        let base_url = request.base_url.as_deref().unwrap_or_default();
        let url = format!("{}{}", base_url.trim_end_matches('/'), GENERATE_PATH);
        let body = GenerateBody {
            model: &request.model,
            prompt: &request.prompt,
        };

        let response = client
            .post(&url)
            .json(&body)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| CompletionError::transport(&url, e))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| CompletionError::transport(&url, e))?;
        if !status.is_success() {
            return Err(CompletionError::UpstreamHttp {
                status: status.as_u16(),
                body: format!("Ollama error: {} {}", status.as_u16(), text),
            });
        }

        parse_stream_body(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_line_of_streaming_body_wins() {
        let body = "{\"response\":\"a\"}\n{\"response\":\"b\"}";
        assert_eq!(parse_stream_body(body).unwrap(), "a");
    }

    #[test]
    fn test_single_object_body() {
        let body = r#"{"response": "hello", "done": true}"#;
        assert_eq!(parse_stream_body(body).unwrap(), "hello");
    }

    #[test]
    fn test_non_json_body_is_unexpected_shape() {
        let err = parse_stream_body("<html>not json</html>").unwrap_err();
        assert_eq!(err.kind(), "unexpected_response_shape");
    }

    #[test]
    fn test_truncated_json_line_is_unexpected_shape() {
        let err = parse_stream_body("{\"response\":").unwrap_err();
        assert_eq!(err.kind(), "unexpected_response_shape");
    }

    #[test]
    fn test_missing_response_field_yields_empty() {
        assert_eq!(parse_stream_body(r#"{"done": true}"#).unwrap(), "");
    }

    #[tokio::test]
    async fn test_unreachable_server_surfaces_connection_error() {
        // Port 9 (discard) is never running an HTTP server
        let request = CompletionRequest {
            provider: "ollama".into(),
            prompt: "hi".into(),
            model: "llama2".into(),
            base_url: Some("http://127.0.0.1:9".into()),
            ..Default::default()
        };
        let err = OllamaAdapter
            .complete(&reqwest::Client::new(), &request)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "connection_error");
        assert!(err.to_string().contains("http://127.0.0.1:9/api/generate"));
    }
}
