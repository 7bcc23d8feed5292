use serde::Serialize;
use serde_json::Value;

use crate::models::CompletionRequest;
use crate::providers::r#trait::CompletionAdapter;
use crate::providers::{parse_json, success_body, CompletionError};

const GENERATE_URL_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Google Gemini adapter. The API key travels in the query string and the
/// endpoint is model-specific.
pub struct GeminiAdapter;

#[derive(Serialize)]
struct GenerateBody<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

fn extract_text(data: &Value) -> Option<String> {
    data.get("candidates")?
        .get(0)?
        .get("content")?
        .get("parts")?
        .get(0)?
        .get("text")?
        .as_str()
        .map(str::to_string)
}

#[async_trait::async_trait]
impl CompletionAdapter for GeminiAdapter {
    fn id(&self) -> &'static str {
        "gemini"
    }

    async fn complete(
        &self,
        client: &reqwest::Client,
        request: &CompletionRequest,
    ) -> Result<String, CompletionError> {
        let url = format!(
            "{}/{}:generateContent",
            GENERATE_URL_BASE, request.model
        );
        let body = GenerateBody {
            contents: vec![Content {
                parts: vec![Part {
                    text: &request.prompt,
                }],
            }],
        };

        let response = client
            .post(&url)
            .query(&[("key", request.api_key.as_deref().unwrap_or_default())])
            .json(&body)
            .send()
            .await
            .map_err(|e| CompletionError::transport(&url, e))?;

        let body = success_body(&url, response).await?;
        let data = parse_json(&body)?;
        extract_text(&data).ok_or(CompletionError::UnexpectedShape(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_candidate_text() {
        let data = json!({
            "candidates": [
                {"content": {"parts": [{"text": "gemini says hi"}]}}
            ]
        });
        assert_eq!(extract_text(&data), Some("gemini says hi".to_string()));
    }

    #[test]
    fn test_extract_empty_candidates() {
        let data = json!({"candidates": []});
        assert_eq!(extract_text(&data), None);
    }

    #[test]
    fn test_request_body_shape() {
        let body = GenerateBody {
            contents: vec![Content {
                parts: vec![Part { text: "prompt" }],
            }],
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["contents"][0]["parts"][0]["text"], "prompt");
    }
}
