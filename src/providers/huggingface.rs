use serde::Serialize;
use serde_json::Value;

use crate::models::CompletionRequest;
use crate::providers::r#trait::CompletionAdapter;
use crate::providers::{parse_json, success_body, CompletionError};

const INFERENCE_URL_BASE: &str = "https://api-inference.huggingface.co/models";

/// HuggingFace Inference API adapter. The endpoint is per-model and the
/// response comes in two shapes: a list of generations or a single object,
/// both carrying `generated_text`.
pub struct HuggingFaceAdapter;

#[derive(Serialize)]
struct InferenceBody<'a> {
    inputs: &'a str,
}

/// Handle both documented response shapes; anything else is unexpected
pub(crate) fn extract_text(data: &Value) -> Option<String> {
    match data {
        Value::Array(items) => {
            let first = items.first()?;
            Some(
                first
                    .get("generated_text")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
            )
        }
        Value::Object(map) => Some(
            map.get("generated_text")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
        ),
        _ => None,
    }
}

#[async_trait::async_trait]
impl CompletionAdapter for HuggingFaceAdapter {
    fn id(&self) -> &'static str {
        "huggingface"
    }

    async fn complete(
        &self,
        client: &reqwest::Client,
        request: &CompletionRequest,
    ) -> Result<String, CompletionError> {
        let url = format!("{}/{}", INFERENCE_URL_BASE, request.model);
        let body = InferenceBody {
            inputs: &request.prompt,
        };

        let response = client
            .post(&url)
            .bearer_auth(request.api_key.as_deref().unwrap_or_default())
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
    fn test_extract_list_shape() {
        let data = json!([{"generated_text": "once upon a time"}]);
        assert_eq!(extract_text(&data), Some("once upon a time".to_string()));
    }

    #[test]
    fn test_extract_object_shape() {
        let data = json!({"generated_text": "a single object"});
        assert_eq!(extract_text(&data), Some("a single object".to_string()));
    }

    #[test]
    fn test_extract_list_without_field_yields_empty() {
        let data = json!([{"score": 0.5}]);
        assert_eq!(extract_text(&data), Some(String::new()));
    }

    #[test]
    fn test_extract_empty_list() {
        let data = json!([]);
        assert_eq!(extract_text(&data), None);
    }

    #[test]
    fn test_extract_scalar_is_unexpected() {
        let data = json!("bare string");
        assert_eq!(extract_text(&data), None);
    }
}
