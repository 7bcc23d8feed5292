use serde::Serialize;
use serde_json::Value;

use crate::models::CompletionRequest;
use crate::providers::r#trait::CompletionAdapter;
use crate::providers::{parse_json, success_body, CompletionError, MAX_TOKENS};

const COMPLETIONS_PATH: &str = "/v1/completions";

/// LM Studio (local server) adapter: no auth, caller-supplied base URL,
/// OpenAI-compatible legacy completions path.
pub struct LmStudioAdapter;

#[derive(Serialize)]
struct CompletionsBody<'a> {
    model: &'a str,
    prompt: &'a str,
    max_tokens: u32,
}

fn extract_text(data: &Value) -> Option<String> {
    data.get("choices")?
        .get(0)?
        .get("text")?
        .as_str()
        .map(str::to_string)
}

#[async_trait::async_trait]
impl CompletionAdapter for LmStudioAdapter {
    fn id(&self) -> &'static str {
        "lmstudio"
    }

    async fn complete(
        &self,
        client: &reqwest::Client,
        request: &CompletionRequest,
    ) -> Result<String, CompletionError> {
        let base_url = request.base_url.as_deref().unwrap_or_default();
        let url = format!("{}{}", base_url.trim_end_matches('/'), COMPLETIONS_PATH);
        let body = CompletionsBody {
            model: &request.model,
            prompt: &request.prompt,
            max_tokens: MAX_TOKENS,
        };

        let response = client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| CompletionError::transport(&url, e))?;

        let body = success_body(&url, response).await?;
        let data = parse_json(&body)?;
        extract_text(&data).ok_or(CompletionError::UnexpectedShape(body))
    }
}
