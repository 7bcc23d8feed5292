use serde::Deserialize;

use crate::models::{ExtraField, ProviderDescriptor};

const OPENAI_MODELS_URL: &str = "https://api.openai.com/v1/models";
const MISTRAL_MODELS_URL: &str = "https://api.mistral.ai/v1/models";

/// HuggingFace has no public list endpoint, so a curated set is returned
const HUGGINGFACE_CURATED_MODELS: [&str; 5] = [
    "bigscience/bloom",
    "meta-llama/Llama-2-7b-chat-hf",
    "tiiuae/falcon-7b-instruct",
    "google/flan-t5-xl",
    "mistralai/Mistral-7B-Instruct-v0.2",
];

/// Credentials and connection parameters for live model discovery
#[derive(Debug, Clone, Default)]
pub struct DiscoveryParams {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
}

fn descriptor(
    id: &str,
    name: &str,
    models: &[&str],
    api_key_label: Option<&str>,
    extra_fields: &[ExtraField],
) -> ProviderDescriptor {
    ProviderDescriptor {
        id: id.to_string(),
        name: name.to_string(),
        models: models.iter().map(|m| m.to_string()).collect(),
        api_key_label: api_key_label.map(str::to_string),
        extra_fields: extra_fields.to_vec(),
    }
}

/// The static provider catalog, in stable registration order
pub fn catalog() -> Vec<ProviderDescriptor> {
    vec![
        descriptor(
            "openai",
            "OpenAI",
            &["gpt-3.5-turbo", "gpt-4", "text-davinci-003"],
            Some("OpenAI API Key"),
            &[],
        ),
        descriptor(
            "anthropic",
            "Anthropic Claude",
            &["claude-3-opus-20240229", "claude-3-sonnet-20240229"],
            Some("Anthropic API Key"),
            &[],
        ),
        descriptor(
            "azure",
            "Azure OpenAI",
            &["gpt-35-turbo", "gpt-4"],
            Some("Azure API Key"),
            &[ExtraField::Endpoint],
        ),
        descriptor(
            "gemini",
            "Google Gemini",
            &["gemini-pro"],
            Some("Gemini API Key"),
            &[],
        ),
        descriptor(
            "mistral",
            "Mistral AI",
            &["mistral-tiny", "mistral-small", "mistral-medium", "mistral-large"],
            Some("Mistral API Key"),
            &[],
        ),
        descriptor(
            "huggingface",
            "HuggingFace Inference API",
            &["bigscience/bloom", "meta-llama/Llama-2-7b-chat-hf"],
            Some("HuggingFace API Key"),
            &[ExtraField::Model],
        ),
        descriptor(
            "ollama",
            "Ollama (local)",
            &["llama2", "mistral", "phi", "codellama"],
            None,
            &[ExtraField::Model, ExtraField::BaseUrl],
        ),
        descriptor(
            "lmstudio",
            "LM Studio (local)",
            &["any"],
            None,
            &[ExtraField::Model, ExtraField::BaseUrl],
        ),
    ]
}

#[derive(Deserialize)]
struct ModelList {
    #[serde(default)]
    data: Vec<ModelEntry>,
}

#[derive(Deserialize)]
struct ModelEntry {
    id: String,
}

#[derive(Deserialize)]
struct OllamaTagList {
    #[serde(default)]
    models: Vec<OllamaTag>,
}

#[derive(Deserialize)]
struct OllamaTag {
    name: String,
}

/// Discover the models a provider currently serves.
///
/// openai and mistral expose authenticated list endpoints; ollama and
/// lmstudio expose unauthenticated local ones; huggingface gets the curated
/// list. Every failure path (missing credentials, transport error,
/// non-success status) yields an empty list, never an error.
pub async fn list_models(
    client: &reqwest::Client,
    provider_id: &str,
    params: &DiscoveryParams,
) -> Vec<String> {
    match (provider_id, &params.api_key, &params.base_url) {
        ("openai", Some(api_key), _) => {
            fetch_openai_style(client, OPENAI_MODELS_URL, Some(api_key)).await
        }
        ("mistral", Some(api_key), _) => {
            fetch_openai_style(client, MISTRAL_MODELS_URL, Some(api_key)).await
        }
        ("huggingface", Some(_), _) => HUGGINGFACE_CURATED_MODELS
            .iter()
            .map(|m| m.to_string())
            .collect(),
        ("ollama", _, Some(base_url)) => {
            let url = format!("{}/api/tags", base_url.trim_end_matches('/'));
            fetch_ollama_tags(client, &url).await
        }
        ("lmstudio", _, Some(base_url)) => {
            let url = format!("{}/v1/models", base_url.trim_end_matches('/'));
            fetch_openai_style(client, &url, None).await
        }
        _ => Vec::new(),
    }
}

/// GET an OpenAI-style `{data: [{id}]}` model list; empty on any failure
async fn fetch_openai_style(
    client: &reqwest::Client,
    url: &str,
    api_key: Option<&str>,
) -> Vec<String> {
    let mut builder = client.get(url);
    if let Some(api_key) = api_key {
        builder = builder.bearer_auth(api_key);
    }

    let Ok(response) = builder.send().await else {
        return Vec::new();
    };
    if !response.status().is_success() {
        return Vec::new();
    }
    match response.json::<ModelList>().await {
        Ok(list) => list.data.into_iter().map(|m| m.id).collect(),
        Err(_) => Vec::new(),
    }
}

/// GET an Ollama `{models: [{name}]}` tag list; empty on any failure
async fn fetch_ollama_tags(client: &reqwest::Client, url: &str) -> Vec<String> {
    let Ok(response) = client.get(url).send().await else {
        return Vec::new();
    };
    if !response.status().is_success() {
        return Vec::new();
    }
    match response.json::<OllamaTagList>().await {
        Ok(list) => list.models.into_iter().map(|m| m.name).collect(),
        Err(_) => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_order_is_stable() {
        let ids: Vec<String> = catalog().into_iter().map(|d| d.id).collect();
        assert_eq!(
            ids,
            [
                "openai",
                "anthropic",
                "azure",
                "gemini",
                "mistral",
                "huggingface",
                "ollama",
                "lmstudio"
            ]
        );
    }

    #[test]
    fn test_local_providers_need_no_key() {
        for d in catalog() {
            match d.id.as_str() {
                "ollama" | "lmstudio" => {
                    assert!(d.api_key_label.is_none());
                    assert!(d.extra_fields.contains(&ExtraField::BaseUrl));
                }
                _ => assert!(d.api_key_label.is_some()),
            }
        }
    }

    #[test]
    fn test_azure_requires_endpoint_field() {
        let azure = catalog().into_iter().find(|d| d.id == "azure").unwrap();
        assert_eq!(azure.extra_fields, [ExtraField::Endpoint]);
    }

    #[tokio::test]
    async fn test_unknown_provider_lists_nothing() {
        let models = list_models(
            &reqwest::Client::new(),
            "unknown",
            &DiscoveryParams::default(),
        )
        .await;
        assert!(models.is_empty());
    }

    #[tokio::test]
    async fn test_discovery_without_credentials_lists_nothing() {
        let client = reqwest::Client::new();
        for id in ["openai", "mistral", "huggingface", "ollama", "lmstudio"] {
            let models = list_models(&client, id, &DiscoveryParams::default()).await;
            assert!(models.is_empty(), "{id} listed models without credentials");
        }
    }

    #[tokio::test]
    async fn test_huggingface_returns_curated_list() {
        let params = DiscoveryParams {
            api_key: Some("hf_key".into()),
            base_url: None,
        };
        let models = list_models(&reqwest::Client::new(), "huggingface", &params).await;
        assert_eq!(models.len(), 5);
        assert!(models.contains(&"bigscience/bloom".to_string()));
    }

    #[tokio::test]
    async fn test_unreachable_local_server_lists_nothing() {
        let params = DiscoveryParams {
            api_key: None,
            base_url: Some("http://127.0.0.1:9".into()),
        };
        let client = reqwest::Client::new();
        assert!(list_models(&client, "ollama", &params).await.is_empty());
        assert!(list_models(&client, "lmstudio", &params).await.is_empty());
    }

    #[tokio::test]
    async fn test_providers_without_discovery_list_nothing() {
        let params = DiscoveryParams {
            api_key: Some("key".into()),
            base_url: Some("http://127.0.0.1:9".into()),
        };
        let client = reqwest::Client::new();
        for id in ["anthropic", "azure", "gemini"] {
            let models = list_models(&client, id, &params).await;
            assert!(models.is_empty(), "{id} should not support discovery");
        }
    }
}
