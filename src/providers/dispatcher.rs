use std::sync::Arc;

use crate::models::CompletionRequest;
use crate::providers::{
    anthropic::AnthropicAdapter, azure::AzureAdapter, gemini::GeminiAdapter,
    huggingface::HuggingFaceAdapter, lmstudio::LmStudioAdapter, mistral::MistralAdapter,
    ollama::OllamaAdapter, openai::OpenAiAdapter, CompletionAdapter, CompletionError,
};

/// Routes completion requests to the adapter registered for the provider id
///
/// Providers are added by registering another adapter; the routing logic
/// never changes.
pub struct Dispatcher {
    adapters: Vec<Arc<dyn CompletionAdapter>>,
}

impl Dispatcher {
    /// Create a dispatcher with every built-in provider adapter registered
    pub fn new() -> Self {
        let mut dispatcher = Self {
            adapters: Vec::new(),
        };

        dispatcher.register(Arc::new(OpenAiAdapter));
        dispatcher.register(Arc::new(AnthropicAdapter));
        dispatcher.register(Arc::new(AzureAdapter));
        dispatcher.register(Arc::new(GeminiAdapter));
        dispatcher.register(Arc::new(MistralAdapter));
        dispatcher.register(Arc::new(HuggingFaceAdapter));
        dispatcher.register(Arc::new(OllamaAdapter));
        dispatcher.register(Arc::new(LmStudioAdapter));

        dispatcher
    }

    /// Register an adapter
    pub fn register(&mut self, adapter: Arc<dyn CompletionAdapter>) {
        self.adapters.push(adapter);
    }

    /// Find the adapter registered for a provider id
    pub fn get(&self, provider_id: &str) -> Option<Arc<dyn CompletionAdapter>> {
        self.adapters
            .iter()
            .find(|a| a.id() == provider_id)
            .cloned()
    }

    /// Route a completion request to its provider adapter.
    ///
    /// An unknown provider id fails without any network activity.
    pub async fn complete(
        &self,
        client: &reqwest::Client,
        request: &CompletionRequest,
    ) -> Result<String, CompletionError> {
        match self.get(&request.provider) {
            Some(adapter) => adapter.complete(client, request).await,
            None => Err(CompletionError::UnknownProvider(request.provider.clone())),
        }
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_all_builtin_providers_registered() {
        let dispatcher = Dispatcher::new();
        for id in [
            "openai",
            "anthropic",
            "azure",
            "gemini",
            "mistral",
            "huggingface",
            "ollama",
            "lmstudio",
        ] {
            assert!(dispatcher.get(id).is_some(), "missing adapter for {id}");
        }
    }

    #[test]
    fn test_unknown_id_has_no_adapter() {
        assert!(Dispatcher::new().get("unknown").is_none());
    }

    #[tokio::test]
    async fn test_unknown_provider_errors_without_network() {
        let dispatcher = Dispatcher::new();
        let request = CompletionRequest {
            provider: "unknown".into(),
            prompt: "hi".into(),
            ..Default::default()
        };
        let err = dispatcher
            .complete(&reqwest::Client::new(), &request)
            .await
            .unwrap_err();
        assert_eq!(err, CompletionError::UnknownProvider("unknown".into()));
    }

    struct RecordingAdapter {
        calls: Arc<AtomicUsize>,
    }

    #[async_trait::async_trait]
    impl CompletionAdapter for RecordingAdapter {
        fn id(&self) -> &'static str {
            "recording"
        }

        async fn complete(
            &self,
            _client: &reqwest::Client,
            _request: &CompletionRequest,
        ) -> Result<String, CompletionError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok("recorded".to_string())
        }
    }

    #[tokio::test]
    async fn test_unknown_provider_invokes_no_adapter() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut dispatcher = Dispatcher::new();
        dispatcher.register(Arc::new(RecordingAdapter {
            calls: calls.clone(),
        }));

        let request = CompletionRequest {
            provider: "nope".into(),
            prompt: "hi".into(),
            ..Default::default()
        };
        let _ = dispatcher
            .complete(&reqwest::Client::new(), &request)
            .await;
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_registered_adapter_receives_request() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut dispatcher = Dispatcher::new();
        dispatcher.register(Arc::new(RecordingAdapter {
            calls: calls.clone(),
        }));

        let request = CompletionRequest {
            provider: "recording".into(),
            prompt: "hi".into(),
            ..Default::default()
        };
        let result = dispatcher
            .complete(&reqwest::Client::new(), &request)
            .await
            .unwrap();
        assert_eq!(result, "recorded");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
