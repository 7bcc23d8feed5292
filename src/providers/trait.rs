use crate::models::CompletionRequest;
use crate::providers::CompletionError;

/// Trait for provider adapters that can run one completion exchange
///
/// An adapter owns the translation between the normalized request and its
/// provider's wire format: auth headers, endpoint shape, request body, and
/// response extraction. New providers are added by registering another
/// adapter with the dispatcher.
#[async_trait::async_trait]
pub trait CompletionAdapter: Send + Sync {
    /// Stable provider id this adapter handles (e.g. "openai")
    fn id(&self) -> &'static str;

    /// Send the prompt to the provider and extract the completion text
    async fn complete(
        &self,
        client: &reqwest::Client,
        request: &CompletionRequest,
    ) -> Result<String, CompletionError>;
}
