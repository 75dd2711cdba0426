use async_trait::async_trait;

/// Text completion against a hosted language model. The prompt is sent as
/// is; any context has already been stuffed into it.
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, LlmClientError>;
}

#[derive(Debug, thiserror::Error)]
pub enum LlmClientError {
    #[error("completion request failed: {0}")]
    Request(String),
    #[error("completion endpoint rate limited the request")]
    RateLimited,
    #[error("malformed completion response: {0}")]
    MalformedResponse(String),
}
