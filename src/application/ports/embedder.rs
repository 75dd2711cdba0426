use async_trait::async_trait;

use crate::domain::Embedding;

/// Maps text into the vector space used for similarity search.
///
/// Questions go through [`Embedder::embed_query`]; document chunks are sent
/// together through [`Embedder::embed_documents`], which must return one
/// embedding per input in input order.
#[async_trait]
pub trait Embedder: Send + Sync {
    async fn embed_query(&self, text: &str) -> Result<Embedding, EmbedderError>;

    async fn embed_documents(&self, texts: &[&str]) -> Result<Vec<Embedding>, EmbedderError>;
}

#[derive(Debug, thiserror::Error)]
pub enum EmbedderError {
    #[error("embeddings request failed: {0}")]
    Request(String),
    #[error("embeddings endpoint rate limited the request")]
    RateLimited,
    #[error("malformed embeddings response: {0}")]
    MalformedResponse(String),
}
