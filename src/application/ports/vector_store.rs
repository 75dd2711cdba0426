use async_trait::async_trait;

use crate::domain::{Chunk, Embedding};

/// Similarity index over embedded chunks.
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// `chunks[i]` is stored under `embeddings[i]`; an existing chunk id is
    /// replaced.
    async fn upsert(
        &self,
        chunks: &[Chunk],
        embeddings: &[Embedding],
    ) -> Result<(), VectorStoreError>;

    /// At most `top_k` chunks, most similar first.
    async fn search(
        &self,
        query: &Embedding,
        top_k: usize,
    ) -> Result<Vec<SearchResult>, VectorStoreError>;

    async fn count(&self) -> usize;
}

/// Hands out an empty store for each index build.
pub trait VectorStoreFactory: Send + Sync {
    fn create(&self) -> Box<dyn VectorStore>;
}

#[derive(Debug, Clone)]
pub struct SearchResult {
    pub chunk: Chunk,
    /// Cosine similarity to the query.
    pub score: f32,
}

#[derive(Debug, thiserror::Error)]
pub enum VectorStoreError {
    #[error("could not index chunks: {0}")]
    Upsert(String),
    #[error("similarity search failed: {0}")]
    Search(String),
}
