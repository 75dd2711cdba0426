use std::sync::Arc;

use super::ingestion_service::{IngestionError, IngestionService};
use super::stuff_prompt::stuff_prompt;
use crate::application::ports::{
    Embedder, EmbedderError, FileLoader, LlmClient, LlmClientError, TextSplitter,
    VectorStoreError, VectorStoreFactory,
};

/// Answers a question by rebuilding the whole index from the document on
/// every call and asking the language model about the closest passages.
pub struct RetrievalService<F, T: ?Sized, L>
where
    F: FileLoader,
    T: TextSplitter,
    L: LlmClient,
{
    ingestion_service: Arc<IngestionService<F, T>>,
    embedder: Arc<dyn Embedder>,
    vector_store_factory: Arc<dyn VectorStoreFactory>,
    llm_client: Arc<L>,
    top_k: usize,
}

impl<F, T: ?Sized, L> RetrievalService<F, T, L>
where
    F: FileLoader,
    T: TextSplitter,
    L: LlmClient,
{
    pub fn new(
        ingestion_service: Arc<IngestionService<F, T>>,
        embedder: Arc<dyn Embedder>,
        vector_store_factory: Arc<dyn VectorStoreFactory>,
        llm_client: Arc<L>,
        top_k: usize,
    ) -> Self {
        Self {
            ingestion_service,
            embedder,
            vector_store_factory,
            llm_client,
            top_k,
        }
    }

    #[tracing::instrument(skip(self, question), fields(top_k = self.top_k))]
    pub async fn answer(&self, question: &str) -> Result<AnsweredQuestion, RetrievalError> {
        let ingested = self.ingestion_service.ingest().await?;

        let vector_store = self.vector_store_factory.create();
        vector_store
            .upsert(&ingested.chunks, &ingested.embeddings)
            .await
            .map_err(RetrievalError::Indexing)?;

        let query_embedding = self
            .embedder
            .embed_query(question)
            .await
            .map_err(RetrievalError::Embedding)?;

        let results = vector_store
            .search(&query_embedding, self.top_k)
            .await
            .map_err(RetrievalError::Search)?;

        tracing::debug!(
            indexed = ingested.chunks.len(),
            retrieved = results.len(),
            best_score = results.first().map(|r| r.score),
            "Similarity search complete"
        );

        let prompt = stuff_prompt(question, &results);
        let answer = self
            .llm_client
            .complete(&prompt)
            .await
            .map_err(RetrievalError::Completion)?;

        Ok(AnsweredQuestion {
            answer,
            sources: results
                .into_iter()
                .map(|result| RetrievedPassage {
                    offset: result.chunk.offset,
                    text: result.chunk.text,
                    score: result.score,
                })
                .collect(),
        })
    }
}

/// The model's answer plus the passages it was shown, best match first.
#[derive(Debug, Clone)]
pub struct AnsweredQuestion {
    pub answer: String,
    pub sources: Vec<RetrievedPassage>,
}

#[derive(Debug, Clone)]
pub struct RetrievedPassage {
    pub text: String,
    pub offset: usize,
    pub score: f32,
}

#[derive(Debug, thiserror::Error)]
pub enum RetrievalError {
    #[error(transparent)]
    Ingestion(#[from] IngestionError),
    #[error("building the index failed: {0}")]
    Indexing(VectorStoreError),
    #[error("embedding the question failed: {0}")]
    Embedding(EmbedderError),
    #[error("retrieving passages failed: {0}")]
    Search(VectorStoreError),
    #[error("generating the answer failed: {0}")]
    Completion(LlmClientError),
}

impl RetrievalError {
    pub fn is_document_not_found(&self) -> bool {
        matches!(
            self,
            RetrievalError::Ingestion(IngestionError::DocumentNotFound(_))
        )
    }
}
