use std::sync::Arc;

use super::ingestion_service::{IngestedDocument, IngestionError, IngestionService};
use crate::application::ports::{
    CacheStore, CacheStoreError, FileLoader, TextSplitter, VectorStoreError, VectorStoreFactory,
};

pub const DOCS_CACHE_KEY: &str = "docs";
pub const EMBEDDINGS_CACHE_KEY: &str = "embeddings";

const PREVIEW_CHARS: usize = 50;

/// Precomputes chunks and embeddings and parks them in the cache.
///
/// The query path does not read these entries; it always re-ingests.
pub struct CacheWarmer<F, T: ?Sized>
where
    F: FileLoader,
    T: TextSplitter,
{
    ingestion_service: Arc<IngestionService<F, T>>,
    vector_store_factory: Arc<dyn VectorStoreFactory>,
    cache: Arc<dyn CacheStore>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WarmupReport {
    pub chunk_count: usize,
    pub cached: bool,
}

impl<F, T: ?Sized> CacheWarmer<F, T>
where
    F: FileLoader,
    T: TextSplitter,
{
    pub fn new(
        ingestion_service: Arc<IngestionService<F, T>>,
        vector_store_factory: Arc<dyn VectorStoreFactory>,
        cache: Arc<dyn CacheStore>,
    ) -> Self {
        Self {
            ingestion_service,
            vector_store_factory,
            cache,
        }
    }

    pub async fn warm(&self) -> Result<WarmupReport, CacheWarmerError> {
        let ingested = self.ingestion_service.ingest().await?;

        tracing::info!(
            chunk_count = ingested.chunks.len(),
            "Documents split into chunks"
        );
        for (idx, chunk) in ingested.chunks.iter().enumerate() {
            tracing::info!("Chunk {}: {}...", idx + 1, chunk.preview(PREVIEW_CHARS));
        }

        let vector_store = self.vector_store_factory.create();
        vector_store
            .upsert(&ingested.chunks, &ingested.embeddings)
            .await?;

        let cached = match self.write_cache(&ingested).await {
            Ok(()) => {
                tracing::info!("QA system initialized and cached successfully");
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "Error caching data");
                false
            }
        };

        Ok(WarmupReport {
            chunk_count: ingested.chunks.len(),
            cached,
        })
    }

    async fn write_cache(&self, ingested: &IngestedDocument) -> Result<(), CacheStoreError> {
        self.cache
            .set(DOCS_CACHE_KEY, serde_json::to_value(&ingested.chunks)?)
            .await?;
        self.cache
            .set(
                EMBEDDINGS_CACHE_KEY,
                serde_json::to_value(&ingested.embeddings)?,
            )
            .await?;
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CacheWarmerError {
    #[error(transparent)]
    Ingestion(#[from] IngestionError),
    #[error("indexing: {0}")]
    Indexing(#[from] VectorStoreError),
}
