mod cache_warmer;
mod ingestion_service;
mod retrieval_service;
mod stuff_prompt;

pub use cache_warmer::{
    CacheWarmer, CacheWarmerError, DOCS_CACHE_KEY, EMBEDDINGS_CACHE_KEY, WarmupReport,
};
pub use ingestion_service::{IngestedDocument, IngestionError, IngestionService};
pub use retrieval_service::{AnsweredQuestion, RetrievalError, RetrievalService, RetrievedPassage};
pub use stuff_prompt::stuff_prompt;
