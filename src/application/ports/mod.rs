mod cache_store;
mod embedder;
mod file_loader;
mod llm_client;
mod text_splitter;
mod vector_store;

pub use cache_store::{CacheStore, CacheStoreError};
pub use embedder::{Embedder, EmbedderError};
pub use file_loader::{FileLoader, FileLoaderError};
pub use llm_client::{LlmClient, LlmClientError};
pub use text_splitter::{TextSplitter, TextSplitterError};
pub use vector_store::{SearchResult, VectorStore, VectorStoreError, VectorStoreFactory};
