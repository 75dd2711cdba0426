use std::path::PathBuf;
use std::sync::Arc;

use crate::application::ports::{
    Embedder, EmbedderError, FileLoader, FileLoaderError, TextSplitter, TextSplitterError,
};
use crate::domain::{Chunk, ContentType, Document, Embedding};

/// Loads the configured document and turns it into embedded chunks.
pub struct IngestionService<F, T: ?Sized>
where
    F: FileLoader,
    T: TextSplitter,
{
    document_path: PathBuf,
    file_loader: Arc<F>,
    text_splitter: Arc<T>,
    embedder: Arc<dyn Embedder>,
}

/// Output of one ingestion run. `chunks[i]` is embedded as `embeddings[i]`.
#[derive(Debug, Clone)]
pub struct IngestedDocument {
    pub document: Document,
    pub chunks: Vec<Chunk>,
    pub embeddings: Vec<Embedding>,
}

impl<F, T: ?Sized> IngestionService<F, T>
where
    F: FileLoader,
    T: TextSplitter,
{
    pub fn new(
        document_path: PathBuf,
        file_loader: Arc<F>,
        text_splitter: Arc<T>,
        embedder: Arc<dyn Embedder>,
    ) -> Self {
        Self {
            document_path,
            file_loader,
            text_splitter,
            embedder,
        }
    }

    pub async fn document_exists(&self) -> bool {
        tokio::fs::try_exists(&self.document_path)
            .await
            .unwrap_or(false)
    }

    #[tracing::instrument(skip(self), fields(path = %self.document_path.display()))]
    pub async fn ingest(&self) -> Result<IngestedDocument, IngestionError> {
        if !self.document_exists().await {
            return Err(IngestionError::DocumentNotFound(
                self.document_path.display().to_string(),
            ));
        }

        let content_type = ContentType::from_path(&self.document_path).ok_or_else(|| {
            IngestionError::UnsupportedDocument(self.document_path.display().to_string())
        })?;

        let data = tokio::fs::read(&self.document_path).await?;
        let document = Document::new(
            self.document_path.display().to_string(),
            content_type,
            data.len() as u64,
        );

        let text = self
            .file_loader
            .load(&data, &document)
            .await
            .map_err(IngestionError::FileLoading)?;

        let chunks = self
            .text_splitter
            .split(&text, &document)
            .await
            .map_err(IngestionError::Splitting)?;

        tracing::debug!(
            text_chars = text.chars().count(),
            chunk_count = chunks.len(),
            "Document split into chunks"
        );

        if chunks.is_empty() {
            return Ok(IngestedDocument {
                document,
                chunks,
                embeddings: Vec::new(),
            });
        }

        let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
        let embeddings = self
            .embedder
            .embed_documents(&texts)
            .await
            .map_err(IngestionError::Embedding)?;

        if embeddings.len() != chunks.len() {
            return Err(IngestionError::Embedding(EmbedderError::MalformedResponse(
                format!(
                    "expected {} embeddings, got {}",
                    chunks.len(),
                    embeddings.len()
                ),
            )));
        }

        Ok(IngestedDocument {
            document,
            chunks,
            embeddings,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum IngestionError {
    #[error("document not found: {0}")]
    DocumentNotFound(String),
    #[error("unsupported document type: {0}")]
    UnsupportedDocument(String),
    #[error("reading document: {0}")]
    Read(#[from] std::io::Error),
    #[error("file loading: {0}")]
    FileLoading(#[from] FileLoaderError),
    #[error("text splitting: {0}")]
    Splitting(#[from] TextSplitterError),
    #[error("embedding: {0}")]
    Embedding(#[from] EmbedderError),
}
