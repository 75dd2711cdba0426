use async_trait::async_trait;

use crate::domain::Document;

#[async_trait]
pub trait FileLoader: Send + Sync {
    /// Returns the document's text with blocks separated by blank lines.
    async fn load(&self, data: &[u8], document: &Document) -> Result<String, FileLoaderError>;
}

#[derive(Debug, thiserror::Error)]
pub enum FileLoaderError {
    #[error("unsupported document format: {0}")]
    UnsupportedFormat(String),
    #[error("could not parse document: {0}")]
    Parse(String),
    #[error("document {0} contains no text")]
    Empty(String),
}
