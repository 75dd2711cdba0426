use async_trait::async_trait;

use crate::domain::{Chunk, Document};

/// Cuts extracted text into chunks that carry their position in the text.
#[async_trait]
pub trait TextSplitter: Send + Sync {
    async fn split(&self, text: &str, document: &Document)
    -> Result<Vec<Chunk>, TextSplitterError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TextSplitterError {
    #[error("invalid splitter configuration: {0}")]
    InvalidConfiguration(String),
}
