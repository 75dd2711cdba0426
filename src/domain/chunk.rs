use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A bounded slice of a document's extracted text, ready to be embedded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    pub id: ChunkId,
    pub text: String,
    pub document_id: DocumentId,
    /// Path of the document the text came from.
    pub source: String,
    /// Byte offset of the chunk within the extracted text.
    pub offset: usize,
}

impl Chunk {
    pub fn new(text: String, document_id: DocumentId, source: String, offset: usize) -> Self {
        Self {
            id: ChunkId(Uuid::new_v4()),
            text,
            document_id,
            source,
            offset,
        }
    }

    /// First `max_chars` characters of the chunk, for log previews.
    pub fn preview(&self, max_chars: usize) -> &str {
        self.text
            .char_indices()
            .nth(max_chars)
            .map_or(self.text.as_str(), |(end, _)| &self.text[..end])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChunkId(Uuid);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(Uuid);

impl DocumentId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ChunkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
