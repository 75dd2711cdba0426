mod chunk;
mod document;
mod embedding;

pub use chunk::{Chunk, ChunkId, DocumentId};
pub use document::{ContentType, Document};
pub use embedding::Embedding;
