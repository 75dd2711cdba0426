use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::instrument;

use crate::application::ports::{SearchResult, VectorStore, VectorStoreError, VectorStoreFactory};
use crate::domain::{Chunk, ChunkId, Embedding};

/// Brute-force cosine similarity index held entirely in memory.
#[derive(Default)]
pub struct InMemoryVectorStore {
    index: RwLock<Index>,
}

/// `positions` maps each chunk id to its slot in `entries`.
#[derive(Default)]
struct Index {
    entries: Vec<(Chunk, Embedding)>,
    positions: HashMap<ChunkId, usize>,
}

impl InMemoryVectorStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VectorStore for InMemoryVectorStore {
    #[instrument(skip_all, fields(count = chunks.len()))]
    async fn upsert(
        &self,
        chunks: &[Chunk],
        embeddings: &[Embedding],
    ) -> Result<(), VectorStoreError> {
        if chunks.len() != embeddings.len() {
            return Err(VectorStoreError::Upsert(format!(
                "{} chunks but {} embeddings",
                chunks.len(),
                embeddings.len()
            )));
        }

        let mut index = self.index.write().await;
        let Index { entries, positions } = &mut *index;
        entries.reserve(chunks.len());
        for (chunk, embedding) in chunks.iter().zip(embeddings) {
            let entry = (chunk.clone(), embedding.clone());
            match positions.get(&chunk.id) {
                Some(&slot) => entries[slot] = entry,
                None => {
                    positions.insert(chunk.id, entries.len());
                    entries.push(entry);
                }
            }
        }

        Ok(())
    }

    #[instrument(skip(self, embedding))]
    async fn search(
        &self,
        embedding: &Embedding,
        top_k: usize,
    ) -> Result<Vec<SearchResult>, VectorStoreError> {
        let index = self.index.read().await;
        let entries = &index.entries;

        if let Some((_, stored)) = entries.first() {
            if stored.dimensions() != embedding.dimensions() {
                return Err(VectorStoreError::Search(format!(
                    "query has {} dimensions, index has {}",
                    embedding.dimensions(),
                    stored.dimensions()
                )));
            }
        }

        let mut results: Vec<SearchResult> = entries
            .iter()
            .map(|(chunk, stored)| SearchResult {
                chunk: chunk.clone(),
                score: stored.cosine_similarity(embedding),
            })
            .collect();

        results.sort_by(|a, b| b.score.total_cmp(&a.score));
        results.truncate(top_k);

        Ok(results)
    }

    async fn count(&self) -> usize {
        self.index.read().await.entries.len()
    }
}

pub struct InMemoryVectorStoreFactory;

impl VectorStoreFactory for InMemoryVectorStoreFactory {
    fn create(&self) -> Box<dyn VectorStore> {
        Box::new(InMemoryVectorStore::new())
    }
}
