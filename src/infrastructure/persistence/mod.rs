mod cache;
mod vector_store;

pub use cache::{FileCacheStore, InMemoryCacheStore};
pub use vector_store::{InMemoryVectorStore, InMemoryVectorStoreFactory};
