mod in_memory_vector_store;

pub use in_memory_vector_store::{InMemoryVectorStore, InMemoryVectorStoreFactory};
