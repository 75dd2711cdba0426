mod file_cache_store;
mod in_memory_cache_store;

pub use file_cache_store::FileCacheStore;
pub use in_memory_cache_store::InMemoryCacheStore;
