use async_trait::async_trait;
use serde_json::Value;

/// Process-wide key-value cache for precomputed pipeline output.
#[async_trait]
pub trait CacheStore: Send + Sync {
    async fn set(&self, key: &str, value: Value) -> Result<(), CacheStoreError>;

    async fn get(&self, key: &str) -> Result<Option<Value>, CacheStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum CacheStoreError {
    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
