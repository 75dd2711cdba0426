use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;

use crate::application::ports::{CacheStore, CacheStoreError};

/// Stores each key as `<directory>/<key>.json` so entries outlive the
/// process that wrote them.
pub struct FileCacheStore {
    directory: PathBuf,
}

impl FileCacheStore {
    pub fn new(directory: PathBuf) -> Self {
        Self { directory }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        let file_name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.directory.join(format!("{file_name}.json"))
    }
}

#[async_trait]
impl CacheStore for FileCacheStore {
    #[tracing::instrument(skip(self, value), fields(directory = %self.directory.display()))]
    async fn set(&self, key: &str, value: Value) -> Result<(), CacheStoreError> {
        tokio::fs::create_dir_all(&self.directory).await?;

        let bytes = serde_json::to_vec(&value)?;
        let path = self.entry_path(key);
        let staging = path.with_extension("json.tmp");

        tokio::fs::write(&staging, bytes).await?;
        tokio::fs::rename(&staging, &path).await?;

        tracing::debug!(key, path = %path.display(), "Cache entry written");
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<Value>, CacheStoreError> {
        match tokio::fs::read(self.entry_path(key)).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
