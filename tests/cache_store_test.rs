use askdoc::application::ports::{CacheStore, CacheStoreError};
use askdoc::infrastructure::persistence::{FileCacheStore, InMemoryCacheStore};
use serde_json::json;

#[tokio::test]
async fn given_in_memory_cache_when_setting_then_value_is_readable() {
    let cache = InMemoryCacheStore::new();

    cache.set("docs", json!(["a", "b"])).await.unwrap();
    cache.set("embeddings", json!([[1.0]])).await.unwrap();

    assert_eq!(cache.get("docs").await.unwrap(), Some(json!(["a", "b"])));
    assert_eq!(cache.get("missing").await.unwrap(), None);
    assert_eq!(cache.keys().await, vec!["docs", "embeddings"]);
}

#[tokio::test]
async fn given_file_cache_when_setting_then_writes_one_json_file_per_key() {
    let dir = tempfile::TempDir::new().unwrap();
    let cache = FileCacheStore::new(dir.path().join("nested").join("cache"));

    cache.set("docs", json!({"count": 2})).await.unwrap();

    let path = cache.directory().join("docs.json");
    let on_disk: serde_json::Value =
        serde_json::from_slice(&std::fs::read(path).unwrap()).unwrap();
    assert_eq!(on_disk, json!({"count": 2}));
    assert!(!cache.directory().join("docs.json.tmp").exists());
}

#[tokio::test]
async fn given_file_cache_when_overwriting_then_latest_value_wins() {
    let dir = tempfile::TempDir::new().unwrap();
    let cache = FileCacheStore::new(dir.path().to_path_buf());

    cache.set("docs", json!(1)).await.unwrap();
    cache.set("docs", json!(2)).await.unwrap();

    assert_eq!(cache.get("docs").await.unwrap(), Some(json!(2)));
}

#[tokio::test]
async fn given_unknown_key_when_reading_file_cache_then_returns_none() {
    let dir = tempfile::TempDir::new().unwrap();
    let cache = FileCacheStore::new(dir.path().to_path_buf());

    assert_eq!(cache.get("embeddings").await.unwrap(), None);
}

#[tokio::test]
async fn given_key_with_path_characters_when_setting_then_stays_inside_directory() {
    let dir = tempfile::TempDir::new().unwrap();
    let cache = FileCacheStore::new(dir.path().join("cache"));

    cache.set("../escape", json!(true)).await.unwrap();

    assert!(!dir.path().join("escape.json").exists());
    assert_eq!(cache.get("../escape").await.unwrap(), Some(json!(true)));
}

#[tokio::test]
async fn given_corrupt_entry_when_reading_file_cache_then_reports_serialization_error() {
    let dir = tempfile::TempDir::new().unwrap();
    std::fs::write(dir.path().join("docs.json"), b"{not json").unwrap();
    let cache = FileCacheStore::new(dir.path().to_path_buf());

    let result = cache.get("docs").await;

    assert!(matches!(result, Err(CacheStoreError::Serialization(_))));
}
