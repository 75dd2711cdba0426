#![allow(dead_code)]

use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use askdoc::application::ports::{
    CacheStore, CacheStoreError, Embedder, EmbedderError, FileLoader, FileLoaderError, LlmClient,
    LlmClientError, VectorStoreFactory,
};
use askdoc::application::services::{IngestionService, RetrievalService};
use askdoc::domain::{Document, Embedding};
use askdoc::infrastructure::persistence::{InMemoryCacheStore, InMemoryVectorStoreFactory};
use askdoc::infrastructure::text_processing::{CompositeFileLoader, RecursiveCharacterSplitter};
use serde_json::Value;

pub const TEST_CHUNK_SIZE: usize = 1000;
pub const TEST_CHUNK_OVERLAP: usize = 200;
pub const TEST_TOP_K: usize = 4;
pub const MOCK_ANSWER: &str = "Mock answer";

const KEYWORDS: [&str; 3] = ["rust", "python", "coffee"];

pub type TestIngestion = IngestionService<CountingFileLoader, RecursiveCharacterSplitter>;

/// Builds a `.docx` file with one paragraph per entry.
pub fn write_docx(dir: &Path, name: &str, paragraphs: &[&str]) -> PathBuf {
    let mut docx = docx_rs::Docx::new();
    for text in paragraphs {
        docx = docx.add_paragraph(
            docx_rs::Paragraph::new().add_run(docx_rs::Run::new().add_text(*text)),
        );
    }
    let path = dir.join(name);
    std::fs::write(&path, docx_bytes(docx)).unwrap();
    path
}

pub fn docx_bytes(docx: docx_rs::Docx) -> Vec<u8> {
    let mut buffer = Cursor::new(Vec::new());
    docx.build().pack(&mut buffer).unwrap();
    buffer.into_inner()
}

pub fn sample_paragraphs() -> Vec<&'static str> {
    vec![
        "Rust is a systems programming language focused on safety and speed.",
        "Python is a dynamic language popular for scripting and data science.",
        "Coffee is brewed from roasted beans and served hot.",
    ]
}

/// Deterministic embedding: one dimension per known keyword plus a bias.
pub fn keyword_embedding(text: &str) -> Embedding {
    let lower = text.to_lowercase();
    let mut values: Vec<f32> = KEYWORDS
        .iter()
        .map(|k| if lower.contains(k) { 1.0 } else { 0.0 })
        .collect();
    values.push(0.1);
    Embedding::new(values)
}

#[derive(Default)]
pub struct MockEmbedder {
    pub embed_calls: AtomicUsize,
    pub batch_calls: AtomicUsize,
}

impl MockEmbedder {
    pub fn batch_calls(&self) -> usize {
        self.batch_calls.load(Ordering::SeqCst)
    }

    pub fn total_calls(&self) -> usize {
        self.embed_calls.load(Ordering::SeqCst) + self.batch_calls()
    }
}

#[async_trait::async_trait]
impl Embedder for MockEmbedder {
    async fn embed_query(&self, text: &str) -> Result<Embedding, EmbedderError> {
        self.embed_calls.fetch_add(1, Ordering::SeqCst);
        Ok(keyword_embedding(text))
    }

    async fn embed_documents(&self, texts: &[&str]) -> Result<Vec<Embedding>, EmbedderError> {
        self.batch_calls.fetch_add(1, Ordering::SeqCst);
        Ok(texts.iter().map(|t| keyword_embedding(t)).collect())
    }
}

pub struct FailingEmbedder;

#[async_trait::async_trait]
impl Embedder for FailingEmbedder {
    async fn embed_query(&self, _text: &str) -> Result<Embedding, EmbedderError> {
        Err(EmbedderError::Request(
            "embedding service unavailable".to_string(),
        ))
    }

    async fn embed_documents(&self, _texts: &[&str]) -> Result<Vec<Embedding>, EmbedderError> {
        Err(EmbedderError::Request(
            "embedding service unavailable".to_string(),
        ))
    }
}

#[derive(Default)]
pub struct RecordingLlmClient {
    pub prompts: Mutex<Vec<String>>,
}

impl RecordingLlmClient {
    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().unwrap().last().cloned()
    }
}

#[async_trait::async_trait]
impl LlmClient for RecordingLlmClient {
    async fn complete(&self, prompt: &str) -> Result<String, LlmClientError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok(MOCK_ANSWER.to_string())
    }
}

pub struct FailingLlmClient;

#[async_trait::async_trait]
impl LlmClient for FailingLlmClient {
    async fn complete(&self, _prompt: &str) -> Result<String, LlmClientError> {
        Err(LlmClientError::Request(
            "llm quota exceeded".to_string(),
        ))
    }
}

/// Real loader that counts how often it is asked to extract text.
pub struct CountingFileLoader {
    inner: CompositeFileLoader,
    calls: AtomicUsize,
}

impl Default for CountingFileLoader {
    fn default() -> Self {
        Self {
            inner: CompositeFileLoader::with_default_adapters(),
            calls: AtomicUsize::new(0),
        }
    }
}

impl CountingFileLoader {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl FileLoader for CountingFileLoader {
    async fn load(
        &self,
        data: &[u8],
        document: &Document,
    ) -> Result<String, FileLoaderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.load(data, document).await
    }
}

/// In-memory cache that records reads.
#[derive(Default)]
pub struct SpyCacheStore {
    inner: InMemoryCacheStore,
    pub reads: AtomicUsize,
}

impl SpyCacheStore {
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub async fn peek(&self, key: &str) -> Option<Value> {
        self.inner.get(key).await.unwrap()
    }
}

#[async_trait::async_trait]
impl CacheStore for SpyCacheStore {
    async fn set(&self, key: &str, value: Value) -> Result<(), CacheStoreError> {
        self.inner.set(key, value).await
    }

    async fn get(&self, key: &str) -> Result<Option<Value>, CacheStoreError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.inner.get(key).await
    }
}

pub struct FailingCacheStore;

#[async_trait::async_trait]
impl CacheStore for FailingCacheStore {
    async fn set(&self, _key: &str, _value: Value) -> Result<(), CacheStoreError> {
        Err(CacheStoreError::Io(std::io::Error::other("cache backend down")))
    }

    async fn get(&self, _key: &str) -> Result<Option<Value>, CacheStoreError> {
        Ok(None)
    }
}

pub fn vector_store_factory() -> Arc<dyn VectorStoreFactory> {
    Arc::new(InMemoryVectorStoreFactory)
}

pub fn ingestion_service(
    document_path: PathBuf,
    file_loader: Arc<CountingFileLoader>,
    embedder: Arc<dyn Embedder>,
) -> Arc<TestIngestion> {
    Arc::new(IngestionService::new(
        document_path,
        file_loader,
        Arc::new(RecursiveCharacterSplitter::new(
            TEST_CHUNK_SIZE,
            TEST_CHUNK_OVERLAP,
        )),
        embedder,
    ))
}

pub fn retrieval_service<L: LlmClient>(
    ingestion: Arc<TestIngestion>,
    embedder: Arc<dyn Embedder>,
    llm_client: Arc<L>,
) -> Arc<RetrievalService<CountingFileLoader, RecursiveCharacterSplitter, L>> {
    Arc::new(RetrievalService::new(
        ingestion,
        embedder,
        vector_store_factory(),
        llm_client,
        TEST_TOP_K,
    ))
}
