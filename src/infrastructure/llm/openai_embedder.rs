use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::http_client::{ApiFailure, DEFAULT_OPENAI_BASE_URL, build_http_client, ensure_success};
use crate::application::ports::{Embedder, EmbedderError};
use crate::domain::Embedding;
use crate::presentation::config::{EmbeddingsSettings, LlmSettings};

const DEFAULT_BATCH_SIZE: usize = 1000;

pub struct OpenAiEmbedder {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
    batch_size: usize,
}

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    input: &'a [&'a str],
    model: &'a str,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    index: usize,
    embedding: Vec<f32>,
}

impl OpenAiEmbedder {
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            client: Client::new(),
            base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            api_key,
            model,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }

    pub fn from_settings(
        llm: &LlmSettings,
        embeddings: &EmbeddingsSettings,
    ) -> Result<Self, EmbedderError> {
        let client = build_http_client(llm.request_timeout())
            .map_err(|e| EmbedderError::Request(e.to_string()))?;

        Ok(Self {
            client,
            base_url: llm.base_url.trim_end_matches('/').to_string(),
            api_key: llm.api_key.clone(),
            model: embeddings.model.clone(),
            batch_size: embeddings.batch_size.max(1),
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    async fn request_batch(&self, texts: &[&str]) -> Result<Vec<Embedding>, EmbedderError> {
        let request_body = EmbeddingRequest {
            input: texts,
            model: &self.model,
        };

        let response = self
            .client
            .post(format!("{}/embeddings", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| EmbedderError::Request(e.to_string()))?;

        let response = ensure_success(response).await.map_err(|failure| match failure {
            ApiFailure::RateLimited => EmbedderError::RateLimited,
            ApiFailure::Status(detail) => EmbedderError::Request(detail),
        })?;

        let mut embedding_response: EmbeddingResponse = response
            .json()
            .await
            .map_err(|e| EmbedderError::MalformedResponse(e.to_string()))?;

        if embedding_response.data.len() != texts.len() {
            return Err(EmbedderError::MalformedResponse(format!(
                "expected {} embeddings, got {}",
                texts.len(),
                embedding_response.data.len()
            )));
        }

        embedding_response.data.sort_by_key(|d| d.index);

        Ok(embedding_response
            .data
            .into_iter()
            .map(|d| Embedding::new(d.embedding))
            .collect())
    }
}

#[async_trait]
impl Embedder for OpenAiEmbedder {
    async fn embed_query(&self, text: &str) -> Result<Embedding, EmbedderError> {
        let results = self.request_batch(&[text]).await?;
        results
            .into_iter()
            .next()
            .ok_or_else(|| EmbedderError::MalformedResponse("empty response".to_string()))
    }

    #[tracing::instrument(skip(self, texts), fields(count = texts.len(), model = %self.model))]
    async fn embed_documents(&self, texts: &[&str]) -> Result<Vec<Embedding>, EmbedderError> {
        let mut embeddings = Vec::with_capacity(texts.len());

        for batch in texts.chunks(self.batch_size) {
            embeddings.extend(self.request_batch(batch).await?);
        }

        Ok(embeddings)
    }
}
