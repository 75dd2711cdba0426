mod http_client;
mod openai_client;
mod openai_embedder;

pub use openai_client::OpenAiClient;
pub use openai_embedder::OpenAiEmbedder;
