mod environment;
mod settings;

pub use environment::{ENVIRONMENT_VARIABLE, Environment};
pub use settings::{
    CacheSettings, ChunkingSettings, DocumentSettings, EmbeddingsSettings, LlmSettings,
    LoggingSettings, RetrievalSettings, ServerSettings, Settings,
};
