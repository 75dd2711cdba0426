use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tokio::net::TcpListener;

use askdoc::application::ports::{Embedder, VectorStoreFactory};
use askdoc::application::services::{CacheWarmer, IngestionService, RetrievalService};
use askdoc::infrastructure::llm::{OpenAiClient, OpenAiEmbedder};
use askdoc::infrastructure::observability::{TracingConfig, init_tracing};
use askdoc::infrastructure::persistence::{FileCacheStore, InMemoryVectorStoreFactory};
use askdoc::infrastructure::text_processing::{CompositeFileLoader, RecursiveCharacterSplitter};
use askdoc::presentation::{AppState, Environment, Settings, create_router};

#[derive(Parser)]
#[command(name = "askdoc", about = "Ask questions about a Word document", version)]
struct Cli {
    /// Override the configured document path
    #[arg(long, global = true)]
    document: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the question-answer API (default)
    Serve,

    /// Split and embed the document once and store the results in the cache
    InitializeQa {
        /// Override the configured cache directory
        #[arg(long)]
        cache_dir: Option<PathBuf>,
    },
}

type DocumentIngestion = IngestionService<CompositeFileLoader, RecursiveCharacterSplitter>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let mut settings = Settings::load(environment).context("Failed to load configuration")?;
    if let Some(document) = cli.document {
        settings.document.path = document;
    }

    init_tracing(&TracingConfig::from_settings(
        &settings.logging,
        environment,
    ));
    tracing::info!(%environment, document = %settings.document.path.display(), "Starting askdoc");

    let embedder: Arc<dyn Embedder> = Arc::new(
        OpenAiEmbedder::from_settings(&settings.llm, &settings.embeddings)
            .context("Failed to build embeddings client")?,
    );
    let ingestion_service = Arc::new(build_ingestion_service(&settings, Arc::clone(&embedder)));
    let vector_store_factory: Arc<dyn VectorStoreFactory> = Arc::new(InMemoryVectorStoreFactory);

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            serve(
                &settings,
                ingestion_service,
                embedder,
                vector_store_factory,
            )
            .await
        }
        Command::InitializeQa { cache_dir } => {
            let directory = cache_dir.unwrap_or_else(|| settings.cache.directory.clone());
            let warmer = CacheWarmer::new(
                ingestion_service,
                vector_store_factory,
                Arc::new(FileCacheStore::new(directory)),
            );

            let report = warmer
                .warm()
                .await
                .context("Failed to initialize the QA system")?;
            tracing::info!(
                chunk_count = report.chunk_count,
                cached = report.cached,
                "Initialization finished"
            );
            Ok(())
        }
    }
}

fn build_ingestion_service(settings: &Settings, embedder: Arc<dyn Embedder>) -> DocumentIngestion {
    IngestionService::new(
        settings.document.path.clone(),
        Arc::new(CompositeFileLoader::with_default_adapters()),
        Arc::new(RecursiveCharacterSplitter::new(
            settings.chunking.chunk_size,
            settings.chunking.chunk_overlap,
        )),
        embedder,
    )
}

async fn serve(
    settings: &Settings,
    ingestion_service: Arc<DocumentIngestion>,
    embedder: Arc<dyn Embedder>,
    vector_store_factory: Arc<dyn VectorStoreFactory>,
) -> anyhow::Result<()> {
    let llm_client =
        Arc::new(OpenAiClient::from_settings(&settings.llm).context("Failed to build LLM client")?);

    let retrieval_service = Arc::new(RetrievalService::new(
        ingestion_service,
        embedder,
        vector_store_factory,
        llm_client,
        settings.retrieval.top_k,
    ));

    let router = create_router(AppState { retrieval_service });

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .context("Invalid server address")?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    tracing::info!("Listening on {}", addr);
    axum::serve(listener, router).await?;

    Ok(())
}
