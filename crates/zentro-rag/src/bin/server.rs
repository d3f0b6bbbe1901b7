//! RAG backend server binary
//!
//! Run with: cargo run -p zentro-rag --bin zentro-rag-server

use zentro_rag::{RagConfig, RagServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "zentro_rag=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!(
        r#"
╔═══════════════════════════════════════════════════════════╗
║                       Zentro RAG                          ║
║      Document Q&A and Analysis over Local Models          ║
╚═══════════════════════════════════════════════════════════╝
"#
    );

    // Load configuration
    let config = RagConfig::from_env();

    tracing::info!("Configuration loaded");
    tracing::info!("  - Completion endpoint: {}", config.llm.base_url);
    tracing::info!("  - Vision model: {}", config.llm.vision_model);
    tracing::info!("  - Chat model: {}", config.llm.chat_model);
    tracing::info!("  - Embedding model: {}", config.embeddings.model);
    tracing::info!("  - Chunk size: {}", config.chunking.max_chars);

    // Check the model runtime
    tracing::info!("Checking model runtime at {}...", config.llm.base_url);
    let client = reqwest::Client::new();
    match client
        .get(format!("{}/models", config.llm.base_url.trim_end_matches('/')))
        .bearer_auth(&config.llm.api_key)
        .send()
        .await
    {
        Ok(resp) if resp.status().is_success() => {
            tracing::info!("Model runtime is running");
        }
        _ => {
            tracing::warn!("Model runtime not available at {}", config.llm.base_url);
            tracing::warn!("Start LM Studio (or another OpenAI-compatible server) and load:");
            tracing::warn!("  - a chat/vision model ({})", config.llm.vision_model);
            tracing::warn!("  - an embedding model ({})", config.embeddings.model);
        }
    }

    // Create and start server
    let server = RagServer::new(config)?;

    println!("\nServer starting...");
    println!("  API: http://{}", server.address());
    println!("  Health: http://{}/health", server.address());
    println!("\nEndpoints:");
    println!("  POST /analyze/image     - Analyze an image");
    println!("  POST /analyze/document  - Analyze a document");
    println!("  POST /rag/upload        - Ingest a document");
    println!("  GET  /rag/list          - List documents");
    println!("  POST /rag/clear         - Clear the knowledge base");
    println!("  POST /rag/ask           - Ask a question");
    println!("\nPress Ctrl+C to stop\n");

    server.start().await?;

    Ok(())
}
