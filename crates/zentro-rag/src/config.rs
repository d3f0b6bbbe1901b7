//! Configuration for the RAG backend

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main backend configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RagConfig {
    /// Server configuration
    pub server: ServerConfig,
    /// Completion endpoint configuration
    pub llm: LlmConfig,
    /// Embedding configuration
    pub embeddings: EmbeddingConfig,
    /// Chunking configuration
    pub chunking: ChunkingConfig,
    /// Vector collection configuration
    pub vector_db: VectorDbConfig,
}

impl RagConfig {
    /// Build configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(host) = std::env::var("HOST") {
            config.server.host = host;
        }
        if let Ok(port) = std::env::var("PORT") {
            if let Ok(port) = port.parse() {
                config.server.port = port;
            }
        }
        if let Ok(url) = std::env::var("LM_STUDIO_BASE_URL") {
            config.llm.base_url = url;
        }
        if let Ok(key) = std::env::var("LM_STUDIO_API_KEY") {
            config.llm.api_key = key;
        }
        if let Ok(model) = std::env::var("VISION_MODEL_NAME") {
            config.llm.vision_model = model;
        }
        // The chat model defaults to the vision model unless set explicitly.
        config.llm.chat_model = std::env::var("CHAT_MODEL_NAME")
            .unwrap_or_else(|_| config.llm.vision_model.clone());
        if let Ok(model) = std::env::var("EMBED_MODEL_NAME") {
            config.embeddings.model = model;
        }
        if let Ok(dir) = std::env::var("ZENTRO_DATA_DIR") {
            config.vector_db.data_dir = PathBuf::from(dir);
        }

        config
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host address
    pub host: String,
    /// Port number
    pub port: u16,
    /// Enable CORS
    pub enable_cors: bool,
    /// Maximum upload size in bytes (default: 100MB)
    pub max_upload_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            enable_cors: true,
            max_upload_size: 100 * 1024 * 1024, // 100MB
        }
    }
}

/// Completion endpoint (OpenAI-compatible) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Base URL of the OpenAI-compatible endpoint
    pub base_url: String,
    /// API key; LM Studio accepts any value
    pub api_key: String,
    /// Model used for image analysis
    pub vision_model: String,
    /// Model used for text-only completion
    pub chat_model: String,
    /// Temperature for generation
    pub temperature: f32,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:1234/v1".to_string(),
            api_key: "lm-studio".to_string(),
            vision_model: "qwen/qwen3-vl-4b-instruct".to_string(),
            chat_model: "qwen/qwen3-vl-4b-instruct".to_string(),
            temperature: 0.2,
            timeout_secs: 120,
        }
    }
}

/// Embedding configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    /// Embedding model name on the local runtime
    pub model: String,
    /// Embedding dimensions (384 for MiniLM-class models)
    pub dimensions: usize,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            model: "text-embedding-all-minilm-l6-v2".to_string(),
            dimensions: 384,
        }
    }
}

/// Text chunking configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkingConfig {
    /// Maximum chunk size in characters
    pub max_chars: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self { max_chars: 800 }
    }
}

/// Vector collection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorDbConfig {
    /// Directory holding the persisted collection
    pub data_dir: PathBuf,
    /// Collection name
    pub collection: String,
}

impl Default for VectorDbConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./zentro_db"),
            collection: "zentro_docs".to_string(),
        }
    }
}
