//! zentro-rag: local RAG backend with document ingestion and multimodal analysis
//!
//! Accepts PDF/TXT uploads, splits their text into paragraph-aware chunks,
//! embeds them into a persistent vector collection, and answers questions by
//! retrieving relevant chunks and forwarding them with conversation context
//! to an OpenAI-compatible completion endpoint. Images are analyzed through
//! the same endpoint's vision models.

pub mod config;
pub mod error;
pub mod generation;
pub mod ingestion;
pub mod providers;
pub mod retrieval;
pub mod server;
pub mod types;

pub use config::RagConfig;
pub use error::{Error, Result};
pub use server::state::AppState;
pub use server::RagServer;
