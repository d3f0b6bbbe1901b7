//! Provider abstractions for embeddings and chat completion
//!
//! Trait-based seams so the server can talk to any OpenAI-compatible runtime
//! and tests can inject deterministic doubles.

pub mod completion;
pub mod embedding;
pub mod openai;

pub use completion::CompletionProvider;
pub use embedding::EmbeddingProvider;
