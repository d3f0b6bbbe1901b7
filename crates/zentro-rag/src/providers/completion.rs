//! Completion provider trait

use async_trait::async_trait;

use crate::error::Result;
use crate::types::message::ChatMessage;

/// Trait for chat-style text generation
///
/// Messages may carry plain text or mixed text/image content. Transport and
/// model-side failures surface as error results so callers can report them.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Send messages to the given model and return the generated text
    async fn complete(
        &self,
        messages: &[ChatMessage],
        model: &str,
        temperature: f32,
    ) -> Result<String>;

    /// Check if the provider is healthy and available
    async fn health_check(&self) -> Result<bool>;

    /// Provider name for logging
    fn name(&self) -> &str;
}
