//! Error types for the RAG backend

use thiserror::Error;

/// Result type alias for backend operations
pub type Result<T> = std::result::Result<T, Error>;

/// Backend errors
///
/// Every user-facing operation converts these into an `{"error": ...}` body
/// at the handler boundary; they never escape to the transport layer.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Uploaded file has an extension we cannot extract text from
    #[error("Unsupported file type. Use PDF or TXT.")]
    UnsupportedFormat(String),

    /// Extraction produced no usable text
    #[error("No text extracted from document.")]
    NoContent,

    /// Embedding endpoint error
    #[error("Embedding generation failed: {0}")]
    Embedding(String),

    /// Completion endpoint error
    #[error("Completion failed: {0}")]
    Completion(String),

    /// Vector collection error
    #[error("Vector store error: {0}")]
    VectorDb(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create an embedding error
    pub fn embedding(message: impl Into<String>) -> Self {
        Self::Embedding(message.into())
    }

    /// Create a completion error
    pub fn completion(message: impl Into<String>) -> Self {
        Self::Completion(message.into())
    }

    /// Create a vector store error
    pub fn vector_db(message: impl Into<String>) -> Self {
        Self::VectorDb(message.into())
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_format_message_is_user_facing() {
        let err = Error::UnsupportedFormat("csv".to_string());
        assert_eq!(err.to_string(), "Unsupported file type. Use PDF or TXT.");
    }

    #[test]
    fn no_content_message_is_user_facing() {
        assert_eq!(
            Error::NoContent.to_string(),
            "No text extracted from document."
        );
    }
}
