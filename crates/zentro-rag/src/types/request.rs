//! Incoming request bodies

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Body of `POST /rag/ask`
#[derive(Debug, Clone, Deserialize)]
pub struct AskRequest {
    /// Restrict retrieval to a single document
    #[serde(default)]
    pub doc_id: Option<Uuid>,
    /// The question to answer
    pub question: String,
    /// Instruction override; a grounding default is used when absent
    #[serde(default)]
    pub instruction: Option<String>,
    /// Prior conversation turns, oldest first
    #[serde(default)]
    pub chat_history: Vec<HistoryTurn>,
}

/// One prior conversation turn
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryTurn {
    pub role: String,
    pub content: String,
}
