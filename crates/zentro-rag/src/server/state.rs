//! Application state and the request pipelines that run over it

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::config::RagConfig;
use crate::error::Result;
use crate::generation::prompt::{
    PromptBuilder, DEFAULT_DOCUMENT_INSTRUCTION, DEFAULT_IMAGE_INSTRUCTION,
};
use crate::ingestion::{chunk_text, TextExtractor};
use crate::providers::openai::{OpenAiClient, OpenAiCompletion, OpenAiEmbedder};
use crate::providers::{CompletionProvider, EmbeddingProvider};
use crate::retrieval::{ChunkRecord, VectorStore};
use crate::types::request::AskRequest;
use crate::types::message::{encode_image_data_url, guess_mime_type, ChatMessage};
use crate::types::response::{
    AnalyzeResponse, AskResponse, ClearResponse, DocumentEntry, ListResponse, UploadResponse,
};

/// Retrieval depth for `/rag/ask`; a fixed policy, not configurable
const TOP_K: usize = 2;

/// Shared application state
///
/// One vector store and one set of injected providers serve every request;
/// per-request state stays on the stack of each pipeline method.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Configuration
    config: RagConfig,
    /// Persistent chunk collection
    store: Arc<VectorStore>,
    /// Embedding provider
    embedding: Arc<dyn EmbeddingProvider>,
    /// Completion provider
    completion: Arc<dyn CompletionProvider>,
    /// Ready state
    ready: RwLock<bool>,
}

impl AppState {
    /// Create application state with the production providers
    pub fn new(config: RagConfig) -> Result<Self> {
        tracing::info!("Initializing application state...");

        let store = Arc::new(VectorStore::open(
            &config.vector_db.data_dir,
            &config.vector_db.collection,
        )?);
        tracing::info!(
            "Vector store '{}' ready ({} chunks)",
            config.vector_db.collection,
            store.len()
        );

        let client = Arc::new(OpenAiClient::new(&config.llm));
        let embedding: Arc<dyn EmbeddingProvider> =
            Arc::new(OpenAiEmbedder::new(Arc::clone(&client), &config.embeddings));
        let completion: Arc<dyn CompletionProvider> = Arc::new(OpenAiCompletion::new(client));
        tracing::info!("Model endpoint client ready ({})", config.llm.base_url);

        Ok(Self::with_providers(config, store, embedding, completion))
    }

    /// Create application state with injected providers
    pub fn with_providers(
        config: RagConfig,
        store: Arc<VectorStore>,
        embedding: Arc<dyn EmbeddingProvider>,
        completion: Arc<dyn CompletionProvider>,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                store,
                embedding,
                completion,
                ready: RwLock::new(true),
            }),
        }
    }

    /// Get configuration
    pub fn config(&self) -> &RagConfig {
        &self.inner.config
    }

    /// Get the vector store
    pub fn store(&self) -> &Arc<VectorStore> {
        &self.inner.store
    }

    /// Get the embedding provider
    pub fn embedding_provider(&self) -> &Arc<dyn EmbeddingProvider> {
        &self.inner.embedding
    }

    /// Get the completion provider
    pub fn completion_provider(&self) -> &Arc<dyn CompletionProvider> {
        &self.inner.completion
    }

    /// Check if the server is ready
    pub fn is_ready(&self) -> bool {
        *self.inner.ready.read()
    }

    /// Set ready state
    pub fn set_ready(&self, ready: bool) {
        *self.inner.ready.write() = ready;
    }

    /// Describe an uploaded image with the vision model.
    pub async fn analyze_image(
        &self,
        filename: &str,
        data: &[u8],
        instruction: Option<String>,
    ) -> Result<AnalyzeResponse> {
        let instruction =
            instruction.unwrap_or_else(|| DEFAULT_IMAGE_INSTRUCTION.to_string());
        let mime_type = guess_mime_type(filename);
        let data_url = encode_image_data_url(data, mime_type);

        tracing::info!("Analyzing image '{}' ({} bytes)", filename, data.len());

        let message = ChatMessage::user_with_image(instruction, data_url);
        let result = self
            .inner
            .completion
            .complete(
                &[message],
                &self.inner.config.llm.vision_model,
                self.inner.config.llm.temperature,
            )
            .await?;

        Ok(AnalyzeResponse { result })
    }

    /// One-shot analysis of an uploaded document.
    pub async fn analyze_document(
        &self,
        filename: &str,
        data: &[u8],
        instruction: Option<String>,
    ) -> Result<AnalyzeResponse> {
        let text = TextExtractor::extract(filename, data)?;
        let instruction =
            instruction.unwrap_or_else(|| DEFAULT_DOCUMENT_INSTRUCTION.to_string());

        tracing::info!("Analyzing document '{}' ({} chars)", filename, text.len());

        let prompt = PromptBuilder::document_prompt(&instruction, &text);
        let result = self
            .inner
            .completion
            .complete(
                &[ChatMessage::user(prompt)],
                &self.inner.config.llm.chat_model,
                self.inner.config.llm.temperature,
            )
            .await?;

        Ok(AnalyzeResponse { result })
    }

    /// Ingest a document: extract, chunk, embed, and store.
    pub async fn ingest_document(&self, filename: &str, data: &[u8]) -> Result<UploadResponse> {
        let text = TextExtractor::extract(filename, data)?;
        let chunks = chunk_text(&text, self.inner.config.chunking.max_chars);
        let doc_id = Uuid::new_v4();

        let embeddings = self.inner.embedding.embed_batch(&chunks).await?;

        let records: Vec<ChunkRecord> = chunks
            .iter()
            .zip(embeddings)
            .enumerate()
            .map(|(index, (chunk, embedding))| ChunkRecord {
                id: format!("{}_{}", doc_id, index),
                document_id: doc_id,
                filename: filename.to_string(),
                chunk_index: index as u32,
                text: chunk.clone(),
                embedding,
            })
            .collect();
        self.inner.store.add(records)?;

        tracing::info!("Ingested '{}' as {}: {} chunks", filename, doc_id, chunks.len());

        let preview: String = text.chars().take(1000).collect();
        Ok(UploadResponse {
            doc_id,
            num_chunks: chunks.len(),
            file_name: filename.to_string(),
            preview,
        })
    }

    /// Answer a question from the stored chunks.
    ///
    /// Empty retrieval yields the fixed fallback answer, not an error.
    pub async fn ask(&self, request: AskRequest) -> Result<AskResponse> {
        tracing::info!("Question: \"{}\"", request.question);

        let question_embedding = self.inner.embedding.embed(&request.question).await?;
        let hits = self
            .inner
            .store
            .query(&question_embedding, TOP_K, request.doc_id);

        if hits.is_empty() {
            return Ok(AskResponse::not_found());
        }

        let context: Vec<String> = hits.iter().map(|hit| hit.text.clone()).collect();
        let messages = PromptBuilder::ask_messages(
            request.instruction.as_deref(),
            &context,
            &request.chat_history,
            &request.question,
        );

        let answer = self
            .inner
            .completion
            .complete(
                &messages,
                &self.inner.config.llm.chat_model,
                self.inner.config.llm.temperature,
            )
            .await?;

        let used_chunks = hits.into_iter().map(|hit| hit.id).collect();
        Ok(AskResponse::answered(answer, used_chunks))
    }

    /// List ingested documents, folded from chunk metadata.
    ///
    /// One entry per document id in first-seen order; the last stored
    /// filename for an id wins.
    pub fn list_documents(&self) -> ListResponse {
        let mut order: Vec<Uuid> = Vec::new();
        let mut names: HashMap<Uuid, String> = HashMap::new();

        for meta in self.inner.store.list_metadata() {
            if !names.contains_key(&meta.document_id) {
                order.push(meta.document_id);
            }
            names.insert(meta.document_id, meta.filename);
        }

        let documents = order
            .into_iter()
            .map(|doc_id| DocumentEntry {
                doc_id,
                filename: names.remove(&doc_id).unwrap_or_default(),
            })
            .collect();

        ListResponse { documents }
    }

    /// Discard the whole collection. Irreversible.
    pub fn clear_collection(&self) -> Result<ClearResponse> {
        self.inner.store.clear()?;
        tracing::info!("Knowledge base cleared");

        Ok(ClearResponse {
            status: "success".to_string(),
            message: "Knowledge base cleared.".to_string(),
        })
    }
}
