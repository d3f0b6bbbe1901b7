//! HTTP route table and shared multipart handling

pub mod analyze;
pub mod rag;

use axum::{
    extract::{DefaultBodyLimit, Multipart},
    routing::{get, post},
    Router,
};

use crate::error::{Error, Result};
use crate::server::state::AppState;

/// Build the operation routes
pub fn routes(max_upload_size: usize) -> Router<AppState> {
    Router::new()
        .route("/analyze/image", post(analyze::analyze_image))
        .route("/analyze/document", post(analyze::analyze_document))
        .route("/rag/upload", post(rag::rag_upload))
        .route("/rag/list", get(rag::rag_list))
        .route("/rag/clear", post(rag::rag_clear))
        .route("/rag/ask", post(rag::rag_ask))
        .route("/info", get(info))
        .layer(DefaultBodyLimit::max(max_upload_size))
}

/// An uploaded file plus its optional instruction field
pub(crate) struct Upload {
    pub filename: String,
    pub data: Vec<u8>,
    pub instruction: Option<String>,
}

/// Read the `file` and `instruction` fields from a multipart body.
pub(crate) async fn read_upload(multipart: &mut Multipart) -> Result<Upload> {
    let mut filename = None;
    let mut data = None;
    let mut instruction = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::internal(format!("Failed to read multipart field: {}", e)))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "file" => {
                filename = field.file_name().map(|name| name.to_string());
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| Error::internal(format!("Failed to read file: {}", e)))?;
                data = Some(bytes.to_vec());
            }
            "instruction" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| Error::internal(format!("Failed to read instruction: {}", e)))?;
                if !text.is_empty() {
                    instruction = Some(text);
                }
            }
            _ => {}
        }
    }

    let data = data.ok_or_else(|| Error::internal("Missing 'file' field in upload"))?;
    let filename = filename.unwrap_or_else(|| "upload".to_string());

    Ok(Upload {
        filename,
        data,
        instruction,
    })
}

/// GET /info - service description and endpoint table
pub async fn info() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "name": "zentro-rag",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Local RAG backend with document ingestion, vector search, and multimodal analysis",
        "endpoints": {
            "POST /analyze/image": "Describe or analyze an uploaded image",
            "POST /analyze/document": "One-shot analysis of a PDF or TXT document",
            "POST /rag/upload": "Ingest a document into the knowledge base",
            "GET /rag/list": "List ingested documents",
            "POST /rag/clear": "Clear the knowledge base",
            "POST /rag/ask": "Ask a question over the knowledge base"
        }
    }))
}
