//! Knowledge-base endpoints: ingest, list, clear, ask

use axum::{
    extract::{Multipart, State},
    Json,
};

use crate::error::Result;
use crate::server::state::AppState;
use crate::types::request::AskRequest;
use crate::types::response::{
    ApiResult, AskResponse, ClearResponse, ListResponse, UploadResponse,
};

use super::read_upload;

/// POST /rag/upload - ingest a document into the knowledge base
pub async fn rag_upload(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Json<ApiResult<UploadResponse>> {
    Json(rag_upload_inner(&state, multipart).await.into())
}

async fn rag_upload_inner(state: &AppState, mut multipart: Multipart) -> Result<UploadResponse> {
    let upload = read_upload(&mut multipart).await?;
    state.ingest_document(&upload.filename, &upload.data).await
}

/// GET /rag/list - list ingested documents
pub async fn rag_list(State(state): State<AppState>) -> Json<ApiResult<ListResponse>> {
    Json(ApiResult::Ok(state.list_documents()))
}

/// POST /rag/clear - discard the whole knowledge base
pub async fn rag_clear(State(state): State<AppState>) -> Json<ApiResult<ClearResponse>> {
    Json(state.clear_collection().into())
}

/// POST /rag/ask - answer a question over the knowledge base
pub async fn rag_ask(
    State(state): State<AppState>,
    Json(request): Json<AskRequest>,
) -> Json<ApiResult<AskResponse>> {
    Json(state.ask(request).await.into())
}
