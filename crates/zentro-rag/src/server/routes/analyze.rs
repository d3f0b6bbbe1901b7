//! One-shot analysis endpoints

use axum::{
    extract::{Multipart, State},
    Json,
};

use crate::error::Result;
use crate::server::state::AppState;
use crate::types::response::{AnalyzeResponse, ApiResult};

use super::read_upload;

/// POST /analyze/image - describe an uploaded image
pub async fn analyze_image(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Json<ApiResult<AnalyzeResponse>> {
    Json(analyze_image_inner(&state, multipart).await.into())
}

async fn analyze_image_inner(
    state: &AppState,
    mut multipart: Multipart,
) -> Result<AnalyzeResponse> {
    let upload = read_upload(&mut multipart).await?;
    state
        .analyze_image(&upload.filename, &upload.data, upload.instruction)
        .await
}

/// POST /analyze/document - one-shot analysis of a PDF or TXT document
pub async fn analyze_document(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Json<ApiResult<AnalyzeResponse>> {
    Json(analyze_document_inner(&state, multipart).await.into())
}

async fn analyze_document_inner(
    state: &AppState,
    mut multipart: Multipart,
) -> Result<AnalyzeResponse> {
    let upload = read_upload(&mut multipart).await?;
    state
        .analyze_document(&upload.filename, &upload.data, upload.instruction)
        .await
}
