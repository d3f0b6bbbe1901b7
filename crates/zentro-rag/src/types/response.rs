//! Typed response payloads for the HTTP surface

use serde::Serialize;
use uuid::Uuid;

use crate::error::Result;

/// Success-or-error wrapper for user-facing operations.
///
/// Serializes either the success payload or `{"error": "..."}`; handlers
/// always answer with one of the two, never with a transport-level failure.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ApiResult<T> {
    Ok(T),
    Err(ErrorBody),
}

/// Wire shape of a failed operation
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl<T> From<Result<T>> for ApiResult<T> {
    fn from(result: Result<T>) -> Self {
        match result {
            Ok(value) => ApiResult::Ok(value),
            Err(e) => ApiResult::Err(ErrorBody {
                error: e.to_string(),
            }),
        }
    }
}

/// Body of `GET /health`
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Body of `POST /analyze/image` and `POST /analyze/document`
#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub result: String,
}

/// Body of `POST /rag/upload`
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub doc_id: Uuid,
    pub num_chunks: usize,
    pub file_name: String,
    pub preview: String,
}

/// One entry of `GET /rag/list`
#[derive(Debug, Clone, Serialize)]
pub struct DocumentEntry {
    pub doc_id: Uuid,
    pub filename: String,
}

/// Body of `GET /rag/list`
#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub documents: Vec<DocumentEntry>,
}

/// Body of `POST /rag/clear`
#[derive(Debug, Serialize)]
pub struct ClearResponse {
    pub status: String,
    pub message: String,
}

/// Body of `POST /rag/ask`
#[derive(Debug, Serialize)]
pub struct AskResponse {
    pub answer: String,
    /// IDs of the chunks the answer was grounded on; absent when retrieval
    /// found nothing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub used_chunks: Option<Vec<String>>,
}

impl AskResponse {
    /// Answer grounded on the given chunks
    pub fn answered(answer: String, used_chunks: Vec<String>) -> Self {
        Self {
            answer,
            used_chunks: Some(used_chunks),
        }
    }

    /// Fixed fallback when retrieval returns nothing
    pub fn not_found() -> Self {
        Self {
            answer: "I couldn't find any relevant information in the documents.".to_string(),
            used_chunks: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn api_result_serializes_success_payload() {
        let result: ApiResult<AnalyzeResponse> = Ok(AnalyzeResponse {
            result: "a cat".to_string(),
        })
        .into();
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value, serde_json::json!({"result": "a cat"}));
    }

    #[test]
    fn api_result_serializes_error_body() {
        let result: ApiResult<AnalyzeResponse> =
            Err(Error::UnsupportedFormat("csv".to_string())).into();
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"error": "Unsupported file type. Use PDF or TXT."})
        );
    }

    #[test]
    fn not_found_answer_omits_used_chunks() {
        let value = serde_json::to_value(AskResponse::not_found()).unwrap();
        assert!(value.get("used_chunks").is_none());
        assert_eq!(
            value["answer"],
            "I couldn't find any relevant information in the documents."
        );
    }

    #[test]
    fn answered_includes_used_chunks() {
        let response = AskResponse::answered("yes".to_string(), vec!["d_0".to_string()]);
        let value = serde_json::to_value(response).unwrap();
        assert_eq!(value["used_chunks"][0], "d_0");
    }
}
