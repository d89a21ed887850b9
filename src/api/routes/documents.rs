use axum::{
    extract::{
        multipart::MultipartRejection,
        rejection::JsonRejection,
        Multipart, State,
    },
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::{error::ApiError, state::AppState};

const FILE_FIELD: &str = "file";
const UPLOAD_CONTEXT: &str = "Error processing PDF";

#[derive(Debug, Serialize, Deserialize)]
pub struct UploadResponse {
    pub message: String,
    /// Extracted document text, trimmed.
    pub text: String,
    pub document_id: Uuid,
    pub chunks: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct KnowledgeBaseResponse {
    pub document_id: Uuid,
    pub name: String,
    pub content_type: String,
    pub size_bytes: usize,
    pub chunks: usize,
    pub dimension: Option<usize>,
    pub embedding_model: String,
    pub generation_model: String,
    pub built_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Deserialize)]
pub struct SearchDocumentsRequest {
    pub query: String,
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResultResponse {
    pub chunk_index: usize,
    pub content: String,
    pub distance: f32,
}

/// `POST /upload-pdf`: builds a new knowledge base from the multipart `file` field.
pub async fn upload_pdf(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, ApiError> {
    let mut multipart = multipart?;
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let name = field.file_name().unwrap_or("uploaded.pdf").to_string();
        let content_type = field.content_type().unwrap_or_default().to_string();
        state
            .knowledge_base
            .validate_media_type(&content_type)
            .map_err(|e| {
                tracing::warn!(%name, %content_type, "rejected upload");
                ApiError::with_context(e, UPLOAD_CONTEXT)
            })?;

        let bytes = field.bytes().await?;
        let kb = state
            .knowledge_base
            .upload(&name, &content_type, bytes.to_vec())
            .await
            .map_err(|e| ApiError::with_context(e, UPLOAD_CONTEXT))?;

        return Ok(Json(UploadResponse {
            message: "PDF processed and knowledge base prepared.".to_string(),
            text: kb.text.trim().to_string(),
            document_id: kb.document.id,
            chunks: kb.chunks.len(),
        }));
    }

    Err(ApiError::bad_request(format!(
        "Missing form field '{FILE_FIELD}'"
    )))
}

/// `GET /knowledge-base`: describes the live knowledge base.
pub async fn get_knowledge_base(
    State(state): State<AppState>,
) -> Result<Json<KnowledgeBaseResponse>, ApiError> {
    let kb = state.knowledge_base.current().await?;

    Ok(Json(KnowledgeBaseResponse {
        document_id: kb.document.id,
        name: kb.document.name.clone(),
        content_type: kb.document.content_type.clone(),
        size_bytes: kb.document.size_bytes,
        chunks: kb.chunks.len(),
        dimension: kb.index().dimension(),
        embedding_model: kb.embedding_model.clone(),
        generation_model: kb.generator().model_name().to_string(),
        built_at: kb.built_at,
    }))
}

/// `POST /search`: retrieval only, no generation.
pub async fn search_documents(
    State(state): State<AppState>,
    request: Result<Json<SearchDocumentsRequest>, JsonRejection>,
) -> Result<Json<Vec<SearchResultResponse>>, ApiError> {
    let Json(request) = request?;
    let results = state
        .knowledge_base
        .search(&request.query, request.limit)
        .await
        .map_err(|e| ApiError::with_context(e, "Search failed"))?;

    Ok(Json(
        results
            .into_iter()
            .map(|r| SearchResultResponse {
                chunk_index: r.chunk.chunk_index,
                content: r.chunk.content,
                distance: r.distance,
            })
            .collect(),
    ))
}
