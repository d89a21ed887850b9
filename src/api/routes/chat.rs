use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::api::{error::ApiError, state::AppState};

#[derive(Debug, Serialize, Deserialize)]
pub struct AskRequest {
    pub question: String,
    /// Number of chunks to retrieve; the configured default when absent.
    #[serde(default)]
    pub top_k: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AskResponse {
    pub response: String,
}

/// `POST /ask-llm`: answers a question from the live knowledge base.
pub async fn ask_llm(
    State(state): State<AppState>,
    request: Result<Json<AskRequest>, JsonRejection>,
) -> Result<Json<AskResponse>, ApiError> {
    let Json(request) = request?;
    let response = state
        .knowledge_base
        .ask(&request.question, request.top_k)
        .await
        .map_err(|e| ApiError::with_context(e, "Error generating answer"))?;

    Ok(Json(AskResponse { response }))
}
