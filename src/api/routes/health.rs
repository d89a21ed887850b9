use axum::{extract::State, Json};
use serde::Serialize;

use crate::api::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[derive(Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub knowledge_base: String,
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".into(),
        version: env!("CARGO_PKG_VERSION").into(),
    })
}

/// The service can always take an upload, so it is ready even without a
/// knowledge base; the field reports whether questions can be answered yet.
pub async fn readiness_check(State(state): State<AppState>) -> Json<ReadinessResponse> {
    let loaded = state.knowledge_base.session().is_loaded().await;

    Json(ReadinessResponse {
        status: "ready".into(),
        knowledge_base: if loaded { "loaded" } else { "empty" }.into(),
    })
}
