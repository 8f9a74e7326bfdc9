//! Health check handler

use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::services::AnalysisStore;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub database: String,
    pub version: String,
}

/// GET /health - liveness plus row store connectivity
pub async fn health_check(State(store): State<Arc<AnalysisStore>>) -> Json<HealthResponse> {
    let database_healthy = store.is_healthy().await;

    Json(HealthResponse {
        status: if database_healthy { "healthy" } else { "unhealthy" }.to_string(),
        database: if database_healthy { "connected" } else { "unreachable" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
